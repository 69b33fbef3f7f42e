//! The oversize-split cascade.
//!
//! ## The Algorithm
//!
//! Any text that exceeds the bound policy gets split by progressively
//! finer strategies, coarsest first:
//!
//! ```text
//! 1. Blank lines      (paragraphs)
//! 2. List markers     (bullet / numbered items, plus a preamble item)
//! 3. Single newlines  (lines)
//! 4. Sentence bounds  (UAX #29 segmentation)
//! 5. Hard slice       (whitespace-aware character cuts — last resort)
//! ```
//!
//! A paragraph boundary beats a sentence boundary beats a mid-word cut,
//! so each strategy is tried only after every coarser one has failed.
//!
//! ## The Index Cursor
//!
//! Recursion threads an integer cursor through the strategy list: a
//! piece produced by strategy `i` is re-split starting from `i + 1`,
//! never from the top. Retrying a coarser strategy on a finer piece
//! could not succeed (the boundary it splits on was already consumed)
//! and would let pathological input cycle between strategies forever.
//!
//! A strategy only counts if it makes progress — more than one
//! non-empty trimmed part. Splitting `"- one item"` on list markers
//! yields one part, so the cascade moves on.
//!
//! ## The Hard Slice
//!
//! When no boundary exists at all (one enormous unbroken word-run), the
//! fallback cuts raw character spans: take the widest prefix both
//! ceilings allow, prefer backing up to the last whitespace past the
//! midpoint so cuts avoid word interiors, and advance. Each iteration
//! consumes at least one character, so termination is by construction.

use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::bounds::BoundPolicy;

static BLANK_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n").expect("blank-line pattern compiles"));

pub(crate) static LIST_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*+]|\d+\.)\s+").expect("list pattern compiles"));

/// Number of strategies before the hard-slice fallback.
const STRATEGIES: usize = 4;

/// Split `text` into pieces that each satisfy `policy`.
///
/// Returns `[text]` (trimmed) when it already fits, and nothing for
/// whitespace-only input. See the module docs for the cascade order.
#[must_use]
pub fn split_to_fit(text: &str, policy: &BoundPolicy) -> Vec<String> {
    split_from(text, policy, 0)
}

fn split_from(text: &str, policy: &BoundPolicy, strategy_index: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if policy.fits(text) {
        return vec![text.to_string()];
    }

    for index in strategy_index..STRATEGIES {
        let parts = apply_strategy(index, text);
        if parts.len() > 1 {
            return parts
                .iter()
                .flat_map(|part| split_from(part, policy, index + 1))
                .collect();
        }
    }

    hard_slice(text, policy)
}

fn apply_strategy(index: usize, text: &str) -> Vec<String> {
    let parts: Vec<String> = match index {
        0 => BLANK_LINE_RE.split(text).map(ToString::to_string).collect(),
        1 => split_list_items(text),
        2 => text.split('\n').map(ToString::to_string).collect(),
        3 => text
            .split_sentence_bounds()
            .map(ToString::to_string)
            .collect(),
        _ => vec![text.to_string()],
    };

    parts
        .into_iter()
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Split on blank lines into trimmed, non-empty paragraphs.
pub(crate) fn split_paragraphs(text: &str) -> Vec<String> {
    BLANK_LINE_RE
        .split(text)
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Group lines into list items: each marker line opens an item, plain
/// lines append to the open item. Lines before the first marker form a
/// preamble item of their own.
pub(crate) fn split_list_items(text: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();

    for line in text.split('\n') {
        if LIST_MARKER_RE.is_match(line) || items.is_empty() {
            items.push(line.to_string());
        } else if let Some(open) = items.last_mut() {
            open.push('\n');
            open.push_str(line);
        }
    }

    items
}

/// Cut raw character spans when no splittable boundary exists.
///
/// Each bite takes at most `policy.hard_slice_len()` bytes, backed up
/// to a char boundary and, when possible, to the last whitespace after
/// the midpoint of the bite.
#[must_use]
pub fn hard_slice(text: &str, policy: &BoundPolicy) -> Vec<String> {
    let bite = policy.hard_slice_len().max(1);
    let mut pieces = Vec::new();
    let mut rest = text.trim();

    while !rest.is_empty() {
        if policy.fits(rest) {
            pieces.push(rest.to_string());
            break;
        }

        let mut end = bite.min(rest.len());
        while end > 0 && !rest.is_char_boundary(end) {
            end -= 1;
        }

        // Prefer a whitespace cut point in the back half of the bite.
        let midpoint = end / 2;
        if let Some(ws) = rest[..end]
            .char_indices()
            .filter(|(i, ch)| *i > midpoint && ch.is_whitespace())
            .map(|(i, _)| i)
            .next_back()
        {
            end = ws;
        }

        // Shrink in 10% passes until both ceilings hold, then one char
        // at a time.
        while end > 1 && policy.exceeds_len(end) {
            let step = (end / 10).max(1);
            end -= step;
            while end > 0 && !rest.is_char_boundary(end) {
                end -= 1;
            }
        }
        if end == 0 {
            end = rest
                .char_indices()
                .nth(1)
                .map_or(rest.len(), |(i, _)| i);
        }

        let piece = rest[..end].trim();
        if !piece.is_empty() {
            pieces.push(piece.to_string());
        }
        rest = rest[end..].trim_start();
    }

    pieces
}
