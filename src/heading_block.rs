//! Heading-block chunking for helper reference documents.
//!
//! Helper documents (discipline indexes, platform guides, model
//! indexes and specs) are dense reference material: each heading opens
//! a self-contained block a reader would cite as a unit. The chunker
//! therefore works section-at-a-time:
//!
//! ```text
//! ## Luminar X2                   ← one section
//! - 40 bullet lines ...
//!
//! fits whole?  ──yes──► one chunk, heading "Luminar X2"
//!     │no
//!     ▼
//! derive units (list items here), pack under a reduced token
//! ceiling that reserves room for the heading, then label parts:
//!     chunk: heading "Luminar X2 (part 1/3)"
//!     chunk: heading "Luminar X2 (part 2/3)"
//!     chunk: heading "Luminar X2 (part 3/3)"
//! ```
//!
//! The whole-section test reserves the width of the widest realistic
//! part suffix up front, so a section accepted whole can never be
//! pushed over a ceiling by relabeling later.
//!
//! Unit derivation prefers structure the section actually has: list
//! items when at least three bullet lines are present, else blank-line
//! paragraphs, else the body as a single unit.

use crate::bounds::BoundPolicy;
use crate::chunk::Chunk;
use crate::document::Document;
use crate::labels::section_labels;
use crate::pack::pack_units;
use crate::section::parse_sections;
use crate::split::{split_list_items, split_paragraphs, LIST_MARKER_RE};
use crate::Chunker;

/// Width reserved for the `(part i/N)` heading suffix.
const PART_SUFFIX_ALLOWANCE: &str = " (part 10/10)";

/// Minimum bullet lines before a section's body is treated as a list.
const LIST_THRESHOLD: usize = 3;

/// Section-at-a-time chunker for the helper document types.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingBlockChunker;

impl Chunker for HeadingBlockChunker {
    fn chunk(&self, doc: &Document, text: &str, policy: &BoundPolicy) -> Vec<Chunk> {
        let mut chunks = Vec::new();

        for section in parse_sections(text) {
            let body = section.body();
            if body.is_empty() {
                continue;
            }

            let labels = section_labels(
                section.heading.as_deref(),
                section.heading_path.as_deref(),
                doc.doc_type.label_prefix(),
            );

            if !policy.exceeds_len(body.len() + PART_SUFFIX_ALLOWANCE.len()) {
                chunks.push(
                    Chunk::new(body, chunks.len())
                        .with_heading(section.heading.clone(), section.heading_path.clone())
                        .with_labels(labels),
                );
                continue;
            }

            let (units, joiner) = section_units(&body);
            let heading_tokens = section.heading.as_ref().map_or(0, |heading| {
                policy.estimate_tokens(&format!("{heading}{PART_SUFFIX_ALLOWANCE}"))
            });
            let packing = policy.shrink_max_tokens(policy.max_tokens().saturating_sub(heading_tokens));

            let slices = pack_units(&units, joiner, &packing);
            let parts = slices.len();
            for (i, slice) in slices.into_iter().enumerate() {
                let heading = section.heading.as_ref().map(|heading| {
                    if parts > 1 {
                        format!("{heading} (part {}/{parts})", i + 1)
                    } else {
                        heading.clone()
                    }
                });
                chunks.push(
                    Chunk::new(slice, chunks.len())
                        .with_heading(heading, section.heading_path.clone())
                        .with_labels(labels.clone()),
                );
            }
        }

        chunks
    }
}

/// Derive the unit list and joiner for a section body.
fn section_units(body: &str) -> (Vec<String>, &'static str) {
    let bullet_lines = body
        .lines()
        .filter(|line| LIST_MARKER_RE.is_match(line))
        .count();
    if bullet_lines >= LIST_THRESHOLD {
        return (split_list_items(body), "\n");
    }

    let paragraphs = split_paragraphs(body);
    if paragraphs.len() > 1 {
        (paragraphs, "\n\n")
    } else {
        (vec![body.to_string()], "\n\n")
    }
}
