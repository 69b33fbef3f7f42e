//! Heading-driven section parsing.
//!
//! ## The Heading Stack
//!
//! Documents are outlines. A level-3 heading under a level-2 heading
//! belongs to it; the next level-2 heading closes both. The parser
//! tracks this with a flat stack of `(level, text)` pairs instead of
//! building a tree:
//!
//! ```text
//! ## Platforms          stack: [(2, "Platforms")]
//! ### Luminar           stack: [(2, "Platforms"), (3, "Luminar")]
//! ### Veltrix           stack: [(2, "Platforms"), (3, "Veltrix")]
//!                              ↑ pushing level 3 popped the old level 3
//! ## Pricing            stack: [(2, "Pricing")]
//!                              ↑ pushing level 2 popped everything >= 2
//! ```
//!
//! The stack read top-to-bottom is the breadcrumb (`heading_path`) of
//! the section being opened. Nesting is purely heading-level driven;
//! indentation means nothing here.
//!
//! A heading is a trimmed line matching `#{1,6}` followed by whitespace
//! and text. No other markup is understood — lists, tables, and code
//! fences are ordinary content lines at this stage.

use std::sync::LazyLock;

use regex::Regex;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("heading pattern compiles"));

/// A contiguous run of lines under one innermost heading.
///
/// Transient: produced and consumed entirely within one chunking call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// The heading that opened this section. `None` for the synthetic
    /// pre-heading section.
    pub heading: Option<String>,
    /// Breadcrumb of ancestor headings joined with `" > "`, innermost
    /// last.
    pub heading_path: Option<String>,
    /// Content lines, verbatim (not trimmed).
    pub content: Vec<String>,
}

impl Section {
    /// The section body: content lines joined and trimmed.
    #[must_use]
    pub fn body(&self) -> String {
        self.content.join("\n").trim().to_string()
    }

    /// Whether the section holds any non-whitespace content.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content.iter().all(|line| line.trim().is_empty())
    }
}

/// Split raw text into ordered sections by heading markers.
///
/// The output always begins with one synthetic pre-heading section
/// (possibly empty) holding any content before the first heading.
#[must_use]
pub fn parse_sections(raw: &str) -> Vec<Section> {
    let mut sections = vec![Section {
        heading: None,
        heading_path: None,
        content: Vec::new(),
    }];
    let mut stack: Vec<(usize, String)> = Vec::new();

    for line in raw.lines() {
        if let Some(caps) = HEADING_RE.captures(line.trim()) {
            let level = caps[1].len();
            let text = caps[2].trim().to_string();

            // Siblings and deeper ancestors close when a heading at
            // their level or above arrives.
            while stack.last().is_some_and(|(l, _)| *l >= level) {
                stack.pop();
            }
            stack.push((level, text.clone()));

            let path = stack
                .iter()
                .map(|(_, t)| t.as_str())
                .collect::<Vec<_>>()
                .join(" > ");

            sections.push(Section {
                heading: Some(text),
                heading_path: Some(path),
                content: Vec::new(),
            });
        } else if let Some(current) = sections.last_mut() {
            current.content.push(line.to_string());
        }
    }

    sections
}
