//! The Chunk type: a bounded text fragment with retrieval metadata.

use serde::{Deserialize, Serialize};

/// A bounded text fragment emitted for embedding.
///
/// Each chunk is a self-contained piece that a persistence collaborator
/// can embed, index, and retrieve independently. Alongside the text it
/// carries the citation context (heading and heading path) and the
/// label set used for retrieval filtering.
///
/// ## Invariants
///
/// After the full pipeline (any chunker followed by
/// [`enforce_bounds`](crate::enforce_bounds)):
///
/// - `text` is non-empty and trimmed
/// - `estimate_tokens(text) <= max_tokens` and `text.len() <= max_chars`
/// - `chunk_index` values are dense: exactly `0..n` in output order
///
/// Indices assigned by individual chunkers are provisional; the
/// guardrail pass discards and reassigns them after all splitting is
/// finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// The chunk text.
    pub text: String,
    /// Zero-based position of this chunk in the document's output.
    pub chunk_index: usize,
    /// Innermost heading above this chunk's source text, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    /// `>`-joined breadcrumb of ancestor headings, for citation display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_path: Option<String>,
    /// Deduplicated slug labels used for retrieval filtering.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub section_labels: Vec<String>,
    /// Taxonomy slot filled by the downstream metadata normalizer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_modes: Option<Vec<String>>,
    /// Taxonomy slot filled by the downstream metadata normalizer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archetype_bias: Option<Vec<String>>,
}

impl Chunk {
    /// Create a chunk with no heading context.
    #[must_use]
    pub fn new(text: impl Into<String>, chunk_index: usize) -> Self {
        Self {
            text: text.into(),
            chunk_index,
            heading: None,
            heading_path: None,
            section_labels: Vec::new(),
            primary_modes: None,
            archetype_bias: None,
        }
    }

    /// Attach heading context.
    #[must_use]
    pub fn with_heading(mut self, heading: Option<String>, heading_path: Option<String>) -> Self {
        self.heading = heading;
        self.heading_path = heading_path;
        self
    }

    /// Attach retrieval labels.
    #[must_use]
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.section_labels = labels;
        self
    }

    /// The length of this chunk's text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether this chunk's text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunk {{ index: {}, len: {}, heading: {:?} }}",
            self.chunk_index,
            self.len(),
            self.heading.as_deref().unwrap_or("-")
        )
    }
}
