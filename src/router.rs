//! Document-type routing: the pipeline entry point.
//!
//! ```text
//! Document ──► route ──► chunker ──────────────► guardrail ──► Chunk[]
//!              │
//!              ├─ helper doc_type ──► HeadingBlockChunker
//!              ├─ record JSON path ─► RecordChunker
//!              └─ everything else ──► GenericChunker
//! ```
//!
//! Route selection inspects only `doc.doc_type` and `doc.path`. The
//! guardrail runs last in every case — no route returns unchecked
//! chunks to the caller.

use tracing::debug;

use crate::bounds::BoundPolicy;
use crate::chunk::Chunk;
use crate::document::Document;
use crate::generic::GenericChunker;
use crate::guardrail::enforce_bounds;
use crate::heading_block::HeadingBlockChunker;
use crate::records::RecordChunker;
use crate::Chunker;

/// Chunk one document into bounded, densely indexed chunks.
///
/// This is the crate's single entry point for callers: route, chunk,
/// then enforce bounds. Stateless across calls; processing many
/// documents is safely parallel at the caller's discretion.
///
/// # Examples
///
/// ```rust
/// use quarry::{chunk_document, BoundPolicy, DocType, Document};
///
/// let doc = Document::new("notes/intro.md", "notes", DocType::Generic);
/// let chunks = chunk_document(&doc, "Short paragraph only.", &BoundPolicy::default());
///
/// assert_eq!(chunks.len(), 1);
/// assert_eq!(chunks[0].text, "Short paragraph only.");
/// assert_eq!(chunks[0].chunk_index, 0);
/// ```
#[must_use]
pub fn chunk_document(doc: &Document, raw_text: &str, policy: &BoundPolicy) -> Vec<Chunk> {
    let chunks = if doc.doc_type.is_helper() {
        debug!(path = %doc.path, "routing to heading-block chunker");
        HeadingBlockChunker.chunk(doc, raw_text, policy)
    } else if let Some(records) = RecordChunker::for_path(&doc.path) {
        debug!(path = %doc.path, "routing to structured-record chunker");
        records.chunk(doc, raw_text, policy)
    } else {
        debug!(path = %doc.path, "routing to generic section chunker");
        GenericChunker.chunk(doc, raw_text, policy)
    };

    enforce_bounds(chunks, policy)
}
