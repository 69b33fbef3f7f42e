//! # quarry
//!
//! Bounded text chunking for embedding pipelines.
//!
//! ## The Problem
//!
//! A vector index wants every fragment it embeds to fit two independent
//! ceilings — an estimated-token ceiling (the embedding model's window)
//! and a raw-character ceiling (payload and storage caps). Reference
//! content does not arrive pre-sized: it is long-form narrative,
//! heading-structured guides, and JSON record arrays, and a naive
//! every-N-characters split severs sentences, bullet lists, and records
//! mid-thought.
//!
//! This crate turns one document into a sequence of chunks that:
//!
//! - respect both ceilings, unconditionally
//! - keep semantic locality (a chunk doesn't arbitrarily sever a
//!   sentence, list, or record)
//! - carry heading breadcrumbs and slug labels for citation and
//!   retrieval filtering
//! - are densely indexed `0..n`, deterministically
//!
//! ## The Pipeline
//!
//! ```text
//! Document ──► router ──► one of three chunkers ──► guardrail ──► Chunk[]
//!
//! heading-block   helper reference docs: one heading = one block,
//!                 oversize blocks packed into "(part i/N)" slices
//! records         JSON record arrays: one valid record = one chunk
//! generic         everything else: sections → paragraphs → packing
//! ```
//!
//! Whatever route a document takes, the **guardrail** pass re-validates
//! every chunk against the bound policy and re-splits offenders, so the
//! bound invariant holds even when an upstream heuristic has a latent
//! bug. Upstream chunk indices are provisional; the guardrail assigns
//! the final dense sequence.
//!
//! ## Packing Policy
//!
//! Chunks are packed greedily with an **early flush at the target
//! size**, not filled to the ceiling. Given the default policy (target
//! 1000 tokens, max 1600), a chunk flushes as soon as it crosses 1000 —
//! trading a few extra chunks for sizes that cluster around one value,
//! which retrieval prefers. See [`BoundPolicy`] for the knobs.
//!
//! ## Oversize Handling
//!
//! Units that exceed the ceiling on their own fall through a cascade of
//! progressively finer strategies — blank-line paragraphs, list items,
//! lines, sentence boundaries (UAX #29) — and, when no boundary exists
//! at all, a whitespace-aware hard character slice. Coarser strategies
//! are never retried on finer pieces. See [`split_to_fit`].
//!
//! ## Quick Start
//!
//! ```rust
//! use quarry::{chunk_document, BoundPolicy, DocType, Document};
//!
//! let doc = Document::new("guides/night-shooting.md", "guides", DocType::Generic);
//! let text = "## Tripods\nA stable base beats a steady hand.\n\n## Exposure\nStart at 20 seconds.";
//!
//! let chunks = chunk_document(&doc, text, &BoundPolicy::default());
//!
//! assert_eq!(chunks.len(), 2);
//! assert_eq!(chunks[0].heading.as_deref(), Some("Tripods"));
//! assert_eq!(chunks[1].chunk_index, 1);
//! ```
//!
//! ## Scope
//!
//! The crate is purely computational: no I/O, no model calls, no state
//! across invocations. Discovery of documents, persistence of chunks,
//! and the embedding calls themselves belong to the caller. Processing
//! many documents is embarrassingly parallel — every call is
//! independent and [`Chunker`] implementations are `Send + Sync`.

mod bounds;
mod chunk;
mod document;
mod generic;
mod guardrail;
mod heading_block;
mod labels;
mod pack;
mod records;
mod router;
mod section;
mod split;

pub use bounds::{BoundError, BoundPolicy};
pub use chunk::Chunk;
pub use document::{DocType, Document};
pub use generic::GenericChunker;
pub use guardrail::enforce_bounds;
pub use heading_block::HeadingBlockChunker;
pub use labels::{section_labels, slugify};
pub use pack::pack_units;
pub use records::{AchievementRecord, ModelSpecRecord, RecordChunker, RecordKind};
pub use router::chunk_document;
pub use section::{parse_sections, Section};
pub use split::{hard_slice, split_to_fit};

/// A document chunking strategy.
///
/// The three per-type chunkers implement this trait, so callers (and
/// the diagnostic tooling) can drive any strategy directly and
/// [`chunk_document`] can stay a thin dispatcher:
///
/// ```rust
/// use quarry::{BoundPolicy, Chunk, Chunker, DocType, Document, GenericChunker};
///
/// fn run(chunker: &dyn Chunker, doc: &Document, text: &str) -> Vec<Chunk> {
///     chunker.chunk(doc, text, &BoundPolicy::default())
/// }
///
/// let doc = Document::new("notes.md", "notes", DocType::Generic);
/// let chunks = run(&GenericChunker, &doc, "Some prose.");
/// assert_eq!(chunks.len(), 1);
/// ```
///
/// Implementations return chunks with *provisional* indices; run
/// [`enforce_bounds`] over the result before handing it downstream.
pub trait Chunker: Send + Sync {
    /// Split one document's text into chunks.
    fn chunk(&self, doc: &Document, text: &str, policy: &BoundPolicy) -> Vec<Chunk>;

    /// Estimate the chunk count for a text of `text_len` bytes.
    ///
    /// Useful for pre-allocation. May be approximate.
    fn estimate_chunks(&self, text_len: usize, policy: &BoundPolicy) -> usize {
        let per_chunk = policy.target_tokens() * policy.chars_per_token();
        (text_len / per_chunk.max(1)).max(1)
    }
}
