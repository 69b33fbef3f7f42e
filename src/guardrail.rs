//! The guardrail pass: unconditional bound enforcement.
//!
//! Every chunker in this crate tries to respect the bound policy, but
//! correctness does not rest on any of them getting it right. This pass
//! re-runs the oversize cascade over every chunk a chunker produced —
//! including chunks that appear to fit — and re-indexes the flattened
//! result. It is the single source of truth for the bound invariant
//! and the last stage of [`chunk_document`](crate::chunk_document);
//! whatever an upstream heuristic missed, the output still satisfies
//! both ceilings.
//!
//! Re-splitting copies the source chunk's heading, path, and labels
//! onto every piece. Indices assigned upstream are discarded here and
//! reassigned densely from zero.

use crate::bounds::BoundPolicy;
use crate::chunk::Chunk;
use crate::split::split_to_fit;

/// Enforce the bound invariant over a chunk list.
///
/// Idempotent: running it twice returns an identical list.
#[must_use]
pub fn enforce_bounds(chunks: Vec<Chunk>, policy: &BoundPolicy) -> Vec<Chunk> {
    let mut enforced: Vec<Chunk> = Vec::with_capacity(chunks.len());

    for chunk in chunks {
        for piece in split_to_fit(&chunk.text, policy) {
            let mut bounded = chunk.clone();
            bounded.text = piece;
            enforced.push(bounded);
        }
    }

    for (index, chunk) in enforced.iter_mut().enumerate() {
        chunk.chunk_index = index;
    }

    enforced
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitting_chunks_pass_through() {
        let policy = BoundPolicy::default();
        let chunks = vec![Chunk::new("one", 7), Chunk::new("two", 3)];
        let enforced = enforce_bounds(chunks, &policy);

        assert_eq!(enforced.len(), 2);
        assert_eq!(enforced[0].text, "one");
        assert_eq!(enforced[1].text, "two");
    }

    #[test]
    fn test_indices_reassigned_densely() {
        let policy = BoundPolicy::default();
        let chunks = vec![Chunk::new("a", 9), Chunk::new("b", 9), Chunk::new("c", 0)];
        let enforced = enforce_bounds(chunks, &policy);

        let indices: Vec<usize> = enforced.iter().map(|c| c.chunk_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_oversize_chunk_resplit_with_metadata_copied() {
        let policy = BoundPolicy::default()
            .with_max_tokens(10)
            .unwrap()
            .with_max_chars(40)
            .unwrap();
        let oversize = Chunk::new("word ".repeat(40), 0)
            .with_heading(Some("H".into()), Some("Top > H".into()))
            .with_labels(vec!["h".into()]);
        let enforced = enforce_bounds(vec![oversize], &policy);

        assert!(enforced.len() > 1);
        for (i, chunk) in enforced.iter().enumerate() {
            assert_eq!(chunk.chunk_index, i);
            assert!(policy.fits(&chunk.text));
            assert_eq!(chunk.heading.as_deref(), Some("H"));
            assert_eq!(chunk.heading_path.as_deref(), Some("Top > H"));
            assert_eq!(chunk.section_labels, vec!["h".to_string()]);
        }
    }

    #[test]
    fn test_idempotent_on_bounded_list() {
        let policy = BoundPolicy::default()
            .with_max_tokens(10)
            .unwrap()
            .with_max_chars(40)
            .unwrap();
        let chunks = vec![
            Chunk::new("word ".repeat(40), 0).with_heading(Some("H".into()), None),
            Chunk::new("short tail", 1),
        ];
        let once = enforce_bounds(chunks, &policy);
        let twice = enforce_bounds(once.clone(), &policy);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        assert!(enforce_bounds(Vec::new(), &BoundPolicy::default()).is_empty());
    }

    #[test]
    fn test_whitespace_chunk_dropped() {
        let policy = BoundPolicy::default();
        let chunks = vec![Chunk::new("   ", 0), Chunk::new("real", 1)];
        let enforced = enforce_bounds(chunks, &policy);

        assert_eq!(enforced.len(), 1);
        assert_eq!(enforced[0].text, "real");
        assert_eq!(enforced[0].chunk_index, 0);
    }
}
