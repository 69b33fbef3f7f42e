//! Generic section chunking: the default route.
//!
//! Markdown-like narrative content takes this path. Per section, the
//! body splits into blank-line paragraphs; any paragraph over the
//! ceiling expands through the oversize cascade first; the resulting
//! unit stream packs greedily with a blank-line joiner. The running
//! size accumulates across paragraph boundaries within the whole
//! section, so runs of short paragraphs combine instead of each
//! becoming a fragment chunk.

use crate::bounds::BoundPolicy;
use crate::chunk::Chunk;
use crate::document::Document;
use crate::labels::section_labels;
use crate::pack::pack_units;
use crate::section::parse_sections;
use crate::split::{split_paragraphs, split_to_fit};
use crate::Chunker;

/// Section-based chunker for markdown-like documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericChunker;

impl Chunker for GenericChunker {
    fn chunk(&self, _doc: &Document, text: &str, policy: &BoundPolicy) -> Vec<Chunk> {
        let mut chunks = Vec::with_capacity(self.estimate_chunks(text.len(), policy));

        for section in parse_sections(text) {
            let body = section.body();
            if body.is_empty() {
                continue;
            }

            let labels = section_labels(
                section.heading.as_deref(),
                section.heading_path.as_deref(),
                None,
            );

            let mut units = Vec::new();
            for paragraph in split_paragraphs(&body) {
                if policy.fits(&paragraph) {
                    units.push(paragraph);
                } else {
                    units.extend(split_to_fit(&paragraph, policy));
                }
            }

            for slice in pack_units(&units, "\n\n", policy) {
                chunks.push(
                    Chunk::new(slice, chunks.len())
                        .with_heading(section.heading.clone(), section.heading_path.clone())
                        .with_labels(labels.clone()),
                );
            }
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocType;

    fn doc() -> Document {
        Document::new("notes/field-notes.md", "notes", DocType::Generic)
    }

    fn tight() -> BoundPolicy {
        BoundPolicy::default()
            .with_max_tokens(50)
            .unwrap()
            .with_max_chars(400)
            .unwrap()
            .with_target_tokens(30)
            .unwrap()
    }

    #[test]
    fn test_short_document_single_chunk() {
        let chunks = GenericChunker.chunk(&doc(), "Short paragraph only.", &BoundPolicy::default());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Short paragraph only.");
        assert_eq!(chunks[0].heading, None);
    }

    #[test]
    fn test_small_paragraphs_combine_across_boundaries() {
        let policy = tight();
        let text = (0..6)
            .map(|i| format!("Tiny paragraph {i}."))
            .collect::<Vec<_>>()
            .join("\n\n");
        let chunks = GenericChunker.chunk(&doc(), &text, &policy);

        // 6 × ~17-char paragraphs at a 120-char target: far fewer than 6 chunks
        assert!(chunks.len() < 6);
        assert!(chunks[0].text.contains("Tiny paragraph 0."));
        assert!(chunks[0].text.contains("Tiny paragraph 1."));
    }

    #[test]
    fn test_oversize_paragraph_expanded_through_cascade() {
        let policy = tight();
        let sentences = "A sentence about framing and light. ".repeat(20);
        let chunks = GenericChunker.chunk(&doc(), &sentences, &policy);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| policy.fits(&c.text)));
    }

    #[test]
    fn test_heading_context_carried() {
        let text = "# Guide\n\n## Night\nShoot in the dark.\n\n## Day\nShoot in the light.";
        let chunks = GenericChunker.chunk(&doc(), text, &BoundPolicy::default());

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].heading.as_deref(), Some("Night"));
        assert_eq!(chunks[0].heading_path.as_deref(), Some("Guide > Night"));
        assert!(chunks[0].section_labels.contains(&"night".to_string()));
        assert!(chunks[0].section_labels.contains(&"guide".to_string()));
        assert_eq!(chunks[1].heading.as_deref(), Some("Day"));
    }

    #[test]
    fn test_whitespace_only_document() {
        let chunks = GenericChunker.chunk(&doc(), "  \n\n \t ", &BoundPolicy::default());
        assert!(chunks.is_empty());
    }
}
