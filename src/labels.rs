//! Slug derivation for section labels.
//!
//! Labels are the retrieval-filter vocabulary: lowercase slugs derived
//! from heading text and heading paths, optionally namespaced by the
//! document type (`platform:<slug>`, `model:<slug>`). The downstream
//! store matches them exactly, so derivation must be deterministic.

/// Lowercase a string into a hyphen-joined slug.
///
/// Alphanumeric runs survive; everything else collapses into a single
/// hyphen. Mirrors the slug form used for heading anchors.
///
/// ```rust
/// assert_eq!(quarry::slugify("Long Exposure (Tripod!)"), "long-exposure-tripod");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Derive the deduplicated label set for a section.
///
/// Sources, in order: the heading slug, a slug per heading-path
/// segment, and a `prefix:<heading-slug>` namespace label when the
/// document type provides one. Empty slugs and duplicates are dropped,
/// first occurrence wins.
#[must_use]
pub fn section_labels(
    heading: Option<&str>,
    heading_path: Option<&str>,
    prefix: Option<&str>,
) -> Vec<String> {
    let mut labels = Vec::new();

    if let Some(heading) = heading {
        push_unique(&mut labels, slugify(heading));
        if let Some(prefix) = prefix {
            let slug = slugify(heading);
            if !slug.is_empty() {
                push_unique(&mut labels, format!("{prefix}:{slug}"));
            }
        }
    }

    if let Some(path) = heading_path {
        for segment in path.split('>') {
            push_unique(&mut labels, slugify(segment));
        }
    }

    labels
}

fn push_unique(labels: &mut Vec<String>, label: String) {
    if !label.is_empty() && !labels.iter().any(|existing| *existing == label) {
        labels.push(label);
    }
}
