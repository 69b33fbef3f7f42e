//! Structured-record chunking for JSON data files.
//!
//! Two known record arrays ride the content tree as JSON rather than
//! prose: base-model specification records and achievement records.
//! Each valid record becomes exactly one chunk (records are never
//! packed together — a record is the citation unit), synthesized by
//! rendering its fields into a small text block.
//!
//! Validation is field-by-field against the expected shape. A record
//! that fails validation is dropped silently; a body that is not
//! parseable JSON (or not an array) logs a warning with the document
//! path and yields zero records. Neither case is fatal — the document
//! is simply treated as having no embeddable content.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::bounds::BoundPolicy;
use crate::chunk::Chunk;
use crate::document::Document;
use crate::labels::slugify;
use crate::Chunker;

/// Which record shape a JSON data file is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Base-model specification records.
    ModelSpecs,
    /// Achievement records.
    Achievements,
}

impl RecordKind {
    /// Detect a record file from its path. `None` means the path does
    /// not name a known record array and should take the generic route.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let file = path.rsplit(['/', '\\']).next().unwrap_or(path).to_ascii_lowercase();
        if !file.ends_with(".json") {
            return None;
        }
        if file.contains("achievement") {
            Some(Self::Achievements)
        } else if file.contains("model") {
            Some(Self::ModelSpecs)
        } else {
            None
        }
    }
}

/// One base-model specification record.
///
/// `name` is required; a record missing it (or carrying it as a
/// non-string) is malformed and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSpecRecord {
    /// Model display name.
    pub name: String,
    /// Platform the model ships on.
    #[serde(default)]
    pub platform: Option<String>,
    /// One-line summary.
    #[serde(default)]
    pub summary: Option<String>,
    /// Pre-written long-form spec text, when the catalog has one.
    #[serde(default)]
    pub spec_text: Option<String>,
}

impl ModelSpecRecord {
    fn from_value(value: &Value) -> Option<(Self, &Map<String, Value>)> {
        let obj = value.as_object()?;
        let record = Self {
            name: string_field(obj, "name")?,
            platform: string_field(obj, "platform"),
            summary: string_field(obj, "summary"),
            spec_text: string_field(obj, "specText"),
        };
        Some((record, obj))
    }

    fn render(&self, raw: &Map<String, Value>) -> String {
        let mut text = match &self.platform {
            Some(platform) => format!("{} — {platform} base model", self.name),
            None => self.name.clone(),
        };
        if let Some(summary) = &self.summary {
            text.push_str("\n\n");
            text.push_str(summary);
        }
        if let Some(spec) = &self.spec_text {
            text.push_str("\n\n");
            text.push_str(spec);
        } else {
            text.push_str("\n\n");
            text.push_str(&field_list(raw));
        }
        text
    }

    fn labels(&self) -> Vec<String> {
        let mut labels = vec![format!("model:{}", slugify(&self.name))];
        if let Some(platform) = &self.platform {
            let slug = slugify(platform);
            if !slug.is_empty() {
                labels.push(format!("platform:{slug}"));
            }
        }
        labels
    }
}

/// One achievement record.
///
/// `name` and `description` are required; anything else is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementRecord {
    /// Achievement display name.
    pub name: String,
    /// What the achievement rewards.
    pub description: String,
    /// Discipline the achievement belongs to.
    #[serde(default)]
    pub discipline: Option<String>,
    /// How the achievement is earned.
    #[serde(default)]
    pub criteria: Option<String>,
}

impl AchievementRecord {
    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            name: string_field(obj, "name")?,
            description: string_field(obj, "description")?,
            discipline: string_field(obj, "discipline"),
            criteria: string_field(obj, "criteria"),
        })
    }

    fn render(&self) -> String {
        let mut text = match &self.discipline {
            Some(discipline) => format!("{} — {discipline} achievement", self.name),
            None => self.name.clone(),
        };
        text.push_str("\n\n");
        text.push_str(&self.description);
        if let Some(criteria) = &self.criteria {
            text.push_str("\n\nEarned by: ");
            text.push_str(criteria);
        }
        text
    }

    fn labels(&self) -> Vec<String> {
        let mut labels = vec![format!("achievement:{}", slugify(&self.name))];
        if let Some(discipline) = &self.discipline {
            let slug = slugify(discipline);
            if !slug.is_empty() {
                labels.push(format!("discipline:{slug}"));
            }
        }
        labels
    }
}

/// One-chunk-per-record chunker for the JSON data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordChunker {
    kind: RecordKind,
}

impl RecordChunker {
    /// Chunker for a known record kind.
    #[must_use]
    pub const fn new(kind: RecordKind) -> Self {
        Self { kind }
    }

    /// Chunker for a path, when the path names a known record array.
    #[must_use]
    pub fn for_path(path: &str) -> Option<Self> {
        RecordKind::from_path(path).map(Self::new)
    }
}

impl Chunker for RecordChunker {
    fn chunk(&self, doc: &Document, text: &str, _policy: &BoundPolicy) -> Vec<Chunk> {
        let entries = match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => {
                warn!(path = %doc.path, "record body is not a JSON array, skipping");
                return Vec::new();
            }
            Err(error) => {
                warn!(path = %doc.path, %error, "unparseable record body, skipping");
                return Vec::new();
            }
        };

        entries
            .iter()
            .filter_map(|entry| match self.kind {
                RecordKind::ModelSpecs => ModelSpecRecord::from_value(entry)
                    .map(|(record, raw)| (record.render(raw), record.name.clone(), record.labels())),
                RecordKind::Achievements => AchievementRecord::from_value(entry)
                    .map(|record| (record.render(), record.name.clone(), record.labels())),
            })
            .enumerate()
            .map(|(index, (text, heading, labels))| {
                Chunk::new(text, index)
                    .with_heading(Some(heading), None)
                    .with_labels(labels)
            })
            .collect()
    }
}

/// Non-empty trimmed string field, or `None` when the key is absent,
/// non-string, or blank. Callers decide whether `None` invalidates the
/// record.
fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Fallback summary when a record has no pre-written spec text: list
/// the scalar fields one per line.
fn field_list(obj: &Map<String, Value>) -> String {
    obj.iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) if !s.trim().is_empty() => Some(format!("{key}: {}", s.trim())),
            Value::Number(n) => Some(format!("{key}: {n}")),
            Value::Bool(b) => Some(format!("{key}: {b}")),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocType;

    fn doc(path: &str) -> Document {
        Document::new(path, "data", DocType::Generic)
    }

    #[test]
    fn test_kind_from_path() {
        assert_eq!(
            RecordKind::from_path("data/base-models.json"),
            Some(RecordKind::ModelSpecs)
        );
        assert_eq!(
            RecordKind::from_path("data/achievements.json"),
            Some(RecordKind::Achievements)
        );
        assert_eq!(RecordKind::from_path("data/base-models.md"), None);
        assert_eq!(RecordKind::from_path("guides/exposure.json"), None);
        // Directory names don't count, only the file name
        assert_eq!(RecordKind::from_path("models/readme.json"), None);
    }

    #[test]
    fn test_one_chunk_per_valid_record() {
        let body = r#"[
            {"name": "Auric S1", "platform": "Luminar", "summary": "Entry model.",
             "specText": "Full spec prose for the Auric S1."},
            {"name": "Auric S2", "platform": "Luminar", "summary": "Step-up model.",
             "specText": "Full spec prose for the Auric S2."}
        ]"#;
        let chunker = RecordChunker::new(RecordKind::ModelSpecs);
        let chunks = chunker.chunk(&doc("data/models.json"), body, &BoundPolicy::default());

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].heading.as_deref(), Some("Auric S1"));
        assert!(chunks[0].text.contains("Luminar base model"));
        assert!(chunks[0].text.contains("Full spec prose for the Auric S1."));
        assert_eq!(
            chunks[0].section_labels,
            vec!["model:auric-s1".to_string(), "platform:luminar".to_string()]
        );
    }

    #[test]
    fn test_malformed_entry_dropped_silently() {
        let body = r#"[
            {"name": 42, "platform": [], "description": null},
            {"name": "Kestrel", "platform": "Veltrix", "specText": "Spec."}
        ]"#;
        let chunker = RecordChunker::new(RecordKind::ModelSpecs);
        let chunks = chunker.chunk(&doc("data/models.json"), body, &BoundPolicy::default());

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].heading.as_deref(), Some("Kestrel"));
    }

    #[test]
    fn test_field_list_fallback_without_spec_text() {
        let body = r#"[{"name": "Pelican", "platform": "Veltrix",
                        "sensor": "full-frame", "year": 2024, "discontinued": false}]"#;
        let chunker = RecordChunker::new(RecordKind::ModelSpecs);
        let chunks = chunker.chunk(&doc("data/models.json"), body, &BoundPolicy::default());

        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].text.contains("sensor: full-frame"));
        assert!(chunks[0].text.contains("year: 2024"));
        assert!(chunks[0].text.contains("discontinued: false"));
    }

    #[test]
    fn test_achievement_rendering() {
        let body = r#"[{"name": "First Light", "discipline": "Astro",
                        "description": "Capture your first night sky.",
                        "criteria": "Submit one astro shot."}]"#;
        let chunker = RecordChunker::new(RecordKind::Achievements);
        let chunks = chunker.chunk(&doc("data/achievements.json"), body, &BoundPolicy::default());

        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].text.starts_with("First Light — Astro achievement"));
        assert!(chunks[0].text.contains("Earned by: Submit one astro shot."));
        assert_eq!(
            chunks[0].section_labels,
            vec![
                "achievement:first-light".to_string(),
                "discipline:astro".to_string()
            ]
        );
    }

    #[test]
    fn test_achievement_requires_description() {
        let body = r#"[{"name": "No Description"}]"#;
        let chunker = RecordChunker::new(RecordKind::Achievements);
        let chunks = chunker.chunk(&doc("data/achievements.json"), body, &BoundPolicy::default());
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_unparseable_body_yields_zero_chunks() {
        let chunker = RecordChunker::new(RecordKind::ModelSpecs);
        let chunks = chunker.chunk(&doc("data/models.json"), "{not json", &BoundPolicy::default());
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_non_array_body_yields_zero_chunks() {
        let chunker = RecordChunker::new(RecordKind::ModelSpecs);
        let chunks = chunker.chunk(
            &doc("data/models.json"),
            r#"{"name": "solo"}"#,
            &BoundPolicy::default(),
        );
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_empty_array_yields_zero_chunks() {
        let chunker = RecordChunker::new(RecordKind::ModelSpecs);
        let chunks = chunker.chunk(&doc("data/models.json"), "[]", &BoundPolicy::default());
        assert!(chunks.is_empty());
    }
}
