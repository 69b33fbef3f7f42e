//! Document inputs and the type tags that drive routing.

use serde::{Deserialize, Serialize};

/// The declared type of a reference document.
///
/// Four "helper" types get heading-block chunking — they are dense
/// reference material where each heading introduces a self-contained
/// block (an index entry, a platform guide section, a model spec).
/// Every other tag deserializes to [`DocType::Generic`] and takes the
/// default section-based route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocType {
    /// Index of creative disciplines.
    DisciplineIndex,
    /// Per-platform usage guide.
    PlatformGuide,
    /// Index of base models.
    BaseModelIndex,
    /// Long-form prose spec for one model.
    ModelSpecText,
    /// Everything else: markdown-like narrative content.
    #[default]
    #[serde(other)]
    Generic,
}

impl DocType {
    /// Whether this type takes the heading-block route.
    #[must_use]
    pub const fn is_helper(self) -> bool {
        !matches!(self, Self::Generic)
    }

    /// Label namespace for headings of this type, e.g. `platform:` for
    /// platform guides. `None` for the generic route.
    #[must_use]
    pub const fn label_prefix(self) -> Option<&'static str> {
        match self {
            Self::DisciplineIndex => Some("discipline"),
            Self::PlatformGuide => Some("platform"),
            Self::BaseModelIndex | Self::ModelSpecText => Some("model"),
            Self::Generic => None,
        }
    }
}

/// One reference document as handed to the pipeline by the registry.
///
/// The registry (an external collaborator) resolves the manifest, loads
/// the raw text, and filters by inclusion flags before calling in. Only
/// `doc_type` and `path` affect chunking; the remaining fields ride
/// along for the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Source path, relative to the content root.
    pub path: String,
    /// Registry category (e.g. `guides`, `data`).
    pub category: String,
    /// Type tag driving route selection.
    pub doc_type: DocType,
    /// Registry lifecycle state. Not consulted here.
    #[serde(default)]
    pub status: String,
    /// Embedding mode requested by the registry. Not consulted here.
    #[serde(default)]
    pub embed_mode: String,
    /// Whether the document carries pricing content. Not consulted here.
    #[serde(default)]
    pub pricing_sensitive: bool,
}

impl Document {
    /// Create a document with empty registry metadata.
    #[must_use]
    pub fn new(path: impl Into<String>, category: impl Into<String>, doc_type: DocType) -> Self {
        Self {
            path: path.into(),
            category: category.into(),
            doc_type,
            status: String::new(),
            embed_mode: String::new(),
            pricing_sensitive: false,
        }
    }
}
