//! Retrieved document value objects

use crate::core::string::split_list_field;
use serde::{Deserialize, Serialize};

/// Which index a document came from.
///
/// Scores are only meaningful within one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceSource {
    /// Dense embedding lookup (cosine similarity)
    Vector,
    /// Full-text lookup (BM25 score)
    Keyword,
}

impl EvidenceSource {
    pub fn as_str(&self) -> &str {
        match self {
            EvidenceSource::Vector => "vector",
            EvidenceSource::Keyword => "keyword",
        }
    }
}

impl std::fmt::Display for EvidenceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata subset carried with each chunk.
///
/// List-valued fields keep the ingestion delimiter; use
/// [`DocumentMetadata::statute_list`] to split them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statutes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

impl DocumentMetadata {
    pub fn statute_list(&self) -> Vec<&str> {
        self.statutes.as_deref().map(split_list_field).unwrap_or_default()
    }

    pub fn court_list(&self) -> Vec<&str> {
        self.court.as_deref().map(split_list_field).unwrap_or_default()
    }
}

/// One chunk returned by a retrieval source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub id: String,
    pub source: EvidenceSource,
    /// Source-native score, never compared across sources
    pub score: f64,
    pub text: String,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

impl RetrievedDocument {
    pub fn new(
        id: impl Into<String>,
        source: EvidenceSource,
        score: f64,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source,
            score,
            text: text.into(),
            metadata: DocumentMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: DocumentMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&EvidenceSource::Keyword).unwrap(),
            "\"keyword\""
        );
    }

    #[test]
    fn test_statute_list_splits_delimiter() {
        let metadata = DocumentMetadata {
            statutes: Some("Section 109 ||| Article 21".to_string()),
            ..Default::default()
        };
        assert_eq!(metadata.statute_list(), vec!["Section 109", "Article 21"]);
        assert!(DocumentMetadata::default().statute_list().is_empty());
    }

    #[test]
    fn test_document_builder() {
        let doc = RetrievedDocument::new("c1_0", EvidenceSource::Vector, 0.82, "text").with_metadata(
            DocumentMetadata {
                case_id: Some("c1".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(doc.metadata.case_id.as_deref(), Some("c1"));
        assert_eq!(doc.source, EvidenceSource::Vector);
    }
}
