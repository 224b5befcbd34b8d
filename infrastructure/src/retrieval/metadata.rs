//! Chunk metadata as stored by the ingestion step

use jurisrag_domain::{DocumentMetadata, LIST_DELIMITER};
use serde_json::{Map, Value};

/// A scalar or list field as a single string; empty values become `None`.
fn field(map: &Map<String, Value>, key: &str) -> Option<String> {
    let value = match map.get(key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(LIST_DELIMITER),
        Value::Null => return None,
        other => other.to_string(),
    };
    (!value.is_empty()).then_some(value)
}

pub(super) fn document_metadata(map: &Map<String, Value>) -> DocumentMetadata {
    DocumentMetadata {
        case_id: field(map, "case_id"),
        chunk_id: field(map, "chunk_id"),
        court: field(map, "court").or_else(|| field(map, "courts")),
        jurisdiction: field(map, "jurisdiction"),
        statutes: field(map, "statutes"),
        outcome: field(map, "outcome").or_else(|| field(map, "outcomes")),
    }
}

pub(super) fn text(map: &Map<String, Value>) -> String {
    map.get("text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
