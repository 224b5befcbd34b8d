//! Tabular result of a structured query

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Rows returned by the structured store, keyed by column name.
///
/// Row order is whatever the store produced. An empty result is a
/// legitimate outcome and is rendered as `[]` for prompts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Map<String, Value>>,
}

impl QueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Map<String, Value>>) -> Self {
        Self { columns, rows }
    }

    /// The "no structured data" value.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// JSON array of the first `max_rows` rows, for prompt injection.
    pub fn to_prompt_json(&self, max_rows: usize) -> String {
        let rows: Vec<&Map<String, Value>> = self.rows.iter().take(max_rows).collect();
        serde_json::to_string(&rows).unwrap_or_else(|_| "[]".to_string())
    }

    /// A single scalar when the result is exactly one row with one column.
    pub fn scalar(&self) -> Option<&Value> {
        match self.rows.as_slice() {
            [row] if row.len() == 1 => row.values().next(),
            _ => None,
        }
    }
}
