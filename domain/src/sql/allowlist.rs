//! Table/column allowlist for generated SQL

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Name of the chunk table written by the ingestion step.
pub const CHUNKS_TABLE: &str = "chunks";

/// Columns of the chunk table.
pub const CHUNK_COLUMNS: [&str; 12] = [
    "chunk_id",
    "case_id",
    "case_number",
    "file_name",
    "year",
    "courts",
    "jurisdiction",
    "statutes",
    "reliefs",
    "outcomes",
    "legal_concepts",
    "text",
];

/// Keywords that may never appear in generated SQL, matched as whole words.
pub const FORBIDDEN_KEYWORDS: [&str; 16] = [
    "insert", "update", "delete", "drop", "create", "alter", "attach", "detach", "pragma",
    "replace", "vacuum", "merge", "exec", "begin", "commit", "rollback",
];

/// SQL words tolerated inside the projection list.
pub const PROJECTION_KEYWORDS: [&str; 13] = [
    "select", "from", "where", "group", "by", "order", "count", "distinct", "sum", "avg", "min",
    "max", "as",
];

/// The closed set of table and column names generated SQL may reference.
///
/// Names are stored lower-cased; every comparison against the allowlist
/// is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlAllowlist {
    table: String,
    columns: BTreeSet<String>,
}

impl SqlAllowlist {
    /// Build an allowlist for a single table.
    pub fn new<I, S>(table: impl Into<String>, columns: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let table = table.into().trim().to_lowercase();
        if !is_identifier(&table) {
            return Err(DomainError::InvalidAllowlist(format!(
                "table name '{}' is not a plain identifier",
                table
            )));
        }

        let columns: BTreeSet<String> = columns
            .into_iter()
            .map(|c| c.as_ref().trim().to_lowercase())
            .collect();
        if columns.is_empty() {
            return Err(DomainError::InvalidAllowlist(
                "at least one column is required".to_string(),
            ));
        }
        if let Some(bad) = columns.iter().find(|c| !is_identifier(c)) {
            return Err(DomainError::InvalidAllowlist(format!(
                "column name '{}' is not a plain identifier",
                bad
            )));
        }

        Ok(Self { table, columns })
    }

    /// Allowlist for the `chunks` table with a custom table name.
    pub fn chunks_table(table: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(table, CHUNK_COLUMNS)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// Case-insensitive column membership.
    pub fn allows_column(&self, name: &str) -> bool {
        self.columns.contains(&name.to_lowercase())
    }

    /// Columns joined with `", "`, sorted, for prompts.
    pub fn column_list(&self) -> String {
        self.columns().collect::<Vec<_>>().join(", ")
    }
}

impl Default for SqlAllowlist {
    fn default() -> Self {
        Self {
            table: CHUNKS_TABLE.to_string(),
            columns: CHUNK_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_chunks_table() {
        let allowlist = SqlAllowlist::default();
        assert_eq!(allowlist.table(), "chunks");
        assert_eq!(allowlist.columns().count(), 12);
        assert!(allowlist.allows_column("CASE_ID"));
        assert!(!allowlist.allows_column("password"));
    }

    #[test]
    fn test_column_list_is_sorted() {
        let allowlist = SqlAllowlist::new("t", ["b", "a"]).unwrap();
        assert_eq!(allowlist.column_list(), "a, b");
    }

    #[test]
    fn test_rejects_non_identifier_names() {
        assert!(SqlAllowlist::new("chunks; drop", ["a"]).is_err());
        assert!(SqlAllowlist::new("chunks", ["a b"]).is_err());
        assert!(SqlAllowlist::new("chunks", Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_names_are_normalised() {
        let allowlist = SqlAllowlist::new(" Chunks ", ["Year"]).unwrap();
        assert_eq!(allowlist.table(), "chunks");
        assert!(allowlist.allows_column("year"));
    }
}
