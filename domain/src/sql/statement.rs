//! SQL statement value objects
//!
//! A [`GeneratedSql`] is whatever the model produced for one attempt.
//! An [`AcceptedSql`] can only be obtained from
//! [`SqlValidator::accept`](super::validator::SqlValidator::accept), so
//! holding one is proof the text passed the safety gate.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:sql|SQL)?\s*(.*?)```").expect("fenced block pattern is valid")
});

/// A candidate SQL string produced by the generator for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSql {
    sql: String,
    attempt: usize,
}

impl GeneratedSql {
    pub fn new(sql: impl Into<String>, attempt: usize) -> Self {
        Self {
            sql: sql.into(),
            attempt,
        }
    }

    /// Build a candidate from a raw model response.
    ///
    /// Strips code fences and trailing semicolons.
    pub fn from_response(raw: &str, attempt: usize) -> Self {
        Self::new(extract_sql(raw), attempt)
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// 1-indexed attempt that produced this candidate.
    pub fn attempt(&self) -> usize {
        self.attempt
    }
}

/// SQL text that passed the safety validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedSql {
    sql: String,
    attempt: usize,
}

impl AcceptedSql {
    pub(crate) fn new(candidate: GeneratedSql) -> Self {
        Self {
            sql: candidate.sql,
            attempt: candidate.attempt,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn attempt(&self) -> usize {
        self.attempt
    }
}

impl std::fmt::Display for AcceptedSql {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sql)
    }
}

/// Extract the SQL statement from a model response.
pub fn extract_sql(raw: &str) -> String {
    let trimmed = raw.trim();
    let body = match FENCED_BLOCK.captures(trimmed) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        // Unterminated fence: drop the opening marker only
        None => trimmed
            .strip_prefix("```sql")
            .or_else(|| trimmed.strip_prefix("```SQL"))
            .or_else(|| trimmed.strip_prefix("```"))
            .unwrap_or(trimmed),
    };
    strip_trailing_semicolons(body).to_string()
}

fn strip_trailing_semicolons(sql: &str) -> &str {
    let mut candidate = sql.trim();
    while let Some(stripped) = candidate.strip_suffix(';') {
        candidate = stripped.trim_end();
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_response() {
        assert_eq!(
            extract_sql("  SELECT year FROM chunks;  "),
            "SELECT year FROM chunks"
        );
    }

    #[test]
    fn test_fenced_response() {
        let raw = "Here you go:\n```sql\nSELECT COUNT(*) FROM chunks;\n```\nDone.";
        assert_eq!(extract_sql(raw), "SELECT COUNT(*) FROM chunks");
    }

    #[test]
    fn test_bare_fence() {
        assert_eq!(
            extract_sql("```\nSELECT text FROM chunks\n```"),
            "SELECT text FROM chunks"
        );
    }

    #[test]
    fn test_unterminated_fence() {
        assert_eq!(
            extract_sql("```sql\nSELECT text FROM chunks;;"),
            "SELECT text FROM chunks"
        );
    }

    #[test]
    fn test_inner_semicolon_is_kept() {
        // Only trailing semicolons are stripped; the validator rejects the rest.
        assert_eq!(
            extract_sql("SELECT * FROM chunks; DROP TABLE chunks;"),
            "SELECT * FROM chunks; DROP TABLE chunks"
        );
    }

    #[test]
    fn test_attempt_is_carried() {
        let candidate = GeneratedSql::from_response("SELECT 1", 2);
        assert_eq!(candidate.attempt(), 2);
        assert_eq!(candidate.sql(), "SELECT 1");
    }
}
