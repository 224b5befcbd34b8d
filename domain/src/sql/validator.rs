//! Lexical SQL safety gate
//!
//! A conservative allowlist filter, not a parser. Rules run in order and
//! stop at the first failure:
//!
//! 1. the statement starts with `select`
//! 2. no `;` anywhere
//! 3. no forbidden keyword as a whole word
//! 4. every `from` and `join` outside a string literal names the allowed
//!    table, and no `from` clause lists a second table after a comma
//! 5. every identifier in the projection list is a keyword or an allowed column
//!
//! It rejects some valid SQL (aliases, qualified names, sub-selects) and
//! never accepts a statement that breaks one of the rules.

use super::allowlist::{FORBIDDEN_KEYWORDS, PROJECTION_KEYWORDS, SqlAllowlist};
use super::statement::{AcceptedSql, GeneratedSql};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static FORBIDDEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b({})\b", FORBIDDEN_KEYWORDS.join("|")))
        .expect("forbidden keyword pattern is valid")
});

static TABLE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(from|join)\b").expect("table ref pattern is valid"));

static TABLE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([a-z_][a-z0-9_]*)\b").expect("table name pattern is valid")
});

static CLAUSE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(where|group|order|limit|having|join|union|intersect|except|on)\b|\)")
        .expect("clause end pattern is valid")
});

static STRING_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'(?:[^']|'')*'").expect("string literal pattern is valid"));

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9_]+").expect("word pattern is valid"));

/// Why a SQL candidate was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    /// Statement does not start with `select`
    NotSelect,
    /// A `;` appears somewhere in the text
    MultipleStatements,
    /// A forbidden keyword appears as a whole word
    ForbiddenKeyword { keyword: String },
    /// A `from` or `join` is missing its table or names another one
    WrongTable { found: Option<String> },
    /// The projection references something outside the allowlist
    DisallowedColumn { column: String },
}

impl RejectionReason {
    /// Stable short code, used in logs and the audit trail.
    pub fn code(&self) -> &'static str {
        match self {
            RejectionReason::NotSelect => "not-a-select",
            RejectionReason::MultipleStatements => "multiple-statements",
            RejectionReason::ForbiddenKeyword { .. } => "forbidden-keyword",
            RejectionReason::WrongTable { .. } => "wrong-table",
            RejectionReason::DisallowedColumn { .. } => "disallowed-column",
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::NotSelect => write!(f, "not-a-select"),
            RejectionReason::MultipleStatements => write!(f, "multiple-statements"),
            RejectionReason::ForbiddenKeyword { keyword } => {
                write!(f, "forbidden-keyword ({})", keyword)
            }
            RejectionReason::WrongTable { found: Some(table) } => {
                write!(f, "wrong-table ({})", table)
            }
            RejectionReason::WrongTable { found: None } => write!(f, "wrong-table (missing)"),
            RejectionReason::DisallowedColumn { column } => {
                write!(f, "disallowed-column ({})", column)
            }
        }
    }
}

/// Outcome of validating one SQL string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationVerdict {
    Accepted,
    Rejected(RejectionReason),
}

impl ValidationVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationVerdict::Accepted)
    }

    pub fn rejection(&self) -> Option<&RejectionReason> {
        match self {
            ValidationVerdict::Accepted => None,
            ValidationVerdict::Rejected(reason) => Some(reason),
        }
    }
}

/// Validate `sql` against the allowlist.
///
/// Pure function of its inputs.
pub fn validate(sql: &str, allowlist: &SqlAllowlist) -> ValidationVerdict {
    match check(sql, allowlist) {
        Ok(()) => ValidationVerdict::Accepted,
        Err(reason) => ValidationVerdict::Rejected(reason),
    }
}

fn check(sql: &str, allowlist: &SqlAllowlist) -> Result<(), RejectionReason> {
    let normalized = sql.trim().to_lowercase();

    if !normalized.starts_with("select") {
        return Err(RejectionReason::NotSelect);
    }

    if sql.contains(';') {
        return Err(RejectionReason::MultipleStatements);
    }

    if let Some(m) = FORBIDDEN.find(&normalized) {
        return Err(RejectionReason::ForbiddenKeyword {
            keyword: m.as_str().to_string(),
        });
    }

    // Literal text can look like a table reference
    let scrubbed = STRING_LITERAL.replace_all(&normalized, "''");

    let mut first_from = None;
    for keyword in TABLE_REF.find_iter(&scrubbed) {
        if keyword.as_str() == "from" && first_from.is_none() {
            first_from = Some(keyword.start());
        }
        check_table_ref(&scrubbed[keyword.end()..], allowlist)?;
    }
    let Some(from) = first_from else {
        return Err(RejectionReason::WrongTable { found: None });
    };

    let projection = &scrubbed["select".len()..from];
    for word in WORD.find_iter(projection).map(|m| m.as_str()) {
        let is_numeric = word.starts_with(|c: char| c.is_ascii_digit());
        if is_numeric || PROJECTION_KEYWORDS.contains(&word) || allowlist.allows_column(word) {
            continue;
        }
        return Err(RejectionReason::DisallowedColumn {
            column: word.to_string(),
        });
    }

    Ok(())
}

/// Check the text following one `from` or `join` keyword.
fn check_table_ref(rest: &str, allowlist: &SqlAllowlist) -> Result<(), RejectionReason> {
    let Some(name) = TABLE_NAME.captures(rest).and_then(|caps| caps.get(1)) else {
        // Sub-select or nothing at all
        return Err(RejectionReason::WrongTable { found: None });
    };
    if name.as_str() != allowlist.table() {
        return Err(RejectionReason::WrongTable {
            found: Some(name.as_str().to_string()),
        });
    }

    let clause = &rest[name.end()..];
    let clause = CLAUSE_END
        .find(clause)
        .map_or(clause, |end| &clause[..end.start()]);
    if let Some((_, after)) = clause.split_once(',') {
        let found = TABLE_NAME
            .captures(after)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());
        return Err(RejectionReason::WrongTable { found });
    }
    Ok(())
}

/// Validator bound to one allowlist.
#[derive(Debug, Clone, Default)]
pub struct SqlValidator {
    allowlist: SqlAllowlist,
}

impl SqlValidator {
    pub fn new(allowlist: SqlAllowlist) -> Self {
        Self { allowlist }
    }

    pub fn allowlist(&self) -> &SqlAllowlist {
        &self.allowlist
    }

    pub fn validate(&self, sql: &str) -> ValidationVerdict {
        validate(sql, &self.allowlist)
    }

    /// Promote a candidate to [`AcceptedSql`] if it passes every rule.
    pub fn accept(&self, candidate: GeneratedSql) -> Result<AcceptedSql, RejectionReason> {
        check(candidate.sql(), &self.allowlist)?;
        Ok(AcceptedSql::new(candidate))
    }
}
