//! Structured-query domain
//!
//! - [`allowlist`] - table and column names generated SQL may touch
//! - [`validator`] - the lexical safety gate
//! - [`statement`] - generated and accepted SQL
//! - [`result`] - rows returned by the store

pub mod allowlist;
pub mod result;
pub mod statement;
pub mod validator;

pub use allowlist::{CHUNK_COLUMNS, CHUNKS_TABLE, FORBIDDEN_KEYWORDS, SqlAllowlist};
pub use result::QueryResult;
pub use statement::{AcceptedSql, GeneratedSql, extract_sql};
pub use validator::{RejectionReason, SqlValidator, ValidationVerdict, validate};
