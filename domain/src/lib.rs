//! Domain layer for jurisrag
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Structured path
//!
//! A model translates the question into one SQL `SELECT`. The
//! [`SqlValidator`] is the only gate between model output and the store:
//! an [`AcceptedSql`] can only be obtained from it.
//!
//! ## Evidence path
//!
//! Vector and keyword matches are merged into a [`RankedEvidenceSet`]
//! whose scores stay source-native.
//!
//! ## Answer path
//!
//! Several generator models each produce a [`CandidateAnswer`]; a judge
//! model turns the [`CandidateSet`] into one [`FinalAnswer`].

pub mod answer;
pub mod config;
pub mod core;
pub mod orchestration;
pub mod prompt;
pub mod retrieval;
pub mod sql;

// Re-export commonly used types
pub use answer::{CandidateAnswer, CandidateSet, FinalAnswer};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::DomainError,
    model::Model,
    question::Question,
    string::{LIST_DELIMITER, split_list_field, truncate_str},
};
pub use orchestration::{
    model_roles::ModelRoles,
    phase::{Phase, PipelineState},
    report::{AnswerReport, RetrievalOutcome, StructuredOutcome},
};
pub use prompt::PromptTemplate;
pub use retrieval::{DocumentMetadata, EvidenceSource, RankedEvidenceSet, RetrievedDocument};
pub use sql::{
    AcceptedSql, CHUNK_COLUMNS, CHUNKS_TABLE, GeneratedSql, QueryResult, RejectionReason,
    SqlAllowlist, SqlValidator, ValidationVerdict, extract_sql, validate,
};
