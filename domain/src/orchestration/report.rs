//! Answer report - the traceable outcome of one transaction

use crate::answer::{CandidateSet, FinalAnswer};
use crate::core::question::Question;
use crate::retrieval::{EvidenceSource, RankedEvidenceSet};
use crate::sql::{AcceptedSql, QueryResult};
use serde::{Deserialize, Serialize};

/// How the structured-data path ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StructuredOutcome {
    /// SQL accepted and executed
    Answered,
    /// No candidate passed the validator within the attempt bound
    GenerationExhausted { attempts: usize },
    /// The store rejected the accepted SQL
    ExecutionFailed { message: String },
}

impl StructuredOutcome {
    pub fn is_degraded(&self) -> bool {
        !matches!(self, StructuredOutcome::Answered)
    }
}

/// How the retrieval path ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RetrievalOutcome {
    Complete,
    /// One source failed; its error is kept for the report
    Partial {
        failed: EvidenceSource,
        message: String,
    },
    /// Both sources failed
    Unavailable,
}

/// Complete result of answering one question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerReport {
    pub question: Question,
    /// Accepted SQL, if generation succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql: Option<AcceptedSql>,
    pub structured: QueryResult,
    pub structured_outcome: StructuredOutcome,
    pub evidence: RankedEvidenceSet,
    pub retrieval_outcome: RetrievalOutcome,
    pub candidates: CandidateSet,
    pub answer: FinalAnswer,
}

impl AnswerReport {
    /// Whether any branch fell back to empty context.
    pub fn is_degraded(&self) -> bool {
        self.structured_outcome.is_degraded()
            || !matches!(self.retrieval_outcome, RetrievalOutcome::Complete)
    }
}
