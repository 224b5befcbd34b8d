//! Pipeline parameters - per-transaction tuning knobs.
//!
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Completion budgets and evidence shaping for one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineParams {
    /// Matches requested from each retrieval source.
    pub top_k: usize,
    /// Bytes of each document included in the evidence context.
    pub evidence_chars_per_document: usize,
    /// Drop keyword copies of chunks the vector index already returned.
    pub deduplicate: bool,
    /// Rows of the structured result injected into prompts.
    pub max_rows_in_prompt: usize,
    pub sql_max_tokens: u32,
    pub answer_max_tokens: u32,
    pub judge_max_tokens: u32,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            top_k: 5,
            evidence_chars_per_document: 400,
            deduplicate: false,
            max_rows_in_prompt: 50,
            sql_max_tokens: 100,
            answer_max_tokens: 500,
            judge_max_tokens: 400,
        }
    }
}

impl PipelineParams {
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }

    pub fn with_evidence_chars_per_document(mut self, chars: usize) -> Self {
        self.evidence_chars_per_document = chars;
        self
    }

    pub fn with_max_rows_in_prompt(mut self, rows: usize) -> Self {
        self.max_rows_in_prompt = rows;
        self
    }
}

/// Per-call timeouts for every external dependency.
///
/// A timeout is a transport failure of the branch it fires in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeouts {
    pub llm: Duration,
    pub store: Duration,
    pub index: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            llm: Duration::from_secs(30),
            store: Duration::from_secs(30),
            index: Duration::from_secs(30),
        }
    }
}

impl Timeouts {
    /// Creates timeouts from values in seconds.
    pub fn from_seconds(llm: u64, store: u64, index: u64) -> Self {
        Self {
            llm: Duration::from_secs(llm),
            store: Duration::from_secs(store),
            index: Duration::from_secs(index),
        }
    }
}
