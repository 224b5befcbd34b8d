//! Pipeline tuning from TOML
//!
//! `[retrieval]`, `[sql]`, `[generation]`, `[arbitration]`, `[timeouts]`
//! and `[logging]` sections.

use jurisrag_application::{RetryPolicy, Timeouts};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `[retrieval]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetrievalConfig {
    pub top_k: usize,
    pub evidence_chars_per_document: usize,
    /// Drop keyword copies of chunks the vector index already returned.
    pub deduplicate: bool,
}

impl Default for FileRetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            evidence_chars_per_document: 400,
            deduplicate: false,
        }
    }
}

/// `[sql]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSqlConfig {
    pub max_attempts: usize,
    pub base_delay_ms: u64,
    pub multiplier: f64,
    pub max_delay_ms: u64,
    pub jitter_ms: u64,
    pub max_tokens: u32,
    pub max_rows_in_prompt: usize,
}

impl Default for FileSqlConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 2000,
            multiplier: 2.0,
            max_delay_ms: 60_000,
            jitter_ms: 1000,
            max_tokens: 100,
            max_rows_in_prompt: 50,
        }
    }
}

impl FileSqlConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
            multiplier: self.multiplier,
            max_delay: Duration::from_millis(self.max_delay_ms),
            jitter: Duration::from_millis(self.jitter_ms),
        }
    }
}

/// `[generation]` and `[arbitration]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCompletionConfig {
    pub max_tokens: u32,
}

impl FileCompletionConfig {
    pub fn generation() -> Self {
        Self { max_tokens: 500 }
    }

    pub fn arbitration() -> Self {
        Self { max_tokens: 400 }
    }
}

impl Default for FileCompletionConfig {
    fn default() -> Self {
        Self::generation()
    }
}

/// `[timeouts]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTimeoutsConfig {
    pub llm_seconds: u64,
    pub store_seconds: u64,
    pub index_seconds: u64,
}

impl Default for FileTimeoutsConfig {
    fn default() -> Self {
        Self {
            llm_seconds: 30,
            store_seconds: 30,
            index_seconds: 30,
        }
    }
}

impl FileTimeoutsConfig {
    pub fn to_timeouts(&self) -> Timeouts {
        Timeouts::from_seconds(self.llm_seconds, self.store_seconds, self.index_seconds)
    }
}

/// `[logging]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Path of the JSONL SQL audit log. Empty disables it.
    pub audit_log: String,
}

impl FileLoggingConfig {
    pub fn audit_log_path(&self) -> Option<&str> {
        let path = self.audit_log.trim();
        (!path.is_empty()).then_some(path)
    }
}
