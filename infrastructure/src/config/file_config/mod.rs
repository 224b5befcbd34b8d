//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is optional; missing keys take the built-in defaults.

mod models;
mod pipeline;
mod sources;

pub use models::FileModelsConfig;
pub use pipeline::{
    FileCompletionConfig, FileLoggingConfig, FileRetrievalConfig, FileSqlConfig,
    FileTimeoutsConfig,
};
pub use sources::{
    FileKeywordIndexConfig, FileProviderConfig, FileStoreConfig, FileVectorIndexConfig,
};

use jurisrag_application::PipelineParams;
use jurisrag_domain::{ConfigIssue, ConfigIssueCode, Model};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

fn arbitration_default() -> FileCompletionConfig {
    FileCompletionConfig::arbitration()
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Role-based model selection
    pub models: FileModelsConfig,
    /// Chat and embedding endpoint
    pub provider: FileProviderConfig,
    /// Structured chunk store
    pub store: FileStoreConfig,
    pub vector_index: FileVectorIndexConfig,
    pub keyword_index: FileKeywordIndexConfig,
    pub retrieval: FileRetrievalConfig,
    /// SQL generation retry and prompt limits
    pub sql: FileSqlConfig,
    pub generation: FileCompletionConfig,
    #[serde(default = "arbitration_default")]
    pub arbitration: FileCompletionConfig,
    pub timeouts: FileTimeoutsConfig,
    pub logging: FileLoggingConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            models: FileModelsConfig::default(),
            provider: FileProviderConfig::default(),
            store: FileStoreConfig::default(),
            vector_index: FileVectorIndexConfig::default(),
            keyword_index: FileKeywordIndexConfig::default(),
            retrieval: FileRetrievalConfig::default(),
            sql: FileSqlConfig::default(),
            generation: FileCompletionConfig::generation(),
            arbitration: FileCompletionConfig::arbitration(),
            timeouts: FileTimeoutsConfig::default(),
            logging: FileLoggingConfig::default(),
        }
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors make the pipeline unusable; warnings degrade one path.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let (_, mut issues) = self.models.to_model_roles();

        let (generators, _) = self.models.parse_generators();
        if generators.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyGenerators,
                "models.generators: at least one generator model is required",
            ));
        }

        let mut seen: HashSet<&Model> = HashSet::new();
        for model in &generators {
            if !seen.insert(model) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::DuplicateGenerator,
                    format!("models.generators: '{}' is listed more than once", model),
                ));
            }
        }

        if self.sql.max_attempts == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroAttempts,
                "sql.max_attempts must be at least 1",
            ));
        }

        if self.retrieval.top_k == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTopK,
                "retrieval.top_k must be at least 1",
            ));
        }

        if !self.vector_index.is_configured() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingVectorHost,
                "vector_index.host is not set; answers will use keyword evidence only",
            ));
        }

        issues
    }

    /// Pipeline tuning derived from the retrieval, sql and completion sections.
    pub fn pipeline_params(&self) -> PipelineParams {
        PipelineParams {
            top_k: self.retrieval.top_k,
            evidence_chars_per_document: self.retrieval.evidence_chars_per_document,
            deduplicate: self.retrieval.deduplicate,
            max_rows_in_prompt: self.sql.max_rows_in_prompt,
            sql_max_tokens: self.sql.max_tokens,
            answer_max_tokens: self.generation.max_tokens,
            judge_max_tokens: self.arbitration.max_tokens,
        }
    }
}
