//! Application layer for jurisrag
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{PipelineParams, RetryPolicy, Timeouts};
pub use ports::{
    audit_logger::{AuditEvent, AuditLogger, NoAuditLogger},
    llm_gateway::{Embedder, GatewayError, LlmGateway, LlmSession},
    progress::{NoProgress, ProgressNotifier},
    search_index::{IndexError, KeywordIndex, VectorIndex},
    sleeper::{Sleeper, TokioSleeper},
    structured_store::{StoreError, StructuredStore},
};
pub use use_cases::answer_question::{AnswerError, AnswerQuestionInput, AnswerQuestionUseCase};
pub use use_cases::arbitrate::{ArbitrateUseCase, ArbitrationError};
pub use use_cases::execute_query::{ExecuteQueryUseCase, ExecutionError};
pub use use_cases::generate_candidates::{AnswerContext, GenerateCandidatesUseCase};
pub use use_cases::generate_sql::{GenerateSqlUseCase, SqlGenerationError};
pub use use_cases::hybrid_retrieve::{HybridRetrieveUseCase, RetrievalError, RetrievalResult};
