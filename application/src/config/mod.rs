//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`RetryPolicy`] - bounded exponential backoff for SQL generation
//! - [`PipelineParams`] - completion budgets and evidence shaping
//! - [`Timeouts`] - per-call limits for the model, store and indexes

pub mod pipeline_params;
pub mod retry_policy;

pub use pipeline_params::{PipelineParams, Timeouts};
pub use retry_policy::RetryPolicy;
