//! Structured store port
//!
//! Read-only access to the case/chunk table.

use async_trait::async_trait;
use jurisrag_domain::{AcceptedSql, QueryResult};
use std::time::Duration;
use thiserror::Error;

/// Errors raised by the structured store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open store: {0}")]
    Open(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Store task failed: {0}")]
    Task(String),

    /// The query was interrupted at its deadline and its connection closed
    #[error("Query interrupted after {0:?}")]
    Timeout(Duration),
}

/// Read-only store that executes validated SQL
///
/// Only [`AcceptedSql`] can be passed in, so unvalidated text never
/// reaches an adapter.
#[async_trait]
pub trait StructuredStore: Send + Sync {
    /// Run the statement and materialize every row
    ///
    /// Past `timeout` the adapter stops the statement and releases the
    /// connection before returning [`StoreError::Timeout`].
    async fn query(&self, sql: &AcceptedSql, timeout: Duration)
    -> Result<QueryResult, StoreError>;
}
