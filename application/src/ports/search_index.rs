//! Search index ports
//!
//! Two independent retrieval sources with source-native scores.

use async_trait::async_trait;
use jurisrag_domain::RetrievedDocument;
use thiserror::Error;

/// Errors raised by a search index
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Index not configured: {0}")]
    NotConfigured(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Dense vector index (cosine similarity)
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Nearest neighbours of `vector`, best first
    async fn query(&self, vector: &[f32], top_k: usize)
    -> Result<Vec<RetrievedDocument>, IndexError>;
}

/// Full-text keyword index (BM25)
#[async_trait]
pub trait KeywordIndex: Send + Sync {
    /// Best `top_k` hits for `query`, best first
    async fn search(&self, query: &str, top_k: usize)
    -> Result<Vec<RetrievedDocument>, IndexError>;
}
