//! Hybrid retrieve use case
//!
//! Queries the vector and keyword indexes concurrently and merges their
//! results. One failing source is tolerated; both failing is an error.

use crate::ports::llm_gateway::Embedder;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::search_index::{KeywordIndex, VectorIndex};
use jurisrag_domain::{
    EvidenceSource, Phase, RankedEvidenceSet, RetrievalOutcome, RetrievedDocument,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetrievalError {
    #[error("Retrieval unavailable (vector: {vector}; keyword: {keyword})")]
    Unavailable { vector: String, keyword: String },
}

/// Merged evidence plus how each source fared
#[derive(Debug, Clone)]
pub struct RetrievalResult {
    pub evidence: RankedEvidenceSet,
    pub outcome: RetrievalOutcome,
}

/// Use case for hybrid (vector + keyword) retrieval
pub struct HybridRetrieveUseCase {
    embedder: Arc<dyn Embedder>,
    vector: Option<Arc<dyn VectorIndex>>,
    keyword: Option<Arc<dyn KeywordIndex>>,
    deduplicate: bool,
    timeout: Duration,
}

impl HybridRetrieveUseCase {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            vector: None,
            keyword: None,
            deduplicate: false,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_vector_index(mut self, index: Arc<dyn VectorIndex>) -> Self {
        self.vector = Some(index);
        self
    }

    pub fn with_keyword_index(mut self, index: Arc<dyn KeywordIndex>) -> Self {
        self.keyword = Some(index);
        self
    }

    pub fn with_deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn execute(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<RetrievalResult, RetrievalError> {
        self.execute_with_progress(query, top_k, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        query: &str,
        top_k: usize,
        progress: &dyn ProgressNotifier,
    ) -> Result<RetrievalResult, RetrievalError> {
        progress.on_phase_start(&Phase::Retrieving, 2);

        let vector = async {
            let result = self.vector_branch(query, top_k).await;
            let source = EvidenceSource::Vector.as_str();
            progress.on_task_complete(&Phase::Retrieving, source, result.is_ok());
            result
        };
        let keyword = async {
            let result = self.keyword_branch(query, top_k).await;
            let source = EvidenceSource::Keyword.as_str();
            progress.on_task_complete(&Phase::Retrieving, source, result.is_ok());
            result
        };
        let (vector, keyword) = tokio::join!(vector, keyword);
        progress.on_phase_complete(&Phase::Retrieving);

        let (evidence, outcome) = match (vector, keyword) {
            (Ok(v), Ok(k)) => (RankedEvidenceSet::merge(v, k), RetrievalOutcome::Complete),
            (Ok(v), Err(e)) => {
                warn!("Keyword retrieval failed, continuing with vector matches: {}", e);
                (
                    RankedEvidenceSet::merge(v, Vec::new()),
                    RetrievalOutcome::Partial {
                        failed: EvidenceSource::Keyword,
                        message: e,
                    },
                )
            }
            (Err(e), Ok(k)) => {
                warn!("Vector retrieval failed, continuing with keyword matches: {}", e);
                (
                    RankedEvidenceSet::merge(Vec::new(), k),
                    RetrievalOutcome::Partial {
                        failed: EvidenceSource::Vector,
                        message: e,
                    },
                )
            }
            (Err(vector), Err(keyword)) => {
                warn!("Both retrieval sources failed");
                return Err(RetrievalError::Unavailable { vector, keyword });
            }
        };

        let evidence = if self.deduplicate {
            evidence.deduplicated()
        } else {
            evidence
        };
        info!("Retrieved {} evidence document(s)", evidence.len());
        Ok(RetrievalResult { evidence, outcome })
    }

    async fn vector_branch(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, String> {
        let index = self
            .vector
            .as_ref()
            .ok_or_else(|| "vector index not configured".to_string())?;
        let embedding = bounded(self.timeout, self.embedder.embed(query))
            .await?
            .map_err(|e| format!("embedding failed: {}", e))?;
        let matches = bounded(self.timeout, index.query(&embedding, top_k))
            .await?
            .map_err(|e| e.to_string())?;
        Ok(capped(matches, top_k))
    }

    async fn keyword_branch(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, String> {
        let index = self
            .keyword
            .as_ref()
            .ok_or_else(|| "keyword index not configured".to_string())?;
        let matches = bounded(self.timeout, index.search(query, top_k))
            .await?
            .map_err(|e| e.to_string())?;
        Ok(capped(matches, top_k))
    }
}

/// Keep the index's own ranking but never more than `top_k` matches.
fn capped(mut matches: Vec<RetrievedDocument>, top_k: usize) -> Vec<RetrievedDocument> {
    if matches.len() > top_k {
        debug!("Index returned {} matches for top_k {}", matches.len(), top_k);
        matches.truncate(top_k);
    }
    matches
}

async fn bounded<T>(timeout: Duration, call: impl Future<Output = T>) -> Result<T, String> {
    tokio::time::timeout(timeout, call)
        .await
        .map_err(|_| format!("timed out after {:?}", timeout))
}
