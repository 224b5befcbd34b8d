//! Generate candidates use case
//!
//! Fans the same question, evidence and structured result out to every
//! generator model. A failing model becomes an error-marked candidate.

use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::shared::complete;
use jurisrag_domain::{CandidateAnswer, CandidateSet, Model, Phase, PromptTemplate};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Prompt inputs shared by every generator and the judge
#[derive(Debug, Clone)]
pub struct AnswerContext {
    pub question: String,
    /// Rendered evidence text
    pub evidence: String,
    /// Structured result as JSON
    pub structured: String,
}

/// Use case for producing one candidate answer per generator model
pub struct GenerateCandidatesUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    max_tokens: u32,
    timeout: Duration,
}

impl<G: LlmGateway + 'static> GenerateCandidatesUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            max_tokens: 500,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn execute(&self, context: &AnswerContext, models: &[Model]) -> CandidateSet {
        self.execute_with_progress(context, models, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        context: &AnswerContext,
        models: &[Model],
        progress: &dyn ProgressNotifier,
    ) -> CandidateSet {
        progress.on_phase_start(&Phase::Generating, models.len());

        let prompt = Arc::new(PromptTemplate::answer_query(
            &context.question,
            &context.evidence,
            &context.structured,
        ));
        let mut join_set = JoinSet::new();

        for model in models {
            let gateway = Arc::clone(&self.gateway);
            let model = model.clone();
            let prompt = Arc::clone(&prompt);
            let max_tokens = self.max_tokens;
            let timeout = self.timeout;

            join_set.spawn(async move {
                let result = complete(
                    gateway.as_ref(),
                    &model,
                    PromptTemplate::answer_system(),
                    &prompt,
                    max_tokens,
                    timeout,
                )
                .await;
                (model, result)
            });
        }

        let mut results = HashMap::new();

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((model, Ok(content))) if !content.trim().is_empty() => {
                    info!("Model {} answered", model);
                    progress.on_task_complete(&Phase::Generating, model.as_str(), true);
                    results.insert(
                        model.clone(),
                        CandidateAnswer::success(model, content.trim()),
                    );
                }
                Ok((model, Ok(_))) => {
                    warn!("Model {} returned an empty answer", model);
                    progress.on_task_complete(&Phase::Generating, model.as_str(), false);
                    results.insert(
                        model.clone(),
                        CandidateAnswer::failure(model, "empty response"),
                    );
                }
                Ok((model, Err(e))) => {
                    warn!("Model {} failed: {}", model, e);
                    progress.on_task_complete(&Phase::Generating, model.as_str(), false);
                    results.insert(model.clone(), CandidateAnswer::failure(model, e.to_string()));
                }
                Err(e) => {
                    // The model is filled in with an error marker below
                    warn!("Task join error: {}", e);
                }
            }
        }

        progress.on_phase_complete(&Phase::Generating);
        CandidateSet::assemble(models, results)
    }
}
