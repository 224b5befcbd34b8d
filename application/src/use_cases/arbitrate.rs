//! Arbitrate use case
//!
//! One judge call turns the candidate set into the final answer.

use crate::ports::llm_gateway::LlmGateway;
use crate::use_cases::generate_candidates::AnswerContext;
use crate::use_cases::shared::complete;
use jurisrag_domain::{CandidateSet, FinalAnswer, Model, PromptTemplate};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArbitrationError {
    #[error("No viable candidate answer")]
    NoViableCandidate,

    #[error("Arbitration unavailable: {0}")]
    Unavailable(String),
}

/// Use case for judging candidate answers
pub struct ArbitrateUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    max_tokens: u32,
    timeout: Duration,
}

impl<G: LlmGateway + 'static> ArbitrateUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            max_tokens: 400,
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

    /// Judge `candidates`. The model is never called when every
    /// candidate is an error.
    pub async fn execute(
        &self,
        context: &AnswerContext,
        candidates: &CandidateSet,
        judge: &Model,
    ) -> Result<FinalAnswer, ArbitrationError> {
        if candidates.has_no_viable_candidate() {
            warn!("All {} candidate(s) failed; skipping judge", candidates.len());
            return Err(ArbitrationError::NoViableCandidate);
        }

        let prompt = PromptTemplate::judge_prompt(
            &context.question,
            &context.evidence,
            &context.structured,
            candidates,
        );
        let response = complete(
            self.gateway.as_ref(),
            judge,
            PromptTemplate::judge_system(),
            &prompt,
            self.max_tokens,
            self.timeout,
        )
        .await
        .map_err(|e| ArbitrationError::Unavailable(e.to_string()))?;

        let answer = FinalAnswer::try_new(judge.clone(), response)
            .map_err(|e| ArbitrationError::Unavailable(e.to_string()))?;
        info!("Judge {} produced the final answer", judge);
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{Reply, ScriptedGateway};
    use jurisrag_domain::CandidateAnswer;
    use std::collections::HashMap;

    fn context() -> AnswerContext {
        AnswerContext {
            question: "Q?".to_string(),
            evidence: "ctx".to_string(),
            structured: "[]".to_string(),
        }
    }

    fn candidates(answers: Vec<CandidateAnswer>) -> CandidateSet {
        let models: Vec<_> = answers.iter().map(|c| c.model.clone()).collect();
        let results: HashMap<_, _> = answers.into_iter().map(|c| (c.model.clone(), c)).collect();
        CandidateSet::assemble(&models, results)
    }

    #[tokio::test]
    async fn test_all_failed_never_calls_judge() {
        let gateway = ScriptedGateway::new();
        let uc = ArbitrateUseCase::new(Arc::new(gateway.clone()));
        let set = candidates(vec![
            CandidateAnswer::failure(Model::Llama3_8b, "a"),
            CandidateAnswer::failure(Model::NovaMicro, "b"),
            CandidateAnswer::failure(Model::Gemini25Flash, "c"),
        ]);

        let err = uc.execute(&context(), &set, &Model::Gpt41Nano).await.unwrap_err();
        assert_eq!(err, ArbitrationError::NoViableCandidate);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_judge_sees_error_markers() {
        let gateway = ScriptedGateway::new()
            .script(Model::Gpt41Nano, vec![Reply::text("  Two cases.\n")]);
        let uc = ArbitrateUseCase::new(Arc::new(gateway.clone()));
        let set = candidates(vec![
            CandidateAnswer::success(Model::Llama3_8b, "Two cases."),
            CandidateAnswer::failure(Model::NovaMicro, "timeout"),
        ]);

        let answer = uc.execute(&context(), &set, &Model::Gpt41Nano).await.unwrap();
        assert_eq!(answer.text(), "Two cases.");

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system_prompt, "You are a fair evaluator.");
        assert_eq!(calls[0].max_tokens, 400);
        assert!(calls[0].prompt.contains("[Error from nova-micro: timeout]"));
    }

    #[tokio::test]
    async fn test_transport_failure_and_blank_answer_are_unavailable() {
        let set = candidates(vec![CandidateAnswer::success(Model::Llama3_8b, "x")]);

        let gateway =
            ScriptedGateway::new().script(Model::Gpt41Nano, vec![Reply::Fail("502".to_string())]);
        let err = ArbitrateUseCase::new(Arc::new(gateway))
            .execute(&context(), &set, &Model::Gpt41Nano)
            .await
            .unwrap_err();
        assert!(matches!(err, ArbitrationError::Unavailable(_)));

        let gateway = ScriptedGateway::new().script(Model::Gpt41Nano, vec![Reply::text(" ")]);
        let err = ArbitrateUseCase::new(Arc::new(gateway))
            .execute(&context(), &set, &Model::Gpt41Nano)
            .await
            .unwrap_err();
        assert!(matches!(err, ArbitrationError::Unavailable(_)));
    }
}
