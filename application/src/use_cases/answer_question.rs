//! Answer question use case
//!
//! Orchestrates one transaction: the SQL path and hybrid retrieval run
//! concurrently, candidates are generated from both, then the judge
//! picks the final answer.
//!
//! SQL and retrieval failures degrade to empty context. Only the two
//! arbitration failures end the transaction with an error.

use crate::config::PipelineParams;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::arbitrate::{ArbitrateUseCase, ArbitrationError};
use crate::use_cases::execute_query::ExecuteQueryUseCase;
use crate::use_cases::generate_candidates::{AnswerContext, GenerateCandidatesUseCase};
use crate::use_cases::generate_sql::{GenerateSqlUseCase, SqlGenerationError};
use crate::use_cases::hybrid_retrieve::{HybridRetrieveUseCase, RetrievalResult};
use jurisrag_domain::{
    AcceptedSql, AnswerReport, ModelRoles, Phase, PipelineState, QueryResult, Question,
    RankedEvidenceSet, RetrievalOutcome, StructuredOutcome,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// The two ways a transaction can fail
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnswerError {
    #[error("No viable candidate answer: every generator failed")]
    NoViableCandidate,

    #[error("Arbitration unavailable: {0}")]
    ArbitrationUnavailable(String),
}

impl From<ArbitrationError> for AnswerError {
    fn from(e: ArbitrationError) -> Self {
        match e {
            ArbitrationError::NoViableCandidate => AnswerError::NoViableCandidate,
            ArbitrationError::Unavailable(msg) => AnswerError::ArbitrationUnavailable(msg),
        }
    }
}

/// Input for the AnswerQuestion use case
#[derive(Debug, Clone)]
pub struct AnswerQuestionInput {
    pub question: Question,
    /// `sql` writes the query, `generators` answer, `judge` arbitrates
    pub models: ModelRoles,
}

impl AnswerQuestionInput {
    pub fn new(question: Question, models: ModelRoles) -> Self {
        Self { question, models }
    }
}

struct StructuredPath {
    sql: Option<AcceptedSql>,
    result: QueryResult,
    outcome: StructuredOutcome,
}

/// Use case for answering one legal question end to end
pub struct AnswerQuestionUseCase<G: LlmGateway + 'static> {
    generate_sql: GenerateSqlUseCase<G>,
    execute_query: ExecuteQueryUseCase,
    retrieve: HybridRetrieveUseCase,
    generate_candidates: GenerateCandidatesUseCase<G>,
    arbitrate: ArbitrateUseCase<G>,
    params: PipelineParams,
}

impl<G: LlmGateway + 'static> AnswerQuestionUseCase<G> {
    pub fn new(
        generate_sql: GenerateSqlUseCase<G>,
        execute_query: ExecuteQueryUseCase,
        retrieve: HybridRetrieveUseCase,
        generate_candidates: GenerateCandidatesUseCase<G>,
        arbitrate: ArbitrateUseCase<G>,
    ) -> Self {
        Self {
            generate_sql,
            execute_query,
            retrieve,
            generate_candidates,
            arbitrate,
            params: PipelineParams::default(),
        }
    }

    pub fn with_params(mut self, params: PipelineParams) -> Self {
        self.params = params;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: AnswerQuestionInput) -> Result<AnswerReport, AnswerError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: AnswerQuestionInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<AnswerReport, AnswerError> {
        let AnswerQuestionInput { question, models } = input;
        let generators = models.distinct_generators();
        info!(
            "Answering with {} generator(s), judge {}",
            generators.len(),
            models.judge
        );

        let mut state = PipelineState::Start;
        self.transition(&mut state, PipelineState::Running(Phase::SqlGenerating));
        self.transition(&mut state, PipelineState::Running(Phase::Retrieving));

        let (structured, retrieval) = tokio::join!(
            self.structured_path(&question, &models, progress),
            self.retrieve
                .execute_with_progress(question.content(), self.params.top_k, progress)
        );

        let (evidence, retrieval_outcome) = match retrieval {
            Ok(RetrievalResult { evidence, outcome }) => (evidence, outcome),
            Err(e) => {
                warn!("{}; continuing without evidence", e);
                (RankedEvidenceSet::empty(), RetrievalOutcome::Unavailable)
            }
        };

        let context = AnswerContext {
            question: question.content().to_string(),
            evidence: evidence.render_context(self.params.evidence_chars_per_document),
            structured: structured
                .result
                .to_prompt_json(self.params.max_rows_in_prompt),
        };

        self.transition(&mut state, PipelineState::Running(Phase::Generating));
        let candidates = self
            .generate_candidates
            .execute_with_progress(&context, &generators, progress)
            .await;

        self.transition(&mut state, PipelineState::Running(Phase::Arbitrating));
        progress.on_phase_start(&Phase::Arbitrating, 1);
        let verdict = self
            .arbitrate
            .execute(&context, &candidates, &models.judge)
            .await;
        progress.on_task_complete(&Phase::Arbitrating, models.judge.as_str(), verdict.is_ok());
        progress.on_phase_complete(&Phase::Arbitrating);

        let answer = match verdict {
            Ok(answer) => answer,
            Err(e) => {
                self.transition(&mut state, PipelineState::Failed(e.to_string()));
                return Err(e.into());
            }
        };
        self.transition(&mut state, PipelineState::Done);

        Ok(AnswerReport {
            question,
            sql: structured.sql,
            structured: structured.result,
            structured_outcome: structured.outcome,
            evidence,
            retrieval_outcome,
            candidates,
            answer,
        })
    }

    /// SQL generation followed by execution; never fails.
    async fn structured_path(
        &self,
        question: &Question,
        models: &ModelRoles,
        progress: &dyn ProgressNotifier,
    ) -> StructuredPath {
        progress.on_phase_start(&Phase::SqlGenerating, 1);

        let path = match self.generate_sql.execute(question, &models.sql).await {
            Ok(sql) => match self.execute_query.execute(&sql).await {
                Ok(result) => StructuredPath {
                    sql: Some(sql),
                    result,
                    outcome: StructuredOutcome::Answered,
                },
                Err(e) => StructuredPath {
                    sql: Some(sql),
                    result: QueryResult::empty(),
                    outcome: StructuredOutcome::ExecutionFailed {
                        message: e.to_string(),
                    },
                },
            },
            Err(SqlGenerationError::GenerationExhausted { attempts, .. }) => StructuredPath {
                sql: None,
                result: QueryResult::empty(),
                outcome: StructuredOutcome::GenerationExhausted { attempts },
            },
        };

        progress.on_task_complete(
            &Phase::SqlGenerating,
            models.sql.as_str(),
            !path.outcome.is_degraded(),
        );
        progress.on_phase_complete(&Phase::SqlGenerating);
        path
    }

    fn transition(&self, state: &mut PipelineState, next: PipelineState) {
        let from = state.to_string();
        if state.advance(next) {
            debug!("Pipeline {} -> {}", from, state);
        } else {
            warn!("Ignored illegal pipeline transition from {}", from);
        }
    }
}
