//! Generate SQL use case
//!
//! Asks the SQL model for a single SELECT and loops until the validator
//! accepts one or the retry policy is exhausted.

use crate::config::{RetryPolicy, Timeouts};
use crate::ports::audit_logger::{AuditEvent, AuditLogger, NoAuditLogger};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::sleeper::{Sleeper, TokioSleeper};
use crate::use_cases::shared::complete;
use jurisrag_domain::{AcceptedSql, GeneratedSql, Model, PromptTemplate, Question, SqlValidator};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Terminal failure of the SQL path. Callers never retry it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SqlGenerationError {
    #[error("No valid SQL after {attempts} attempt(s): {last_error}")]
    GenerationExhausted { attempts: usize, last_error: String },
}

/// Use case for translating a question into validated SQL
pub struct GenerateSqlUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    validator: SqlValidator,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
    audit: Arc<dyn AuditLogger>,
    max_tokens: u32,
    timeouts: Timeouts,
}

impl<G: LlmGateway + 'static> GenerateSqlUseCase<G> {
    pub fn new(gateway: Arc<G>, validator: SqlValidator) -> Self {
        Self {
            gateway,
            validator,
            policy: RetryPolicy::default(),
            sleeper: Arc::new(TokioSleeper),
            audit: Arc::new(NoAuditLogger),
            max_tokens: 100,
            timeouts: Timeouts::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_audit_logger(mut self, audit: Arc<dyn AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn validator(&self) -> &SqlValidator {
        &self.validator
    }

    pub async fn execute(
        &self,
        question: &Question,
        model: &Model,
    ) -> Result<AcceptedSql, SqlGenerationError> {
        let system_prompt = PromptTemplate::sql_system(self.validator.allowlist());
        let prompt = PromptTemplate::sql_query(question.content(), self.validator.allowlist());
        let max_attempts = self.policy.max_attempts;
        let mut last_error = String::from("no attempt made");

        for attempt in 1..=max_attempts {
            debug!("SQL attempt {}/{} with {}", attempt, max_attempts, model);

            match complete(
                self.gateway.as_ref(),
                model,
                &system_prompt,
                &prompt,
                self.max_tokens,
                self.timeouts.llm,
            )
            .await
            {
                Ok(raw) => {
                    let candidate = GeneratedSql::from_response(&raw, attempt);
                    let sql = candidate.sql().to_string();
                    match self.validator.accept(candidate) {
                        Ok(accepted) => {
                            info!("SQL accepted on attempt {}: {}", attempt, accepted);
                            return Ok(accepted);
                        }
                        Err(reason) => {
                            warn!("SQL attempt {} rejected ({}): {}", attempt, reason, sql);
                            self.audit.log(AuditEvent::new(
                                "sql_rejected",
                                json!({
                                    "question": question.content(),
                                    "attempt": attempt,
                                    "sql": sql,
                                    "code": reason.code(),
                                    "reason": reason.to_string(),
                                }),
                            ));
                            last_error = format!("rejected: {}", reason);
                        }
                    }
                }
                Err(e) => {
                    warn!("SQL attempt {} failed: {}", attempt, e);
                    self.audit.log(AuditEvent::new(
                        "sql_request_failed",
                        json!({
                            "question": question.content(),
                            "attempt": attempt,
                            "error": e.to_string(),
                        }),
                    ));
                    last_error = e.to_string();
                }
            }

            if attempt < max_attempts {
                let delay = self.policy.delay_for(attempt, &mut rand::thread_rng());
                debug!("Backing off {:?} before SQL attempt {}", delay, attempt + 1);
                self.sleeper.sleep(delay).await;
            }
        }

        warn!("SQL generation exhausted after {} attempt(s)", max_attempts);
        self.audit.log(AuditEvent::new(
            "generation_exhausted",
            json!({
                "question": question.content(),
                "attempts": max_attempts,
                "last_error": last_error,
            }),
        ));
        Err(SqlGenerationError::GenerationExhausted {
            attempts: max_attempts,
            last_error,
        })
    }
}
