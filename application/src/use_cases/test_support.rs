//! Hand-written port fakes shared by the use case tests.

use crate::ports::audit_logger::{AuditEvent, AuditLogger};
use crate::ports::llm_gateway::{Embedder, GatewayError, LlmGateway, LlmSession};
use crate::ports::progress::ProgressNotifier;
use crate::ports::search_index::{IndexError, KeywordIndex, VectorIndex};
use crate::ports::sleeper::Sleeper;
use crate::ports::structured_store::{StoreError, StructuredStore};
use async_trait::async_trait;
use jurisrag_domain::{AcceptedSql, EvidenceSource, Model, Phase, QueryResult, RetrievedDocument};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ==================== LLM ====================

/// Scripted behaviour of one model call.
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Text(String),
    Fail(String),
    /// Never answers within any test timeout
    Hang,
}

impl Reply {
    pub(crate) fn text(s: &str) -> Self {
        Reply::Text(s.to_string())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub model: Model,
    pub system_prompt: String,
    pub prompt: String,
    pub max_tokens: u32,
}

#[derive(Default)]
struct Script {
    replies: Mutex<HashMap<Model, VecDeque<Reply>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

/// Gateway that answers from per-model scripts and records every call.
#[derive(Default, Clone)]
pub(crate) struct ScriptedGateway {
    script: Arc<Script>,
}

impl ScriptedGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn script(self, model: Model, replies: Vec<Reply>) -> Self {
        self.script
            .replies
            .lock()
            .unwrap()
            .entry(model)
            .or_default()
            .extend(replies);
        self
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.script.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_to(&self, model: &Model) -> usize {
        self.calls().iter().filter(|c| &c.model == model).count()
    }
}

struct ScriptedSession {
    model: Model,
    system_prompt: String,
    max_tokens: u32,
    script: Arc<Script>,
}

#[async_trait]
impl LlmSession for ScriptedSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        self.script.calls.lock().unwrap().push(RecordedCall {
            model: self.model.clone(),
            system_prompt: self.system_prompt.clone(),
            prompt: content.to_string(),
            max_tokens: self.max_tokens,
        });
        let reply = self
            .script
            .replies
            .lock()
            .unwrap()
            .get_mut(&self.model)
            .and_then(|queue| queue.pop_front());
        match reply {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail(e)) => Err(GatewayError::RequestFailed(e)),
            Some(Reply::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(GatewayError::Timeout)
            }
            None => Err(GatewayError::Other("No more responses".to_string())),
        }
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
        max_tokens: u32,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(ScriptedSession {
            model: model.clone(),
            system_prompt: system_prompt.to_string(),
            max_tokens,
            script: Arc::clone(&self.script),
        }))
    }
}

pub(crate) struct FixedEmbedder;

#[async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, GatewayError> {
        Ok(vec![0.1, 0.2, 0.3])
    }
}

// ==================== Indexes ====================

pub(crate) fn doc(id: &str, source: EvidenceSource) -> RetrievedDocument {
    RetrievedDocument::new(id, source, 1.0, format!("text of {id}"))
}

/// Index answering after an optional delay, or failing.
pub(crate) struct FakeIndex {
    pub result: Result<Vec<RetrievedDocument>, String>,
    pub delay: Duration,
}

impl FakeIndex {
    pub(crate) fn returning(docs: Vec<RetrievedDocument>) -> Self {
        Self {
            result: Ok(docs),
            delay: Duration::ZERO,
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            delay: Duration::ZERO,
        }
    }

    pub(crate) fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn answer(&self) -> Result<Vec<RetrievedDocument>, IndexError> {
        tokio::time::sleep(self.delay).await;
        self.result
            .clone()
            .map_err(IndexError::ConnectionError)
    }
}

#[async_trait]
impl VectorIndex for FakeIndex {
    async fn query(
        &self,
        _vector: &[f32],
        _top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, IndexError> {
        self.answer().await
    }
}

#[async_trait]
impl KeywordIndex for FakeIndex {
    async fn search(
        &self,
        _query: &str,
        _top_k: usize,
    ) -> Result<Vec<RetrievedDocument>, IndexError> {
        self.answer().await
    }
}

// ==================== Store ====================

pub(crate) struct FakeStore {
    pub result: Result<QueryResult, String>,
    pub times_out: bool,
    pub executed: Mutex<Vec<String>>,
    pub deadlines: Mutex<Vec<Duration>>,
}

impl FakeStore {
    fn with_result(result: Result<QueryResult, String>) -> Self {
        Self {
            result,
            times_out: false,
            executed: Mutex::new(Vec::new()),
            deadlines: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn returning(result: QueryResult) -> Self {
        Self::with_result(Ok(result))
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self::with_result(Err(message.to_string()))
    }

    /// Reports the deadline as exceeded after releasing its resources.
    pub(crate) fn timing_out() -> Self {
        Self {
            times_out: true,
            ..Self::with_result(Err("interrupted".to_string()))
        }
    }
}

#[async_trait]
impl StructuredStore for FakeStore {
    async fn query(&self, sql: &AcceptedSql, timeout: Duration) -> Result<QueryResult, StoreError> {
        self.executed.lock().unwrap().push(sql.sql().to_string());
        self.deadlines.lock().unwrap().push(timeout);
        if self.times_out {
            return Err(StoreError::Timeout(timeout));
        }
        self.result.clone().map_err(StoreError::Query)
    }
}

// ==================== Ambient ports ====================

/// Fake clock: records requested sleeps and returns immediately.
#[derive(Default)]
pub(crate) struct RecordingSleeper {
    pub sleeps: Mutex<Vec<Duration>>,
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

#[derive(Default)]
pub(crate) struct RecordingAudit {
    pub events: Mutex<Vec<(&'static str, serde_json::Value)>>,
}

impl RecordingAudit {
    pub(crate) fn types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }
}

impl AuditLogger for RecordingAudit {
    fn log(&self, event: AuditEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}

#[derive(Default)]
pub(crate) struct RecordingProgress {
    pub events: Mutex<Vec<String>>,
}

impl ProgressNotifier for RecordingProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("start:{}:{}", phase.as_str(), total_tasks));
    }

    fn on_task_complete(&self, phase: &Phase, task: &str, success: bool) {
        self.events
            .lock()
            .unwrap()
            .push(format!("task:{}:{}:{}", phase.as_str(), task, success));
    }

    fn on_phase_complete(&self, phase: &Phase) {
        self.events
            .lock()
            .unwrap()
            .push(format!("done:{}", phase.as_str()));
    }
}
