//! Single-turn chat session
//!
//! Every pipeline call is one system prompt plus one user message, so the
//! session keeps no history.

use super::client::OpenAiClient;
use super::types::{ChatRequest, parse_chat_response};
use async_trait::async_trait;
use jurisrag_application::{GatewayError, LlmSession};
use jurisrag_domain::Model;
use std::sync::Arc;
use tracing::debug;

pub struct OpenAiSession {
    client: Arc<OpenAiClient>,
    model: Model,
    system_prompt: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiSession {
    pub fn new(
        client: Arc<OpenAiClient>,
        model: Model,
        system_prompt: impl Into<String>,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            client,
            model,
            system_prompt: system_prompt.into(),
            max_tokens,
            temperature,
        }
    }
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let mut request = ChatRequest::new(self.model.as_str(), &self.system_prompt, content);
        request.max_tokens = self.max_tokens;
        request.temperature = self.temperature;

        debug!(
            model = %self.model,
            max_tokens = self.max_tokens,
            prompt_len = content.len(),
            "Calling chat completions"
        );

        let body = self.client.post_json("/v1/chat/completions", &request).await?;
        parse_chat_response(&body)
    }
}
