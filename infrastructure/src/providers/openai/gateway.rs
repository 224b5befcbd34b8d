//! [`LlmGateway`] over the OpenAI-compatible chat API

use super::client::OpenAiClient;
use super::session::OpenAiSession;
use async_trait::async_trait;
use jurisrag_application::{GatewayError, LlmGateway, LlmSession};
use jurisrag_domain::Model;
use std::sync::Arc;

/// Routes every model name to the same endpoint.
pub struct OpenAiGateway {
    client: Arc<OpenAiClient>,
    temperature: f32,
}

impl OpenAiGateway {
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self {
            client,
            temperature: 0.1,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
        max_tokens: u32,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        if model.as_str().trim().is_empty() {
            return Err(GatewayError::ModelNotAvailable(
                "empty model name".to_string(),
            ));
        }
        Ok(Box::new(OpenAiSession::new(
            self.client.clone(),
            model.clone(),
            system_prompt,
            max_tokens,
            self.temperature,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> OpenAiGateway {
        let client = OpenAiClient::new("http://localhost:1", "key").unwrap();
        OpenAiGateway::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_session_keeps_model() {
        let session = gateway()
            .create_session_with_system_prompt(&Model::NovaMicro, "sys", 100)
            .await
            .unwrap();
        assert_eq!(session.model(), &Model::NovaMicro);
    }

    #[tokio::test]
    async fn test_empty_model_rejected() {
        let result = gateway()
            .create_session_with_system_prompt(&Model::Custom(String::new()), "sys", 100)
            .await;
        assert!(matches!(result, Err(GatewayError::ModelNotAvailable(_))));
    }
}
