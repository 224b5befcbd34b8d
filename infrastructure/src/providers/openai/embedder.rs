//! Query embeddings via `/v1/embeddings`

use super::client::OpenAiClient;
use super::types::{EmbeddingRequest, parse_embedding_response};
use async_trait::async_trait;
use jurisrag_application::{Embedder, GatewayError};
use std::sync::Arc;

/// Embeds queries at the vector index's dimensionality.
///
/// The `dimensions` request field shortens the model's native vector
/// server-side, so no local projection is needed.
pub struct OpenAiEmbedder {
    client: Arc<OpenAiClient>,
    model: String,
    dimensions: u32,
}

impl OpenAiEmbedder {
    pub fn new(client: Arc<OpenAiClient>, model: impl Into<String>, dimensions: u32) -> Self {
        Self {
            client,
            model: model.into(),
            dimensions,
        }
    }

    pub fn dimensions(&self) -> u32 {
        self.dimensions
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GatewayError> {
        let request = EmbeddingRequest {
            model: &self.model,
            input: text,
            dimensions: self.dimensions,
        };
        let body = self.client.post_json("/v1/embeddings", &request).await?;
        parse_embedding_response(&body, self.dimensions as usize)
    }
}
