//! Wire types for chat completions and embeddings

use jurisrag_application::GatewayError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl<'a> ChatRequest<'a> {
    pub fn new(model: &'a str, system_prompt: &'a str, content: &'a str) -> Self {
        let mut messages = Vec::with_capacity(2);
        if !system_prompt.is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: system_prompt,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content,
        });
        Self {
            model,
            messages,
            max_tokens: 0,
            temperature: 0.0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Text of the first choice. A missing or null content is an empty answer.
pub fn parse_chat_response(body: &str) -> Result<String, GatewayError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::InvalidResponse(format!("chat completion: {}", e)))?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::InvalidResponse("no choices returned".to_string()))?;
    Ok(choice.message.content.unwrap_or_default())
}

#[derive(Debug, Serialize)]
pub struct EmbeddingRequest<'a> {
    pub model: &'a str,
    pub input: &'a str,
    pub dimensions: u32,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// First embedding vector, checked against the expected dimensionality.
pub fn parse_embedding_response(body: &str, dimensions: usize) -> Result<Vec<f32>, GatewayError> {
    let response: EmbeddingResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::InvalidResponse(format!("embedding: {}", e)))?;
    let vector = response
        .data
        .into_iter()
        .next()
        .map(|d| d.embedding)
        .ok_or_else(|| GatewayError::InvalidResponse("no embedding returned".to_string()))?;
    if vector.len() != dimensions {
        return Err(GatewayError::InvalidResponse(format!(
            "expected {} dimensions, got {}",
            dimensions,
            vector.len()
        )));
    }
    Ok(vector)
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// `error.message` from an API error body, if present.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|e| e.error.message)
}
