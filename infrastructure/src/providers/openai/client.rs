//! Shared HTTP client for the OpenAI-compatible API

use jurisrag_application::GatewayError;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;

/// Authenticated client bound to one base URL.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Read the API key from `key_env`.
    pub fn from_env(base_url: &str, key_env: &str) -> Result<Self, GatewayError> {
        let api_key = std::env::var(key_env)
            .map_err(|_| GatewayError::ConnectionError(format!("{} is not set", key_env)))?;
        Self::new(base_url, api_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` to `path` and return the raw response body.
    pub(super) async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "POST");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status(status, &text));
        }
        Ok(text)
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

pub(super) fn map_status(status: StatusCode, body: &str) -> GatewayError {
    let detail = super::types::error_message(body).unwrap_or_else(|| body.trim().to_string());
    match status {
        StatusCode::NOT_FOUND => GatewayError::ModelNotAvailable(detail),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout,
        _ => GatewayError::RequestFailed(format!("HTTP {}: {}", status.as_u16(), detail)),
    }
}
