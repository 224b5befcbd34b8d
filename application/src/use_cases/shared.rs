//! Shared utilities for use cases.
//!
//! Bounded LLM calls used by the SQL generator, the candidate generator
//! and the arbiter.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use jurisrag_domain::Model;
use std::time::Duration;

/// One system+user exchange with `model`, bounded by `timeout`.
///
/// Session creation and the request share the same deadline.
pub(crate) async fn complete<G: LlmGateway + ?Sized>(
    gateway: &G,
    model: &Model,
    system_prompt: &str,
    prompt: &str,
    max_tokens: u32,
    timeout: Duration,
) -> Result<String, GatewayError> {
    let exchange = async {
        let session = gateway
            .create_session_with_system_prompt(model, system_prompt, max_tokens)
            .await?;
        session.send(prompt).await
    };

    match tokio::time::timeout(timeout, exchange).await {
        Ok(result) => result,
        Err(_) => Err(GatewayError::Timeout),
    }
}
