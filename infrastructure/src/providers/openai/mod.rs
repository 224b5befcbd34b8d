//! OpenAI-compatible provider
//!
//! Chat completions serve every model role; the embeddings endpoint
//! serves query vectors. Any server that speaks the same wire format
//! (a local gateway, a proxy in front of other vendors) works through
//! `provider.base_url`.

mod client;
mod embedder;
mod gateway;
mod session;
pub mod types;

pub use client::OpenAiClient;
pub use embedder::OpenAiEmbedder;
pub use gateway::OpenAiGateway;
pub use session::OpenAiSession;
