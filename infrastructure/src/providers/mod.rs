//! LLM and embedding providers

pub mod openai;

pub use openai::{OpenAiClient, OpenAiEmbedder, OpenAiGateway, OpenAiSession};
