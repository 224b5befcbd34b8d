//! Infrastructure layer for jurisrag
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod retrieval;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use logging::JsonlAuditLogger;
pub use providers::{OpenAiClient, OpenAiEmbedder, OpenAiGateway};
pub use retrieval::{ElasticsearchIndex, PineconeIndex};
pub use store::SqliteChunkStore;
