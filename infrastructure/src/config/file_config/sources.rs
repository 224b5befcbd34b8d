//! External source configuration from TOML
//!
//! `[provider]`, `[store]`, `[vector_index]` and `[keyword_index]` sections.

use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat and embedding endpoint (`[provider]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL; `/v1/...` paths are appended.
    pub base_url: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub embedding_model: String,
    /// Must match the vector index dimensionality.
    pub embedding_dimensions: u32,
    pub temperature: f32,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            embedding_dimensions: 1024,
            temperature: 0.1,
        }
    }
}

/// SQLite chunk store (`[store]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    pub path: String,
    pub table: String,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            path: "data/jurisrag.db".to_string(),
            table: "chunks".to_string(),
        }
    }
}

/// Pinecone-compatible vector index (`[vector_index]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVectorIndexConfig {
    /// Index host URL. Empty disables the vector branch.
    pub host: String,
    pub api_key_env: String,
    pub namespace: String,
}

impl Default for FileVectorIndexConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            api_key_env: "PINECONE_API_KEY".to_string(),
            namespace: String::new(),
        }
    }
}

impl FileVectorIndexConfig {
    pub fn is_configured(&self) -> bool {
        !self.host.trim().is_empty()
    }
}

/// Elasticsearch-compatible keyword index (`[keyword_index]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileKeywordIndexConfig {
    pub url: String,
    pub index: String,
}

impl Default for FileKeywordIndexConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9200".to_string(),
            index: "jurisrag-legal".to_string(),
        }
    }
}
