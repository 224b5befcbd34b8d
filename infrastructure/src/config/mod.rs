//! Configuration file loading for jurisrag
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `JURISRAG_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./jurisrag.toml` or `./.jurisrag.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/jurisrag/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileCompletionConfig, FileConfig, FileKeywordIndexConfig, FileLoggingConfig,
    FileModelsConfig, FileProviderConfig, FileRetrievalConfig, FileSqlConfig, FileStoreConfig,
    FileTimeoutsConfig, FileVectorIndexConfig,
};
pub use loader::ConfigLoader;
