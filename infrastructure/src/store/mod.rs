//! Structured store adapters

mod sqlite;

pub use sqlite::SqliteChunkStore;
