//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod audit_logger;
pub mod llm_gateway;
pub mod progress;
pub mod search_index;
pub mod sleeper;
pub mod structured_store;
