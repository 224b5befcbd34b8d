//! Orchestration domain
//!
//! Phases of an answering transaction, the model roles that drive it and
//! the report it produces.

pub mod model_roles;
pub mod phase;
pub mod report;
