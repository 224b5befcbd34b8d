//! Prompt domain
//!
//! Templates for the three model call shapes: SQL generation, answer
//! generation and arbitration.

mod template;

pub use template::PromptTemplate;
