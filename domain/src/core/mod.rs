//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] - language models that generate SQL, answers and verdicts
//! - [`question::Question`] - a validated legal question
//! - [`string`] - UTF-8 safe truncation and list-field splitting
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod model;
pub mod question;
pub mod string;
