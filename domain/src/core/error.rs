//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No generator models configured")]
    NoModels,

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Answer text cannot be empty")]
    EmptyAnswer,

    #[error("Invalid SQL allowlist: {0}")]
    InvalidAllowlist(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::NoModels.to_string(),
            "No generator models configured"
        );
        assert_eq!(
            DomainError::InvalidQuestion("empty".to_string()).to_string(),
            "Invalid question: empty"
        );
    }
}
