//! The arbitrated final answer

use crate::core::error::DomainError;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Single answer chosen or merged by the judge. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalAnswer {
    /// The judge model
    pub judge: Model,
    text: String,
}

impl FinalAnswer {
    pub fn try_new(judge: Model, text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyAnswer);
        }
        Ok(Self {
            judge,
            text: trimmed.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for FinalAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_answer_rejected() {
        assert_eq!(
            FinalAnswer::try_new(Model::Gpt41Nano, " \n"),
            Err(DomainError::EmptyAnswer)
        );
    }

    #[test]
    fn test_answer_is_trimmed() {
        let answer = FinalAnswer::try_new(Model::Gpt41Nano, "\nTwo cases.\n").unwrap();
        assert_eq!(answer.text(), "Two cases.");
        assert_eq!(answer.judge, Model::Gpt41Nano);
    }
}
