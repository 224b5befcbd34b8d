//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A legal question to be answered (Value Object)
///
/// The unit of a whole answering transaction. Content is stored trimmed
/// and is guaranteed to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Question {
    content: String,
}

impl Question {
    /// Try to create a new question, rejecting empty or whitespace-only input
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidQuestion(
                "question cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            content: trimmed.to_string(),
        })
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::try_new(s)
    }
}

impl TryFrom<&str> for Question {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Question::try_new(s)
    }
}

impl From<Question> for String {
    fn from(q: Question) -> Self {
        q.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::try_new("How many cases mention arbitration?").unwrap();
        assert_eq!(q.content(), "How many cases mention arbitration?");
    }

    #[test]
    fn test_question_is_trimmed() {
        let q = Question::try_new("  What is res judicata?\n").unwrap();
        assert_eq!(q.content(), "What is res judicata?");
    }

    #[test]
    fn test_try_new_empty() {
        assert!(Question::try_new("").is_err());
        assert!(matches!(
            Question::try_new("   \t"),
            Err(DomainError::InvalidQuestion(_))
        ));
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        assert!(serde_json::from_str::<Question>("\"  \"").is_err());
        let q: Question = serde_json::from_str("\"Article 21\"").unwrap();
        assert_eq!(q.content(), "Article 21");
    }
}
