//! Candidate answers from the generator models

use crate::core::model::Model;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Answer from a single generator model
///
/// A failed generation is still a candidate: it carries an error marker
/// that the judge sees alongside the real answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateAnswer {
    /// The model that produced this candidate
    pub model: Model,
    /// The answer text (empty on failure)
    pub content: String,
    /// Error message if the model failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CandidateAnswer {
    pub fn success(model: Model, content: impl Into<String>) -> Self {
        Self {
            model,
            content: content.into(),
            error: None,
        }
    }

    pub fn failure(model: Model, error: impl Into<String>) -> Self {
        Self {
            model,
            content: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Text shown to the judge: the answer, or the error marker.
    pub fn prompt_text(&self) -> String {
        match &self.error {
            None => self.content.clone(),
            Some(e) => format!("[Error from {}: {}]", self.model, e),
        }
    }
}

/// Exactly one candidate per configured generator, in configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSet {
    candidates: Vec<CandidateAnswer>,
}

impl CandidateSet {
    /// Assemble a set from whatever results arrived.
    ///
    /// Duplicate model ids collapse to one entry; a model with no result
    /// gets an error-marked candidate.
    pub fn assemble(models: &[Model], mut results: HashMap<Model, CandidateAnswer>) -> Self {
        let mut candidates: Vec<CandidateAnswer> = Vec::with_capacity(models.len());
        for model in models {
            if candidates.iter().any(|c| &c.model == model) {
                continue;
            }
            let candidate = results
                .remove(model)
                .unwrap_or_else(|| CandidateAnswer::failure(model.clone(), "no response"));
            candidates.push(candidate);
        }
        Self { candidates }
    }

    pub fn get(&self, model: &Model) -> Option<&CandidateAnswer> {
        self.candidates.iter().find(|c| &c.model == model)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateAnswer> {
        self.candidates.iter()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn successful(&self) -> impl Iterator<Item = &CandidateAnswer> {
        self.candidates.iter().filter(|c| c.is_success())
    }

    pub fn failed_count(&self) -> usize {
        self.candidates.iter().filter(|c| !c.is_success()).count()
    }

    /// True when no candidate carries a usable answer (including the empty set).
    pub fn has_no_viable_candidate(&self) -> bool {
        self.successful().next().is_none()
    }
}
