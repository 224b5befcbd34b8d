//! Role-based model configuration.
//!
//! [`ModelRoles`] groups the model selections for the three call shapes.
//! This is a static value object; once created, models don't change at runtime.

use crate::core::error::DomainError;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Role-based model configuration.
///
/// - **SQL**: small model translating the question to one SELECT
/// - **Generators**: independent models answering from the same context
/// - **Judge**: model picking or merging the final answer
///
/// # Example
///
/// ```
/// use jurisrag_domain::{Model, ModelRoles};
///
/// let roles = ModelRoles::default()
///     .with_judge(Model::Gpt41Mini)
///     .with_generators(vec![Model::Gpt41Nano, Model::NovaMicro]);
///
/// assert_eq!(roles.judge, Model::Gpt41Mini);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRoles {
    /// Model for NL-to-SQL generation.
    pub sql: Model,
    /// Models producing candidate answers, in presentation order.
    pub generators: Vec<Model>,
    /// Model for arbitration.
    pub judge: Model,
}

impl Default for ModelRoles {
    fn default() -> Self {
        Self {
            sql: Model::Gpt41Nano,
            generators: Model::default_generators(),
            judge: Model::Gpt41Nano,
        }
    }
}

impl ModelRoles {
    pub fn with_sql(mut self, model: Model) -> Self {
        self.sql = model;
        self
    }

    pub fn with_generators(mut self, models: Vec<Model>) -> Self {
        self.generators = models;
        self
    }

    pub fn with_judge(mut self, model: Model) -> Self {
        self.judge = model;
        self
    }

    /// Generators with duplicates removed, first occurrence wins.
    pub fn distinct_generators(&self) -> Vec<Model> {
        let mut seen = Vec::with_capacity(self.generators.len());
        for model in &self.generators {
            if !seen.contains(model) {
                seen.push(model.clone());
            }
        }
        seen
    }

    pub fn ensure_generators(&self) -> Result<(), DomainError> {
        if self.generators.is_empty() {
            return Err(DomainError::NoModels);
        }
        Ok(())
    }
}
