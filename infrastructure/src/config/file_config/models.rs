//! Role-based model configuration from TOML (`[models]` section)

use jurisrag_domain::{ConfigIssue, ConfigIssueCode, Model, ModelRoles};
use serde::{Deserialize, Serialize};

/// Role-based model configuration from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// sql = "gpt-4.1-nano"                    # NL-to-SQL
/// generators = ["llama3-8b-8192", "nova-micro", "gemini-2.5-flash"]
/// judge = "gpt-4.1-nano"                  # Arbitration
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model for NL-to-SQL generation
    pub sql: String,
    /// Models producing candidate answers
    pub generators: Vec<String>,
    /// Model for arbitration
    pub judge: String,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        let roles = ModelRoles::default();
        Self {
            sql: roles.sql.to_string(),
            generators: roles.generators.iter().map(|m| m.to_string()).collect(),
            judge: roles.judge.to_string(),
        }
    }
}

impl FileModelsConfig {
    fn empty_name(field: &str) -> ConfigIssue {
        ConfigIssue::error(
            ConfigIssueCode::EmptyModelName {
                field: field.to_string(),
            },
            format!("models.{}: model name cannot be empty", field),
        )
    }

    fn parse_single_model(field: &str, value: &str) -> (Option<Model>, Vec<ConfigIssue>) {
        if value.trim().is_empty() {
            return (None, vec![Self::empty_name(field)]);
        }
        (Some(Model::from(value)), Vec::new())
    }

    /// Parse the SQL model
    pub fn parse_sql(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("sql", &self.sql)
    }

    /// Parse the judge model
    pub fn parse_judge(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("judge", &self.judge)
    }

    /// Parse generator models, skipping empty names
    pub fn parse_generators(&self) -> (Vec<Model>, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut models = Vec::new();
        for name in &self.generators {
            if name.trim().is_empty() {
                issues.push(Self::empty_name("generators"));
            } else {
                models.push(Model::from(name.as_str()));
            }
        }
        (models, issues)
    }

    /// Build [`ModelRoles`], falling back to defaults for unusable single fields.
    pub fn to_model_roles(&self) -> (ModelRoles, Vec<ConfigIssue>) {
        let defaults = ModelRoles::default();
        let (sql, mut issues) = self.parse_sql();
        let (judge, judge_issues) = self.parse_judge();
        let (generators, generator_issues) = self.parse_generators();
        issues.extend(judge_issues);
        issues.extend(generator_issues);

        let roles = ModelRoles {
            sql: sql.unwrap_or(defaults.sql),
            generators,
            judge: judge.unwrap_or(defaults.judge),
        };
        (roles, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_models_config_defaults() {
        let config = FileModelsConfig::default();
        assert_eq!(config.sql, "gpt-4.1-nano");
        assert_eq!(config.judge, "gpt-4.1-nano");
        assert_eq!(
            config.generators,
            vec!["llama3-8b-8192", "nova-micro", "gemini-2.5-flash"]
        );
    }

    #[test]
    fn test_models_config_deserialize() {
        let toml_str = r#"
[models]
judge = "gpt-4.1-mini"
generators = ["gpt-4o-mini", "my-local-model"]
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let (roles, issues) = config.models.to_model_roles();
        assert!(issues.is_empty());
        assert_eq!(roles.judge, Model::Gpt41Mini);
        assert_eq!(roles.sql, Model::Gpt41Nano);
        assert_eq!(
            roles.generators,
            vec![
                Model::Gpt4oMini,
                Model::Custom("my-local-model".to_string())
            ]
        );
    }

    #[test]
    fn test_empty_names_are_reported() {
        let config = FileModelsConfig {
            sql: " ".to_string(),
            generators: vec!["nova-micro".to_string(), "".to_string()],
            judge: "gpt-4.1".to_string(),
        };
        let (roles, issues) = config.to_model_roles();
        assert_eq!(roles.sql, Model::Gpt41Nano);
        assert_eq!(roles.generators, vec![Model::NovaMicro]);
        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::EmptyModelName {
                field: "sql".to_string()
            }
        );
    }
}
