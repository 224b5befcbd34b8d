//! Model value object representing an LLM model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Chat models known to the answering pipeline (Value Object)
///
/// Any identifier the OpenAI-compatible endpoint accepts can be used
/// through [`Model::Custom`]; the named variants are the defaults the
/// legal corpus was tuned against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // OpenAI models
    Gpt41,
    Gpt41Mini,
    Gpt41Nano,
    Gpt4oMini,
    // Open-weight / hosted models
    Llama3_8b,
    NovaMicro,
    Gemini25Flash,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt41 => "gpt-4.1",
            Model::Gpt41Mini => "gpt-4.1-mini",
            Model::Gpt41Nano => "gpt-4.1-nano",
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Llama3_8b => "llama3-8b-8192",
            Model::NovaMicro => "nova-micro",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Custom(s) => s,
        }
    }

    /// Default set of independent answer generators
    pub fn default_generators() -> Vec<Model> {
        vec![Model::Llama3_8b, Model::NovaMicro, Model::Gemini25Flash]
    }

    /// Check if this is an OpenAI GPT model
    pub fn is_gpt(&self) -> bool {
        matches!(
            self,
            Model::Gpt41 | Model::Gpt41Mini | Model::Gpt41Nano | Model::Gpt4oMini
        )
    }
}

impl Default for Model {
    /// Returns the default model (gpt-4.1-nano), used for SQL and judging
    fn default() -> Self {
        Model::Gpt41Nano
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.trim() {
            "gpt-4.1" => Model::Gpt41,
            "gpt-4.1-mini" => Model::Gpt41Mini,
            "gpt-4.1-nano" => Model::Gpt41Nano,
            "gpt-4o-mini" => Model::Gpt4oMini,
            "llama3-8b-8192" => Model::Llama3_8b,
            "nova-micro" => Model::NovaMicro,
            "gemini-2.5-flash" => Model::Gemini25Flash,
            other => Model::Custom(other.to_string()),
        }
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::from(s))
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}
