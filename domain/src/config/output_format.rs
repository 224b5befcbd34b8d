//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for answer reports
///
/// This is a domain concept representing how the output should be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// SQL, structured rows, evidence, candidates and the final answer
    #[default]
    Full,
    /// Only the final answer
    Answer,
    /// The whole report as JSON
    Json,
}
