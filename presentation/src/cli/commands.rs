//! CLI command definitions

use clap::{Parser, ValueEnum};
use jurisrag_domain::OutputFormat;
use std::path::PathBuf;

/// Output format for answer reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputArg {
    /// SQL, evidence, candidates and the final answer
    Full,
    /// Only the final answer
    Answer,
    /// The whole report as JSON
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Full => OutputFormat::Full,
            OutputArg::Answer => OutputFormat::Answer,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for jurisrag
#[derive(Parser, Debug)]
#[command(name = "jurisrag")]
#[command(author, version, about = "Question answering over a corpus of court judgments")]
#[command(long_about = r#"
jurisrag answers questions about court judgments by combining three sources:

1. Structured data: a model writes one SELECT over the chunk table; it is
   validated against an allowlist before it runs read-only
2. Evidence: vector and keyword search over judgment chunks
3. Candidates: several models answer from that context, and a judge model
   picks or merges the best answer

Configuration files are loaded from (in priority order):
1. JURISRAG_* environment variables (e.g. JURISRAG_RETRIEVAL__TOP_K=8)
2. --config <path>       Explicit config file
3. ./jurisrag.toml       Project-level config
4. ~/.config/jurisrag/config.toml   Global config

Example:
  jurisrag "How many distinct cases were decided between 1950 and 1960?"
  jurisrag "Which cases involve wrongful termination?" -o answer
  jurisrag -g gpt-4o-mini -g nova-micro --judge gpt-4.1 "Summarise remedies for breach of contract"
"#)]
pub struct Cli {
    /// The question to answer
    pub question: Option<String>,

    /// Generator models (can be specified multiple times, replaces the configured list)
    #[arg(short, long = "generator", value_name = "MODEL")]
    pub generators: Vec<String>,

    /// Model to use as judge
    #[arg(long, value_name = "MODEL")]
    pub judge: Option<String>,

    /// Model that writes the SQL query
    #[arg(long, value_name = "MODEL")]
    pub sql_model: Option<String>,

    /// Documents to fetch from each retrieval source
    #[arg(long, value_name = "N")]
    pub top_k: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputArg,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Directory for daily rolling log files
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// JSONL file for the SQL audit trail (overrides logging.audit_log)
    #[arg(long, value_name = "PATH")]
    pub audit_log: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::try_parse_from([
            "jurisrag",
            "-g",
            "gpt-4o-mini",
            "--generator",
            "nova-micro",
            "--judge",
            "gpt-4.1",
            "--top-k",
            "8",
            "-o",
            "json",
            "-vv",
            "How many cases?",
        ])
        .unwrap();
        assert_eq!(cli.question.as_deref(), Some("How many cases?"));
        assert_eq!(cli.generators, vec!["gpt-4o-mini", "nova-micro"]);
        assert_eq!(cli.judge.as_deref(), Some("gpt-4.1"));
        assert_eq!(cli.top_k, Some(8));
        assert_eq!(OutputFormat::from(cli.output), OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["jurisrag", "q"]).unwrap();
        assert!(cli.generators.is_empty());
        assert_eq!(OutputFormat::from(cli.output), OutputFormat::Full);
        assert!(!cli.quiet);
        assert!(!cli.no_config);
    }

    #[test]
    fn test_unknown_output_rejected() {
        assert!(Cli::try_parse_from(["jurisrag", "-o", "yaml", "q"]).is_err());
    }
}
