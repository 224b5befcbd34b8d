//! CLI entrypoint for jurisrag
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use jurisrag_application::{
    AnswerQuestionInput, AnswerQuestionUseCase, ArbitrateUseCase, AuditLogger,
    ExecuteQueryUseCase, GenerateCandidatesUseCase, GenerateSqlUseCase, HybridRetrieveUseCase,
    NoAuditLogger,
};
use jurisrag_domain::{
    ConfigIssue, Model, ModelRoles, OutputFormat, Question, Severity, SqlAllowlist, SqlValidator,
};
use jurisrag_infrastructure::{
    ConfigLoader, ElasticsearchIndex, FileConfig, JsonlAuditLogger, OpenAiClient, OpenAiEmbedder,
    OpenAiGateway, PineconeIndex, SqliteChunkStore,
};
use jurisrag_presentation::{Cli, ConsoleFormatter, ProgressReporter};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Console logging from `-v`, `RUST_LOG` taking precedence; optional
/// daily rolling file. The returned guard must live until exit.
fn init_tracing(verbose: u8, log_dir: Option<&PathBuf>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "jurisrag.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}

fn report_issues(issues: &[ConfigIssue]) -> Result<()> {
    for issue in issues {
        match issue.severity {
            Severity::Warning => eprintln!("warning: {}", issue.message),
            Severity::Error => eprintln!("error: {}", issue.message),
        }
    }
    if ConfigIssue::has_errors(issues) {
        bail!("Invalid configuration");
    }
    Ok(())
}

/// Apply CLI overrides on top of the file configuration.
fn model_roles(cli: &Cli, config: &FileConfig) -> ModelRoles {
    let (mut roles, _) = config.models.to_model_roles();
    if !cli.generators.is_empty() {
        let generators = cli.generators.iter().map(|s| Model::from(s.as_str()));
        roles = roles.with_generators(generators.collect());
    }
    if let Some(judge) = &cli.judge {
        roles = roles.with_judge(Model::from(judge.as_str()));
    }
    if let Some(sql) = &cli.sql_model {
        roles = roles.with_sql(Model::from(sql.as_str()));
    }
    roles
}

fn audit_logger(cli: &Cli, config: &FileConfig) -> Arc<dyn AuditLogger> {
    let path = cli
        .audit_log
        .clone()
        .or_else(|| config.logging.audit_log_path().map(PathBuf::from));
    let Some(path) = path else {
        return Arc::new(NoAuditLogger);
    };
    match JsonlAuditLogger::open(&path) {
        Ok(logger) => {
            info!("SQL audit log: {}", logger.path().display());
            Arc::new(logger)
        }
        Err(e) => {
            warn!("Could not open audit log {}: {}", path.display(), e);
            Arc::new(NoAuditLogger)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_tracing(cli.verbose, cli.log_dir.as_ref());

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    info!("Starting jurisrag");

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    if let Some(top_k) = cli.top_k {
        config.retrieval.top_k = top_k;
    }
    report_issues(&config.validate())?;

    let question = match &cli.question {
        Some(q) => Question::try_new(q.as_str())?,
        None => bail!("Question is required. Run with --help for examples."),
    };

    let roles = model_roles(&cli, &config);
    roles.ensure_generators()?;

    let params = config.pipeline_params();
    let timeouts = config.timeouts.to_timeouts();
    let audit = audit_logger(&cli, &config);

    // === Dependency Injection ===
    let client = Arc::new(
        OpenAiClient::from_env(&config.provider.base_url, &config.provider.api_key_env)
            .context("Chat provider unavailable")?,
    );
    let gateway = Arc::new(
        OpenAiGateway::new(client.clone()).with_temperature(config.provider.temperature),
    );
    let embedder = Arc::new(OpenAiEmbedder::new(
        client,
        config.provider.embedding_model.clone(),
        config.provider.embedding_dimensions,
    ));

    let validator = SqlValidator::new(SqlAllowlist::chunks_table(config.store.table.clone())?);
    let generate_sql = GenerateSqlUseCase::new(gateway.clone(), validator)
        .with_policy(config.sql.retry_policy())
        .with_audit_logger(audit.clone())
        .with_max_tokens(params.sql_max_tokens)
        .with_timeouts(timeouts);

    let store = Arc::new(SqliteChunkStore::new(&config.store.path));
    let execute_query = ExecuteQueryUseCase::new(store)
        .with_audit_logger(audit)
        .with_timeout(timeouts.store);

    let mut retrieve = HybridRetrieveUseCase::new(embedder)
        .with_deduplicate(params.deduplicate)
        .with_timeout(timeouts.index);
    if config.vector_index.is_configured() {
        match PineconeIndex::from_env(&config.vector_index.host, &config.vector_index.api_key_env)
        {
            Ok(index) => {
                let index = index.with_namespace(&config.vector_index.namespace);
                retrieve = retrieve.with_vector_index(Arc::new(index));
            }
            Err(e) => warn!("Vector index disabled: {}", e),
        }
    }
    match ElasticsearchIndex::new(&config.keyword_index.url, &config.keyword_index.index) {
        Ok(index) => retrieve = retrieve.with_keyword_index(Arc::new(index)),
        Err(e) => warn!("Keyword index disabled: {}", e),
    }

    let generate_candidates = GenerateCandidatesUseCase::new(gateway.clone())
        .with_max_tokens(params.answer_max_tokens)
        .with_timeout(timeouts.llm);
    let arbitrate = ArbitrateUseCase::new(gateway)
        .with_max_tokens(params.judge_max_tokens)
        .with_timeout(timeouts.llm);

    let use_case = AnswerQuestionUseCase::new(
        generate_sql,
        execute_query,
        retrieve,
        generate_candidates,
        arbitrate,
    )
    .with_params(params);

    let format = OutputFormat::from(cli.output);
    let input = AnswerQuestionInput::new(question, roles);

    // JSON output stays machine-readable, so no progress bars
    let report = if cli.quiet || format == OutputFormat::Json {
        use_case.execute(input).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    };

    print!("{}", ConsoleFormatter::render(&report, format));

    Ok(())
}
