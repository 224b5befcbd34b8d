//! Console output formatter for answer reports

use colored::Colorize;
use jurisrag_domain::{
    AnswerReport, OutputFormat, RetrievalOutcome, StructuredOutcome, truncate_str,
};

/// Characters of each evidence chunk shown in full output
const EVIDENCE_PREVIEW_CHARS: usize = 160;
/// Structured rows shown in full output
const PREVIEW_ROWS: usize = 10;

/// Formats answer reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render a report in the requested format
    pub fn render(report: &AnswerReport, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(report),
            OutputFormat::Answer => Self::format_answer_only(report),
            OutputFormat::Json => Self::format_json(report),
        }
    }

    /// Format the complete report
    pub fn format(report: &AnswerReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("jurisrag"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Question:".cyan().bold(),
            report.question
        ));

        // Structured data
        output.push_str(&Self::section_header("Structured Query"));
        match &report.sql {
            Some(sql) => output.push_str(&format!(
                "{} {} {}\n",
                "SQL:".bold(),
                sql,
                format!("(attempt {})", sql.attempt()).dimmed()
            )),
            None => output.push_str(&format!("{}\n", "No SQL accepted".yellow())),
        }
        match &report.structured_outcome {
            StructuredOutcome::Answered => {
                output.push_str(&format!(
                    "{} {}\n",
                    "Rows:".bold(),
                    report.structured.row_count()
                ));
                if !report.structured.is_empty() {
                    output.push_str(&report.structured.to_prompt_json(PREVIEW_ROWS));
                    output.push('\n');
                }
            }
            StructuredOutcome::GenerationExhausted { attempts } => output.push_str(&format!(
                "{}\n",
                format!("Gave up after {} attempts; no structured data used", attempts).yellow()
            )),
            StructuredOutcome::ExecutionFailed { message } => output.push_str(&format!(
                "{} {}\n",
                "Execution failed:".red(),
                message
            )),
        }

        // Evidence
        output.push_str(&Self::section_header("Evidence"));
        match &report.retrieval_outcome {
            RetrievalOutcome::Complete => {}
            RetrievalOutcome::Partial { failed, message } => output.push_str(&format!(
                "{}\n",
                format!("{} search failed: {}", failed, message).yellow()
            )),
            RetrievalOutcome::Unavailable => {
                output.push_str(&format!("{}\n", "Both retrieval sources failed".red()))
            }
        }
        if report.evidence.is_empty() {
            output.push_str(&format!("{}\n", "No documents retrieved".dimmed()));
        }
        for doc in report.evidence.iter() {
            output.push_str(&format!(
                "  {} {} {}\n    {}\n",
                format!("[{}]", doc.source).blue(),
                doc.id.bold(),
                format!("score {:.3}", doc.score).dimmed(),
                truncate_str(&doc.text, EVIDENCE_PREVIEW_CHARS).replace('\n', " ")
            ));
        }

        // Candidates
        output.push_str(&Self::section_header("Candidate Answers"));
        for candidate in report.candidates.iter() {
            match &candidate.error {
                None => output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("── {} ──", candidate.model).yellow().bold(),
                    candidate.content
                )),
                Some(error) => output.push_str(&format!(
                    "\n{}\nError: {}\n",
                    format!("── {} ──", candidate.model).red().bold(),
                    error
                )),
            }
        }

        // Final answer
        output.push_str(&Self::section_header("Final Answer"));
        output.push_str(&format!(
            "\n{}\n\n{}\n",
            format!("Judge: {}", report.answer.judge).yellow().bold(),
            report.answer
        ));

        if report.is_degraded() {
            output.push_str(&format!(
                "\n{}\n",
                "Note: some context was unavailable for this answer.".dimmed()
            ));
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(report: &AnswerReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the final answer only
    pub fn format_answer_only(report: &AnswerReport) -> String {
        format!("{}\n", report.answer)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jurisrag_domain::{
        CandidateAnswer, CandidateSet, EvidenceSource, FinalAnswer, GeneratedSql, Model,
        QueryResult, Question, RankedEvidenceSet, RetrievedDocument, SqlValidator,
    };
    use serde_json::{Map, json};
    use std::collections::HashMap;

    fn report() -> AnswerReport {
        let models = vec![Model::NovaMicro, Model::Gpt4oMini];
        let mut results = HashMap::new();
        results.insert(
            Model::NovaMicro,
            CandidateAnswer::success(Model::NovaMicro, "Two cases."),
        );
        results.insert(
            Model::Gpt4oMini,
            CandidateAnswer::failure(Model::Gpt4oMini, "timeout"),
        );

        let mut row = Map::new();
        row.insert("n".to_string(), json!(2));

        AnswerReport {
            question: Question::try_new("How many cases?").unwrap(),
            sql: SqlValidator::default()
                .accept(GeneratedSql::new(
                    "SELECT COUNT(DISTINCT case_id) FROM chunks",
                    1,
                ))
                .ok(),
            structured: QueryResult::new(vec!["n".to_string()], vec![row]),
            structured_outcome: StructuredOutcome::Answered,
            evidence: RankedEvidenceSet::merge(
                vec![RetrievedDocument::new("v1", EvidenceSource::Vector, 0.9, "vector text")],
                vec![],
            ),
            retrieval_outcome: RetrievalOutcome::Partial {
                failed: EvidenceSource::Keyword,
                message: "timeout".to_string(),
            },
            candidates: CandidateSet::assemble(&models, results),
            answer: FinalAnswer::try_new(Model::Gpt41Nano, "There are two cases.").unwrap(),
        }
    }

    #[test]
    fn test_full_output_sections() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::render(&report(), OutputFormat::Full);
        assert!(output.contains("SQL: SELECT COUNT(DISTINCT case_id) FROM chunks (attempt 1)"));
        assert!(output.contains("Rows: 1"));
        assert!(output.contains("keyword search failed: timeout"));
        assert!(output.contains("[vector] v1"));
        assert!(output.contains("── nova-micro ──\nTwo cases."));
        assert!(output.contains("Error: timeout"));
        assert!(output.contains("Judge: gpt-4.1-nano"));
        assert!(output.contains("There are two cases."));
        assert!(output.contains("some context was unavailable"));
    }

    #[test]
    fn test_answer_only() {
        let output = ConsoleFormatter::render(&report(), OutputFormat::Answer);
        assert_eq!(output, "There are two cases.\n");
    }

    #[test]
    fn test_json_output_parses() {
        let output = ConsoleFormatter::render(&report(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["structured_outcome"]["status"], "answered");
        assert_eq!(value["retrieval_outcome"]["failed"], "keyword");
    }
}
