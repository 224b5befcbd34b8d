//! Prompt templates for the answering pipeline

use crate::answer::candidate::CandidateSet;
use crate::sql::allowlist::SqlAllowlist;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for NL-to-SQL generation
    pub fn sql_system(allowlist: &SqlAllowlist) -> String {
        format!(
            r#"You are a careful assistant that converts plain English legal questions into a single, safe SQLite SELECT statement.
Use only the table named '{}' and only these columns: {}.
Return only a single SELECT statement (SQLite dialect). Use COUNT, SUM, AVG, GROUP BY when appropriate.
Use LIKE for substring/statute matching and BETWEEN for ranges.
If counting cases, prefer COUNT(DISTINCT case_id).
Do NOT return any DDL or DML (no CREATE/INSERT/UPDATE/DELETE/DROP). Do not use semicolons, and do not include explanation. Only return the SQL."#,
            allowlist.table(),
            allowlist.column_list()
        )
    }

    /// User prompt for NL-to-SQL generation
    pub fn sql_query(question: &str, allowlist: &SqlAllowlist) -> String {
        format!(
            "Question: {}\n\nSchema: Table {} with columns {}.\n\nReturn only the SQL SELECT statement.",
            question,
            allowlist.table(),
            allowlist.column_list()
        )
    }

    /// System prompt for candidate answer generation
    pub fn answer_system() -> &'static str {
        "You are a helpful legal assistant."
    }

    /// User prompt for candidate answer generation
    pub fn answer_query(question: &str, context: &str, structured_json: &str) -> String {
        format!(
            "Question: {}\n\nContext:\n{}\n\nStructured Data:\n{}",
            question, context, structured_json
        )
    }

    /// System prompt for arbitration
    pub fn judge_system() -> &'static str {
        "You are a fair evaluator."
    }

    /// User prompt for arbitration
    ///
    /// Error-marked candidates are included so the judge sees which
    /// models failed.
    pub fn judge_prompt(
        question: &str,
        context: &str,
        structured_json: &str,
        candidates: &CandidateSet,
    ) -> String {
        let mut prompt = format!(
            r#"You are a judge. The user asked: {}

Context:
{}

SQL Results:
{}

Candidate Answers:
"#,
            question, context, structured_json
        );

        for candidate in candidates.iter() {
            prompt.push_str(&format!(
                "\n--- {} ---\n{}\n",
                candidate.model,
                candidate.prompt_text()
            ));
        }

        prompt.push_str(
            r#"
Task: Pick the best answer (accurate, clear, faithful). Merge if useful.
Return only the final answer."#,
        );

        prompt
    }
}
