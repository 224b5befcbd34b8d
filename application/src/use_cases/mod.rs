//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod answer_question;
pub mod arbitrate;
pub mod execute_query;
pub mod generate_candidates;
pub mod generate_sql;
pub mod hybrid_retrieve;
pub(crate) mod shared;
#[cfg(test)]
pub(crate) mod test_support;
