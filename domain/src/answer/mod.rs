//! Candidate and final answers

pub mod candidate;
pub mod final_answer;

pub use candidate::{CandidateAnswer, CandidateSet};
pub use final_answer::FinalAnswer;
