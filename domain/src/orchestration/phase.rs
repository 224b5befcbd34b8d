//! Pipeline phases and the transaction state machine

use serde::{Deserialize, Serialize};

/// A working phase of one answering transaction.
///
/// `SqlGenerating` and `Retrieving` run concurrently; the other phases
/// are strictly sequential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// NL-to-SQL generation and execution
    SqlGenerating,
    /// Vector + keyword lookup
    Retrieving,
    /// Per-model candidate generation
    Generating,
    /// Judge call
    Arbitrating,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::SqlGenerating => "sql",
            Phase::Retrieving => "retrieval",
            Phase::Generating => "generation",
            Phase::Arbitrating => "arbitration",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::SqlGenerating => "Structured Query",
            Phase::Retrieving => "Hybrid Retrieval",
            Phase::Generating => "Candidate Answers",
            Phase::Arbitrating => "Arbitration",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// State of one answering transaction
///
/// `Start -> SqlGenerating -> Retrieving -> Generating -> Arbitrating -> Done`,
/// with `Failed` reachable from any non-terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineState {
    Start,
    Running(Phase),
    Done,
    Failed(String),
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed(_))
    }

    fn rank(&self) -> u8 {
        match self {
            PipelineState::Start => 0,
            PipelineState::Running(Phase::SqlGenerating) => 1,
            PipelineState::Running(Phase::Retrieving) => 2,
            PipelineState::Running(Phase::Generating) => 3,
            PipelineState::Running(Phase::Arbitrating) => 4,
            PipelineState::Done | PipelineState::Failed(_) => 5,
        }
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_advance_to(&self, next: &PipelineState) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            PipelineState::Failed(_) => true,
            PipelineState::Done => matches!(self, PipelineState::Running(Phase::Arbitrating)),
            _ => next.rank() == self.rank() + 1,
        }
    }

    /// Move to `next`, returning false (and staying put) on an illegal move.
    pub fn advance(&mut self, next: PipelineState) -> bool {
        if self.can_advance_to(&next) {
            *self = next;
            true
        } else {
            false
        }
    }
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineState::Start => write!(f, "start"),
            PipelineState::Running(phase) => write!(f, "{}", phase.as_str()),
            PipelineState::Done => write!(f, "done"),
            PipelineState::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut state = PipelineState::Start;
        for phase in [
            Phase::SqlGenerating,
            Phase::Retrieving,
            Phase::Generating,
            Phase::Arbitrating,
        ] {
            assert!(state.advance(PipelineState::Running(phase)));
        }
        assert!(state.advance(PipelineState::Done));
        assert!(state.is_terminal());
    }

    #[test]
    fn test_failed_reachable_from_any_state() {
        for state in [
            PipelineState::Start,
            PipelineState::Running(Phase::Retrieving),
            PipelineState::Running(Phase::Arbitrating),
        ] {
            assert!(state.can_advance_to(&PipelineState::Failed("x".into())));
        }
    }

    #[test]
    fn test_illegal_moves() {
        let mut state = PipelineState::Start;
        assert!(!state.advance(PipelineState::Running(Phase::Generating)));
        assert!(!state.advance(PipelineState::Done));
        assert_eq!(state, PipelineState::Start);

        let done = PipelineState::Done;
        assert!(!done.can_advance_to(&PipelineState::Failed("late".into())));
    }
}
