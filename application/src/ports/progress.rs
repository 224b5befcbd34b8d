//! Progress notification port
//!
//! Defines the interface for reporting progress while a question is answered.

use jurisrag_domain::Phase;

/// Callback for progress updates during a transaction
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.).
/// `SqlGenerating` and `Retrieving` are reported concurrently.
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize);

    /// Called when a task (attempt, source or model) completes within a phase
    fn on_task_complete(&self, phase: &Phase, task: &str, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &Phase);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &Phase, _total_tasks: usize) {}
    fn on_task_complete(&self, _phase: &Phase, _task: &str, _success: bool) {}
    fn on_phase_complete(&self, _phase: &Phase) {}
}
