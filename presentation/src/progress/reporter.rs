//! Progress reporting while a question is answered

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use jurisrag_application::ProgressNotifier;
use jurisrag_domain::Phase;
use std::collections::HashMap;
use std::sync::Mutex;

/// Reports progress with one bar per phase.
///
/// The structured and retrieval phases overlap, so bars are keyed by
/// phase rather than kept as a single current bar.
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<Phase, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(format!("{:<18}", phase.display_name()));
        pb.set_message("Starting...");

        if let Ok(mut bars) = self.bars.lock() {
            bars.insert(*phase, pb);
        }
    }

    fn on_task_complete(&self, phase: &Phase, task: &str, success: bool) {
        let Ok(bars) = self.bars.lock() else { return };
        if let Some(pb) = bars.get(phase) {
            let status = if success {
                format!("{} {}", "v".green(), task)
            } else {
                format!("{} {}", "x".red(), task)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: &Phase) {
        let Ok(mut bars) = self.bars.lock() else { return };
        if let Some(pb) = bars.remove(phase) {
            pb.finish_with_message(format!("{}", "done".green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            phase.display_name().bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, phase: &Phase, task: &str, success: bool) {
        if success {
            eprintln!("  {} [{}] {}", "v".green(), phase.as_str(), task);
        } else {
            eprintln!("  {} [{}] {} (failed)", "x".red(), phase.as_str(), task);
        }
    }

    fn on_phase_complete(&self, _phase: &Phase) {}
}
