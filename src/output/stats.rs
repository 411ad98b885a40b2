//! Crawl statistics
//!
//! Counters collected by the termination detector over one crawl.

use crate::state::TaskOutcome;
use std::collections::BTreeMap;

/// Totals for one finished crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Tasks started, including the seed task
    pub tasks_started: u64,

    /// Tasks that reported their finish event
    pub tasks_finished: u64,

    /// Finished tasks grouped by outcome
    pub outcomes: BTreeMap<TaskOutcome, u64>,
}

impl CrawlStats {
    /// Creates an empty set of statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one finished task with the given outcome
    pub fn record(&mut self, outcome: TaskOutcome) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
    }

    /// Number of tasks that ended with `outcome`
    pub fn count(&self, outcome: TaskOutcome) -> u64 {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Number of pages delivered on the result stream
    pub fn pages_emitted(&self) -> u64 {
        self.count(TaskOutcome::Emitted)
    }

    /// Number of tasks that ended in an error outcome
    pub fn errors(&self) -> u64 {
        self.outcomes
            .iter()
            .filter(|(outcome, _)| outcome.is_error())
            .map(|(_, count)| count)
            .sum()
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStats) {
    println!("=== Crawl Statistics ===\n");

    println!("Tasks:");
    println!("  Started: {}", stats.tasks_started);
    println!("  Finished: {}", stats.tasks_finished);
    println!();

    println!("Tasks by Outcome:");
    let mut outcome_counts: Vec<_> = stats.outcomes.iter().collect();
    outcome_counts.sort_by(|a, b| b.1.cmp(a.1));

    for (outcome, count) in outcome_counts {
        let percentage = if stats.tasks_finished > 0 {
            (*count as f64 / stats.tasks_finished as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", outcome, count, percentage);
    }
    println!();

    println!(
        "Pages emitted: {} ({} errors)",
        stats.pages_emitted(),
        stats.errors()
    );
}
