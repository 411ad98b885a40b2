//! Termination detection for a dynamically growing set of fetch tasks
//!
//! Tasks never touch the counters directly. They report start and finish
//! events over a channel to a single detector loop, which owns the counters and
//! fires the completion signal the moment every started task has finished.
//!
//! A parent reports the start of a child before spawning it. Since the channel
//! is FIFO, that start event is always counted before the child's finish event,
//! so the counters can never balance while work is still outstanding.

use crate::output::CrawlStats;
use crate::state::TaskOutcome;
use tokio::sync::mpsc;

/// An event sent by a fetch task to the termination detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskEvent {
    /// A child task is about to be spawned
    Started,
    /// A task has finished with the given outcome
    Finished(TaskOutcome),
}

/// Counts of started and finished tasks
///
/// Starts at one started task: the seed task counts as started before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskCounters {
    started: u64,
    finished: u64,
}

impl Default for TaskCounters {
    fn default() -> Self {
        Self {
            started: 1,
            finished: 0,
        }
    }
}

impl TaskCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started(&self) -> u64 {
        self.started
    }

    pub fn finished(&self) -> u64 {
        self.finished
    }

    pub fn record_start(&mut self) {
        self.started += 1;
    }

    /// Counts a finished task and returns true if the crawl is now complete
    pub fn record_finish(&mut self) -> bool {
        self.finished += 1;
        debug_assert!(
            self.finished <= self.started,
            "more tasks finished ({}) than started ({})",
            self.finished,
            self.started
        );
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.started == self.finished
    }
}

/// Creates a connected reporter and detector pair
pub fn termination_channel() -> (TaskReporter, TerminationDetector) {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    (
        TaskReporter { events: events_tx },
        TerminationDetector {
            events: events_rx,
            counters: TaskCounters::new(),
            stats: CrawlStats::new(),
        },
    )
}

/// The sending side held by every fetch task
#[derive(Debug, Clone)]
pub struct TaskReporter {
    events: mpsc::UnboundedSender<TaskEvent>,
}

impl TaskReporter {
    /// Reports that a child task is about to be spawned
    ///
    /// Must be called before the child is spawned.
    pub fn report_started(&self) {
        self.send(TaskEvent::Started);
    }

    /// Returns a guard that reports this task's finish event when dropped
    pub fn finish_guard(&self) -> FinishGuard {
        FinishGuard {
            reporter: self.clone(),
            outcome: None,
        }
    }

    fn send(&self, event: TaskEvent) {
        // The detector only stops once every task has finished, so nobody
        // should be left to report anything
        if self.events.send(event).is_err() {
            tracing::error!("Termination detector is gone, dropped {:?}", event);
        }
    }
}

/// Reports exactly one finish event for the task that owns it
///
/// The event is sent on drop, so it goes out on every exit path including an
/// unwinding panic. Without an explicit outcome it reports
/// [`TaskOutcome::Abandoned`].
#[derive(Debug)]
pub struct FinishGuard {
    reporter: TaskReporter,
    outcome: Option<TaskOutcome>,
}

impl FinishGuard {
    /// Consumes the guard, reporting the finish event with `outcome`
    pub fn finish(mut self, outcome: TaskOutcome) {
        self.outcome = Some(outcome);
    }
}

impl Drop for FinishGuard {
    fn drop(&mut self) {
        let outcome = self.outcome.take().unwrap_or(TaskOutcome::Abandoned);
        self.reporter.send(TaskEvent::Finished(outcome));
    }
}

/// Sole owner of the task counters for one crawl
#[derive(Debug)]
pub struct TerminationDetector {
    events: mpsc::UnboundedReceiver<TaskEvent>,
    counters: TaskCounters,
    stats: CrawlStats,
}

impl TerminationDetector {
    /// Processes events until every started task has finished
    ///
    /// Returns the final statistics. Events are handled one at a time, so no
    /// update can be lost.
    pub async fn run(mut self) -> CrawlStats {
        while let Some(event) = self.events.recv().await {
            match event {
                TaskEvent::Started => {
                    self.counters.record_start();
                }
                TaskEvent::Finished(outcome) => {
                    self.stats.record(outcome);
                    if self.counters.record_finish() {
                        tracing::trace!(
                            "Task finished ({}): {}/{}, crawl complete",
                            outcome,
                            self.counters.finished(),
                            self.counters.started()
                        );
                        return self.into_stats();
                    }
                }
            }
            tracing::trace!(
                "Task counters: {} started, {} finished",
                self.counters.started(),
                self.counters.finished()
            );
        }

        tracing::error!(
            "All reporters dropped with {} of {} tasks finished",
            self.counters.finished(),
            self.counters.started()
        );
        self.into_stats()
    }

    fn into_stats(self) -> CrawlStats {
        CrawlStats {
            tasks_started: self.counters.started(),
            tasks_finished: self.counters.finished(),
            outcomes: self.stats.outcomes,
        }
    }
}
