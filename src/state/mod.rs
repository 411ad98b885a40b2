//! State module for tracking crawl progress
//!
//! - `TaskOutcome`: how a single fetch task ended (emitted, skipped, failed)

mod task_outcome;

pub use task_outcome::TaskOutcome;
