//! Output module for crawl statistics
//!
//! The termination detector tallies task outcomes into a [`CrawlStats`], which
//! is delivered with the completion signal.

pub mod stats;

pub use stats::{print_statistics, CrawlStats};
