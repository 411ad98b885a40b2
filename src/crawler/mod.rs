//! Crawler module for concurrent, depth-bounded page fetching
//!
//! This module contains the core crawling logic, including:
//! - The fetch capability and its HTTP implementation
//! - Link extraction from parsed HTML
//! - The shared visited set
//! - Fetch tasks that recursively spawn one task per discovered link
//! - Termination detection over a dynamically growing set of tasks
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod task;
mod termination;
mod visited;

pub use coordinator::{crawl, Coordinator, CrawlHandle, CrawlRequest, PageResult};
pub use extractor::{extract_links, links_in_page, parse_document};
pub use fetcher::{build_http_client, Fetcher, HttpFetcher};
pub use termination::{
    termination_channel, FinishGuard, TaskCounters, TaskEvent, TaskReporter, TerminationDetector,
};
pub use visited::VisitedSet;
