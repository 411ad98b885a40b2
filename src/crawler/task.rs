//! Fetch tasks
//!
//! A fetch task handles one URL at one remaining depth. It claims the URL,
//! fetches it, emits the page, and spawns a child task per extracted link at
//! one less depth. Every task reports exactly one finish event, whatever path
//! it leaves by.

use crate::crawler::extractor::links_in_page;
use crate::crawler::termination::TaskReporter;
use crate::crawler::{Fetcher, PageResult, VisitedSet};
use crate::state::TaskOutcome;
use crate::url::{ensure_fetchable, normalize_url};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Spawns fetch tasks and accounts for them with the termination detector
///
/// Cloned into every task; each clone shares the fetcher, the visited set,
/// the result stream and the event channel of one crawl.
#[derive(Clone)]
pub(crate) struct TaskSpawner {
    fetcher: Arc<dyn Fetcher>,
    visited: Arc<VisitedSet>,
    results: mpsc::Sender<PageResult>,
    reporter: TaskReporter,
}

impl TaskSpawner {
    pub(crate) fn new(
        fetcher: Arc<dyn Fetcher>,
        visited: Arc<VisitedSet>,
        results: mpsc::Sender<PageResult>,
        reporter: TaskReporter,
    ) -> Self {
        Self {
            fetcher,
            visited,
            results,
            reporter,
        }
    }

    /// Spawns the seed task, which the detector already counts as started
    pub(crate) fn spawn_seed(self, url: String, depth: i32) {
        tokio::spawn(run(self, url, depth));
    }

    /// Reports a start event, then spawns a child task
    pub(crate) fn spawn_child(&self, url: String, depth: i32) {
        self.reporter.report_started();
        tokio::spawn(run(self.clone(), url, depth));
    }
}

/// Runs one task to completion and reports its finish event
async fn run(spawner: TaskSpawner, url: String, depth: i32) {
    let guard = spawner.reporter.finish_guard();
    let outcome = fetch_and_follow(&spawner, &url, depth).await;
    tracing::trace!("Task for {} at depth {} ended: {}", url, depth, outcome);
    guard.finish(outcome);
}

/// The body of a fetch task
///
/// # Steps
///
/// 1. Stop if the depth budget is used up
/// 2. Parse the URL; stop if malformed
/// 3. Stop unless the scheme is http or https
/// 4. Claim the URL; stop if another task already has it
/// 5. Fetch the body; stop on transport or read errors
/// 6. Emit the page on the result stream, waiting for room
/// 7. Parse the body and extract links
/// 8. Spawn one child task per link at `depth - 1`
async fn fetch_and_follow(spawner: &TaskSpawner, url_str: &str, depth: i32) -> TaskOutcome {
    if depth <= 0 {
        tracing::debug!("Depth exhausted at {}", url_str);
        return TaskOutcome::DepthExhausted;
    }

    let url = match normalize_url(url_str) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Skipping {}: {}", url_str, e);
            return TaskOutcome::InvalidUrl;
        }
    };

    if let Err(e) = ensure_fetchable(&url) {
        tracing::debug!("Not fetching {}: {}", url, e);
        return TaskOutcome::SchemeRejected;
    }

    if !spawner.visited.try_claim(url.as_str()) {
        tracing::debug!("Already visited {}", url);
        return TaskOutcome::AlreadyVisited;
    }

    tracing::debug!("Fetching {} (depth {})", url, depth);
    let bytes = match spawner.fetcher.fetch(&url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("{}", e);
            return if e.is_read() {
                TaskOutcome::ReadFailed
            } else {
                TaskOutcome::TransportFailed
            };
        }
    };
    let body = String::from_utf8_lossy(&bytes).into_owned();

    let page = PageResult {
        url: url_str.to_string(),
        body: body.clone(),
    };
    if spawner.results.send(page).await.is_err() {
        tracing::warn!("Result stream closed, dropping {}", url);
        return TaskOutcome::ConsumerGone;
    }

    let links = links_in_page(&body, &url);
    tracing::debug!("Found {} links on {}", links.len(), url);

    for link in links {
        spawner.spawn_child(link, depth - 1);
    }

    TaskOutcome::Emitted
}
