//! Crawler coordinator - crawl orchestration
//!
//! This module seeds the first fetch task, runs the termination detector, and
//! hands the caller a [`CrawlHandle`] carrying the result stream and the
//! completion signal.

use crate::config::Config;
use crate::crawler::task::TaskSpawner;
use crate::crawler::termination::termination_channel;
use crate::crawler::{Fetcher, HttpFetcher, VisitedSet};
use crate::output::CrawlStats;
use crate::CrawlError;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, oneshot};

/// Input to a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    /// The page the crawl starts from
    pub start_url: String,

    /// Maximum traversal depth; the start page is at depth `max_depth`, its
    /// links at `max_depth - 1`, and so on. Zero or less crawls nothing.
    pub max_depth: i32,

    /// Capacity of the result channel; a full channel stalls the sending task
    pub result_buffer: usize,
}

impl CrawlRequest {
    pub fn new(start_url: impl Into<String>, max_depth: i32) -> Self {
        Self {
            start_url: start_url.into(),
            max_depth,
            result_buffer: 1,
        }
    }

    /// Sets the result channel capacity (at least one)
    pub fn with_result_buffer(mut self, result_buffer: usize) -> Self {
        self.result_buffer = result_buffer.max(1);
        self
    }
}

/// A successfully fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// URL of the page, exactly as the task was given it
    pub url: String,

    /// Response body, decoded as UTF-8 with invalid sequences replaced
    pub body: String,
}

/// The caller's side of a running crawl
///
/// Page results arrive in no particular order. The result stream ends once
/// every fetch task has finished, and the completion signal fires exactly once
/// at the same point.
#[derive(Debug)]
pub struct CrawlHandle {
    results: mpsc::Receiver<PageResult>,
    completion: oneshot::Receiver<CrawlStats>,
}

impl CrawlHandle {
    /// Waits for the next page, or `None` once every task has finished
    pub async fn next_result(&mut self) -> Option<PageResult> {
        self.results.recv().await
    }

    /// Waits for the completion signal
    ///
    /// Pages not yet received are discarded. Keep calling
    /// [`next_result`](Self::next_result) until it returns `None` first if
    /// every page matters.
    pub async fn completed(self) -> CrawlStats {
        let CrawlHandle {
            mut results,
            completion,
        } = self;

        // Keep draining so tasks blocked on a full channel can finish
        let drain = tokio::spawn(async move { while results.recv().await.is_some() {} });

        let stats = match completion.await {
            Ok(stats) => stats,
            Err(_) => {
                tracing::error!("Termination detector stopped without signalling completion");
                CrawlStats::default()
            }
        };
        drain.abort();
        stats
    }

    /// Receives every page and then the completion signal
    pub async fn collect(mut self) -> (Vec<PageResult>, CrawlStats) {
        let mut pages = Vec::new();
        while let Some(page) = self.next_result().await {
            pages.push(page);
        }
        let stats = self.completed().await;
        (pages, stats)
    }

    /// Splits the handle into the raw result stream and completion signal
    pub fn into_parts(self) -> (mpsc::Receiver<PageResult>, oneshot::Receiver<CrawlStats>) {
        (self.results, self.completion)
    }
}

/// Main crawler coordinator structure
#[derive(Clone)]
pub struct Coordinator {
    fetcher: Arc<dyn Fetcher>,
}

impl Coordinator {
    /// Creates a coordinator that fetches through `fetcher`
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    /// Creates a coordinator with an HTTP fetcher built from `config`
    pub fn from_config(config: &Config) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::from_config(&config.user_agent, &config.http)?;
        Ok(Self::new(Arc::new(fetcher)))
    }

    /// Starts a crawl and returns immediately
    ///
    /// Must be called from within a tokio runtime. The crawl runs in spawned
    /// tasks:
    ///
    /// 1. A fresh visited set and task counters (one task started) are created
    /// 2. The seed task is spawned for `(start_url, max_depth)`
    /// 3. The termination detector runs until started equals finished
    /// 4. The completion signal is sent with the final statistics
    pub fn crawl(&self, request: CrawlRequest) -> CrawlHandle {
        tracing::info!(
            "Starting crawl of {} to depth {}",
            request.start_url,
            request.max_depth
        );

        let (results_tx, results_rx) = mpsc::channel(request.result_buffer.max(1));
        let (completion_tx, completion_rx) = oneshot::channel();
        let (reporter, detector) = termination_channel();
        let visited = Arc::new(VisitedSet::new());

        let start_time = Instant::now();
        tokio::spawn(async move {
            let stats = detector.run().await;
            tracing::info!(
                "Crawl completed: {} pages emitted by {} tasks in {:?}",
                stats.pages_emitted(),
                stats.tasks_finished,
                start_time.elapsed()
            );
            if completion_tx.send(stats).is_err() {
                tracing::debug!("Crawl handle dropped before completion");
            }
        });

        let spawner = TaskSpawner::new(Arc::clone(&self.fetcher), visited, results_tx, reporter);
        spawner.spawn_seed(request.start_url, request.max_depth);

        CrawlHandle {
            results: results_rx,
            completion: completion_rx,
        }
    }
}

/// Starts a crawl through `fetcher`
///
/// # Example
///
/// ```no_run
/// use ripple_crawl::crawler::{crawl, CrawlRequest, HttpFetcher};
/// use std::sync::Arc;
///
/// # async fn example() {
/// let fetcher = Arc::new(HttpFetcher::new(reqwest::Client::new()));
/// let mut handle = crawl(fetcher, CrawlRequest::new("https://example.com/", 2));
/// while let Some(page) = handle.next_result().await {
///     println!("{} ({} bytes)", page.url, page.body.len());
/// }
/// let stats = handle.completed().await;
/// println!("{} pages", stats.pages_emitted());
/// # }
/// ```
pub fn crawl(fetcher: Arc<dyn Fetcher>, request: CrawlRequest) -> CrawlHandle {
    Coordinator::new(fetcher).crawl(request)
}
