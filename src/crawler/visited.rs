//! Shared record of URLs already claimed for fetching

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// The set of URLs claimed by fetch tasks during one crawl
///
/// Entries are only ever added. The check and the insert happen under one lock
/// so two tasks can never both claim the same URL.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
}

impl VisitedSet {
    /// Creates an empty visited set
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `url` for the caller
    ///
    /// Returns true if the URL was not yet present (the caller may fetch it),
    /// false if another task already claimed it.
    pub fn try_claim(&self, url: &str) -> bool {
        let mut urls = self.urls.lock().unwrap_or_else(PoisonError::into_inner);
        if urls.contains(url) {
            return false;
        }
        urls.insert(url.to_string())
    }

    /// Returns true if `url` has been claimed
    #[cfg(test)]
    pub fn contains(&self, url: &str) -> bool {
        self.urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(url)
    }

    /// Number of claimed URLs
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
