//! URL handling module for Ripple-Crawl
//!
//! This module turns strings into crawl URLs, decides which schemes may be
//! fetched, and resolves hrefs found on a page against that page's URL.

mod normalize;

pub use normalize::{ensure_fetchable, is_fetchable, normalize_url, resolve_href};

/// Schemes the crawler is willing to fetch
pub const FETCHABLE_SCHEMES: &[&str] = &["http", "https"];
