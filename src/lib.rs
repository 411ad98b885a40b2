//! Ripple-Crawl: a bounded-depth concurrent web crawler
//!
//! This crate fetches a starting page, follows every anchor it finds, and keeps
//! going until a depth limit is reached. Each unique page is fetched at most once
//! and streamed to the caller as a [`crawler::PageResult`]; a single completion
//! signal fires once every spawned fetch task has finished.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Ripple-Crawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

/// Errors reported by a fetch capability
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request could not be sent or no response came back
    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// A response arrived but its body could not be read
    #[error("Failed to read body of {url}: {message}")]
    Read { url: String, message: String },
}

impl FetchError {
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn read(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Read {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Returns true for failures before a response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns true for failures while reading the response body
    pub fn is_read(&self) -> bool {
        matches!(self, Self::Read { .. })
    }
}

/// Result type alias for Ripple-Crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlHandle, CrawlRequest, Fetcher, HttpFetcher, PageResult};
pub use output::CrawlStats;
pub use state::TaskOutcome;
