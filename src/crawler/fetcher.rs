//! HTTP fetcher implementation
//!
//! This module defines the fetch capability used by every fetch task and the
//! reqwest-backed implementation used in production:
//! - Building HTTP clients with proper user agent strings and timeouts
//! - GET requests returning the raw response body
//! - Classifying failures as transport or body-read errors

use crate::config::{HttpConfig, UserAgentConfig};
use crate::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Something that can retrieve the body of a URL
///
/// Implementations decide on timeouts and retries; the crawler treats any
/// error as final for that URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and returns the full response body
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `http` - Timeout settings
///
/// # Example
///
/// ```no_run
/// use ripple_crawl::config::{HttpConfig, UserAgentConfig};
/// use ripple_crawl::crawler::build_http_client;
///
/// let user_agent = UserAgentConfig {
///     crawler_name: "RippleCrawl".to_string(),
///     crawler_version: "0.1".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&user_agent, &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(http.timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from configuration and wraps it
    pub fn from_config(
        user_agent: &UserAgentConfig,
        http: &HttpConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(user_agent, http)?))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    /// Sends a GET request and reads the whole body
    ///
    /// Redirects are followed by the client. Any status code is accepted: an
    /// error page still has a body, and it is returned like any other.
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::transport(url.as_str(), describe_transport_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("{} answered with HTTP {}", url, status.as_u16());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::read(url.as_str(), e.to_string()))?;

        Ok(body.to_vec())
    }
}

/// Classifies a request failure into a short description
fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("Request timeout: {}", error)
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else if error.is_redirect() {
        format!("Redirect error: {}", error)
    } else {
        error.to_string()
    }
}
