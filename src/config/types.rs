use crate::config::validation::validate;
use crate::crawler::CrawlRequest;
use crate::ConfigResult;
use serde::Deserialize;

/// Main configuration structure for Ripple-Crawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Config {
    /// Builds the crawl request described by the `[crawl]` section
    pub fn crawl_request(&self) -> CrawlRequest {
        CrawlRequest::new(self.crawl.start_url.clone(), self.crawl.max_depth)
            .with_result_buffer(self.crawl.result_buffer)
    }

    /// Replaces the start URL and depth where given, then validates again
    pub fn with_overrides(
        mut self,
        start_url: Option<String>,
        max_depth: Option<i32>,
    ) -> ConfigResult<Self> {
        if let Some(start_url) = start_url {
            self.crawl.start_url = start_url;
        }
        if let Some(max_depth) = max_depth {
            self.crawl.max_depth = max_depth;
        }
        validate(&self)?;
        Ok(self)
    }
}

/// What to crawl and how deep
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// The page the crawl starts from
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Maximum traversal depth; zero or less crawls nothing
    #[serde(rename = "max-depth")]
    pub max_depth: i32,

    /// Capacity of the page result channel
    #[serde(rename = "result-buffer", default = "default_result_buffer")]
    pub result_buffer: usize,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// HTTP client tuning
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Total request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_result_buffer() -> usize {
    1
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}
