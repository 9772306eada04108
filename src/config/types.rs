use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level configuration file layout used by the CLI
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Immutable parameters of one crawl run
///
/// Durations are expressed in (fractional) seconds so that TOML files stay
/// readable; use the `*_duration` accessors inside the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Absolute http(s) URL the crawl starts from (depth 0)
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Maximum link depth from the start URL (must be >= 1)
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Maximum number of URLs visited in one run (must be >= 1)
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Upper bound on request rate for the whole run
    #[serde(rename = "requests-per-second", default = "default_requests_per_second")]
    pub requests_per_second: f64,

    /// Minimum gap between two requests, in seconds
    #[serde(rename = "delay-between-requests", default = "default_delay_between_requests")]
    pub delay_between_requests: f64,

    /// Domains whose pages may be crawled; empty means "the start URL's domain"
    #[serde(rename = "allowed-domains", default)]
    pub allowed_domains: Vec<String>,

    #[serde(rename = "respect-robots-txt", default = "default_true")]
    pub respect_robots_txt: bool,

    /// Per-request timeout, in seconds
    #[serde(default = "default_timeout")]
    pub timeout: f64,

    /// Total number of attempts for a page fetch that fails in transport
    #[serde(rename = "retry-attempts", default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Base backoff between attempts, in seconds (multiplied by the attempt number)
    #[serde(rename = "retry-delay", default = "default_retry_delay")]
    pub retry_delay: f64,

    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Classification kinds whose pages are handed to the result sink
    #[serde(rename = "content-types", default = "default_content_types")]
    pub content_types: Vec<String>,

    /// Follow links of pages whose classification was rejected
    #[serde(rename = "follow-rejected-links", default = "default_true")]
    pub follow_rejected_links: bool,

    /// Keep the raw markup on each page result
    #[serde(rename = "store-html", default = "default_true")]
    pub store_html: bool,

    #[serde(rename = "download-assets", default = "default_true")]
    pub download_assets: bool,

    /// File extensions (with leading dot) that qualify as assets
    #[serde(rename = "asset-types", default = "default_asset_types")]
    pub asset_types: Vec<String>,

    /// Largest asset that will be downloaded, in bytes
    #[serde(rename = "max-asset-size", default = "default_max_asset_size")]
    pub max_asset_size: u64,

    /// Directory downloaded assets are written to
    #[serde(rename = "asset-dir", default = "default_asset_dir")]
    pub asset_dir: PathBuf,
}

impl CrawlConfig {
    /// Creates a configuration for the given start URL with default settings
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            max_depth: default_max_depth(),
            max_pages: default_max_pages(),
            requests_per_second: default_requests_per_second(),
            delay_between_requests: default_delay_between_requests(),
            allowed_domains: Vec::new(),
            respect_robots_txt: true,
            timeout: default_timeout(),
            retry_attempts: default_retry_attempts(),
            retry_delay: default_retry_delay(),
            user_agent: default_user_agent(),
            content_types: default_content_types(),
            follow_rejected_links: true,
            store_html: true,
            download_assets: true,
            asset_types: default_asset_types(),
            max_asset_size: default_max_asset_size(),
            asset_dir: default_asset_dir(),
        }
    }

    /// Minimum interval between requests implied by the configuration alone
    ///
    /// This is `max(1 / requests_per_second, delay_between_requests)`; the
    /// robots.txt crawl-delay is folded in by the rate limiter.
    pub fn min_request_interval(&self) -> Duration {
        let per_second = if self.requests_per_second > 0.0 {
            secs(1.0 / self.requests_per_second)
        } else {
            Duration::ZERO
        };
        per_second.max(secs(self.delay_between_requests))
    }

    pub fn timeout_duration(&self) -> Duration {
        secs(self.timeout)
    }

    pub fn retry_delay_duration(&self) -> Duration {
        secs(self.retry_delay)
    }

    /// Returns true if pages of this classification kind are accepted
    pub fn accepts_content_type(&self, kind: &str) -> bool {
        self.content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(kind))
    }
}

/// Output configuration for the CLI
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file results are written to
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// Converts seconds to a Duration, clamping invalid values to zero
fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}

fn default_max_depth() -> u32 {
    3
}

fn default_max_pages() -> usize {
    100
}

fn default_requests_per_second() -> f64 {
    2.0
}

fn default_delay_between_requests() -> f64 {
    0.5
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> f64 {
    30.0
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay() -> f64 {
    1.0
}

fn default_user_agent() -> String {
    format!("CurioCrawl/{}", env!("CARGO_PKG_VERSION"))
}

fn default_content_types() -> Vec<String> {
    ["documentation", "api", "wiki", "guide", "manual"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_asset_types() -> Vec<String> {
    [".pdf", ".png", ".jpg", ".jpeg", ".svg", ".gif"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_max_asset_size() -> u64 {
    10 * 1024 * 1024
}

fn default_asset_dir() -> PathBuf {
    PathBuf::from("data/assets")
}

fn default_database_path() -> String {
    "data/crawl.db".to_string()
}
