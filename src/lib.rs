//! curio-crawl: a polite documentation crawler
//!
//! This crate implements a single-run crawl engine that walks a site
//! breadth-first, respecting robots.txt and a run-wide rate limit, classifies
//! and extracts page content, and downloads linked assets. The transport is
//! pluggable through [`crawler::PageFetcher`] and results stream into a
//! [`output::ResultSink`].

pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod state;
pub mod url;

use thiserror::Error;

/// Errors that stop a crawl run
///
/// Per-URL failures never surface here; they are counted as a
/// [`PageState`] in the run statistics instead.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Result sink error: {0}")]
    Sink(#[from] output::SinkError),
}

/// Problems with a configuration, reported before any request is made
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid start URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid allowed domain: {0}")]
    InvalidPattern(String),
}

/// Reasons a URL cannot enter the frontier
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Unsupported URL scheme: {0}")]
    InvalidScheme(String),

    #[error("URL has no host")]
    MissingDomain,
}

pub type Result<T> = std::result::Result<T, CrawlError>;

// Re-export commonly used types
pub use config::{Config, CrawlConfig};
pub use crawler::{Crawler, PageFetcher, ReqwestFetcher};
pub use output::{MemorySink, ResultSink, SqliteSink};
pub use state::PageState;
pub use url::{extract_domain, normalize_url, resolve_link};
