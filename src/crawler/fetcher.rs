//! HTTP fetcher implementation
//!
//! This module defines the transport seam of the crawler:
//! - [`PageFetcher`], the trait the engine drives for pages, robots.txt and assets
//! - [`ReqwestFetcher`], the production implementation over a shared reqwest client
//! - Error classification into [`FetchError`]
//!
//! Fetchers report HTTP status codes as data. Only transport problems
//! (timeouts, refused connections, broken bodies) are errors.

use async_trait::async_trait;
use reqwest::{header, redirect::Policy, Client, Response};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Maximum number of redirects followed for a single request
const MAX_REDIRECTS: usize = 10;

/// A page body as returned by a [`PageFetcher`]
#[derive(Debug, Clone)]
pub struct RawPage {
    /// HTTP status code
    pub status: u16,

    /// Decoded response body
    pub body: String,

    /// Final URL after redirects
    pub final_url: Url,

    /// Content-Type header value, if present
    pub content_type: Option<String>,
}

impl RawPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Response headers of a HEAD request for an asset
#[derive(Debug, Clone, Default)]
pub struct AssetProbe {
    pub status: u16,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
}

/// Body of a GET request for an asset
#[derive(Debug, Clone)]
pub struct AssetBody {
    pub status: u16,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,

    /// Reading stopped because the body grew past the caller's byte limit;
    /// `bytes` is incomplete and must not be stored
    pub over_limit: bool,
}

impl AssetBody {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level failure of a single request
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },
}

/// Transport used by the crawler
///
/// Implementations must be usable from several tasks at once; the engine
/// keeps one instance behind an `Arc` for the whole run.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GETs a page, following redirects, and decodes the body as text
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<RawPage, FetchError>;

    /// Sends a HEAD request to learn an asset's size and type
    async fn probe(&self, url: &Url, timeout: Duration) -> Result<AssetProbe, FetchError>;

    /// GETs an asset as raw bytes, reading at most `max_bytes` of body
    ///
    /// A body longer than `max_bytes` is abandoned as soon as the limit is
    /// crossed and reported with `over_limit` set.
    async fn download(
        &self,
        url: &Url,
        timeout: Duration,
        max_bytes: u64,
    ) -> Result<AssetBody, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The User-Agent header sent with every request
///
/// # Example
///
/// ```no_run
/// use curio_crawl::crawler::build_http_client;
///
/// let client = build_http_client("CurioCrawl/0.1.0").unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageFetcher`] backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Creates a fetcher with a client built by [`build_http_client`]
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent)?,
        })
    }

    /// Wraps an already configured client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for ReqwestFetcher {
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<RawPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_error(e, url))?;

        let status = response.status().as_u16();
        let final_url = response.url().clone();
        let content_type = content_type(&response);

        let body = response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(RawPage {
            status,
            body,
            final_url,
            content_type,
        })
    }

    async fn probe(&self, url: &Url, timeout: Duration) -> Result<AssetProbe, FetchError> {
        let response = self
            .client
            .head(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_error(e, url))?;

        // reqwest reports no length for HEAD bodies, so read the header directly
        let content_length = response
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        Ok(AssetProbe {
            status: response.status().as_u16(),
            content_type: content_type(&response),
            content_length,
        })
    }

    async fn download(
        &self,
        url: &Url,
        timeout: Duration,
        max_bytes: u64,
    ) -> Result<AssetBody, FetchError> {
        let mut response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_error(e, url))?;

        let mut body = AssetBody {
            status: response.status().as_u16(),
            content_type: content_type(&response),
            bytes: Vec::new(),
            over_limit: false,
        };

        if !body.is_success() {
            return Ok(body);
        }

        if response.content_length().is_some_and(|len| len > max_bytes) {
            body.over_limit = true;
            return Ok(body);
        }

        // Chunked bodies carry no length up front, so count while reading
        while let Some(chunk) = response.chunk().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })? {
            if body.bytes.len() as u64 + chunk.len() as u64 > max_bytes {
                tracing::debug!("Abandoning {} after {} bytes", url, body.bytes.len());
                body.bytes.clear();
                body.over_limit = true;
                break;
            }
            body.bytes.extend_from_slice(&chunk);
        }

        Ok(body)
    }
}

fn content_type(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

/// Maps a reqwest error onto the crawler's transport error kinds
fn classify_error(e: reqwest::Error, url: &Url) -> FetchError {
    let url = url.to_string();
    if e.is_timeout() {
        FetchError::Timeout { url }
    } else if e.is_connect() {
        FetchError::Connect {
            url,
            message: e.to_string(),
        }
    } else {
        FetchError::Transport {
            url,
            message: e.to_string(),
        }
    }
}
