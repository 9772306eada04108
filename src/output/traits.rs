//! Result sink trait and error types
//!
//! A sink receives the results of one crawl run as they are produced. For
//! every accepted page the engine first calls [`ResultSink::record_asset`]
//! once per asset, then [`ResultSink::accept_page`] with the complete page.

use crate::crawler::{Asset, PageResult};
use crate::output::CrawlStats;
use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Errors that can occur while storing results
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write result: {0}")]
    Write(String),
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Destination for crawl results
///
/// Any error returned by a sink aborts the run.
#[async_trait]
pub trait ResultSink: Send {
    /// Records one asset of a page that is about to be accepted
    async fn record_asset(&mut self, page_url: &Url, asset: &Asset) -> SinkResult<()> {
        let _ = (page_url, asset);
        Ok(())
    }

    /// Takes ownership of a complete, accepted page
    async fn accept_page(&mut self, page: PageResult) -> SinkResult<()>;

    /// Called once after the frontier is exhausted or the budget is spent
    async fn finish(&mut self, stats: &CrawlStats) -> SinkResult<()> {
        let _ = stats;
        Ok(())
    }
}
