use crate::crawler::{Asset, PageResult};
use crate::output::{CrawlStats, ResultSink, SinkResult};
use async_trait::async_trait;
use url::Url;

/// Sink that keeps every result in memory
///
/// Useful for tests and for embedding the crawler in another program.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub pages: Vec<PageResult>,

    /// Assets in the order they were recorded, keyed by the page they belong to
    pub assets: Vec<(Url, Asset)>,

    /// Statistics handed over when the run finished
    pub stats: Option<CrawlStats>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_urls(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.url.as_str()).collect()
    }

    pub fn find_page(&self, url: &str) -> Option<&PageResult> {
        self.pages.iter().find(|p| p.url.as_str() == url)
    }
}

#[async_trait]
impl ResultSink for MemorySink {
    async fn record_asset(&mut self, page_url: &Url, asset: &Asset) -> SinkResult<()> {
        self.assets.push((page_url.clone(), asset.clone()));
        Ok(())
    }

    async fn accept_page(&mut self, page: PageResult) -> SinkResult<()> {
        self.pages.push(page);
        Ok(())
    }

    async fn finish(&mut self, stats: &CrawlStats) -> SinkResult<()> {
        self.stats = Some(stats.clone());
        Ok(())
    }
}
