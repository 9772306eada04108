//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process:
//! - Seeding the frontier with the start URL
//! - Robots.txt admission and the rate gate
//! - Fetching with retries
//! - Extraction, classification, and link following
//! - Asset downloads and handing results to the sink

use crate::config::{validate_crawl_config, CrawlConfig};
use crate::crawler::assets::AssetManager;
use crate::crawler::classify::classify;
use crate::crawler::extract::extract_page;
use crate::crawler::politeness::{Admission, Politeness};
use crate::crawler::retry::FetchCoordinator;
use crate::crawler::scheduler::{FrontierEntry, Scheduler};
use crate::crawler::{PageFetcher, PageResult, ReqwestFetcher};
use crate::output::{CrawlStats, ResultSink};
use crate::state::PageState;
use crate::url::{default_allowed_domain, normalize_parsed};
use crate::ConfigError;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// What became of one dequeued URL
enum PageOutcome {
    Accepted(Box<PageResult>),
    Skipped(PageState),
}

/// One crawl run over a single start URL
///
/// A `Crawler` owns its frontier, robots cache, and rate limiter, so separate
/// instances never interfere with each other.
pub struct Crawler<F: PageFetcher + ?Sized> {
    config: CrawlConfig,
    start_url: Url,
    allowed_domains: Vec<String>,
    fetcher: Arc<F>,
    scheduler: Scheduler,
    politeness: Politeness,
    retry: FetchCoordinator<F>,
    assets: AssetManager<F>,
    stats: CrawlStats,
}

impl<F: PageFetcher + ?Sized> Crawler<F> {
    /// Creates a crawler and seeds the frontier with the start URL
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration fails validation. No
    /// request is made before this check passes.
    pub fn new(config: CrawlConfig, fetcher: Arc<F>) -> Result<Self, ConfigError> {
        let start = validate_crawl_config(&config)?;
        let start_url = normalize_parsed(start)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", config.start_url, e)))?;

        let allowed_domains = if config.allowed_domains.is_empty() {
            default_allowed_domain(&start_url).into_iter().collect()
        } else {
            config.allowed_domains.clone()
        };

        let mut scheduler = Scheduler::new(config.max_depth, config.max_pages);
        let mut stats = CrawlStats::new();
        if scheduler.enqueue(start_url.clone(), 0) {
            stats.links_enqueued += 1;
        }

        let retry = FetchCoordinator::new(
            fetcher.clone(),
            config.retry_attempts,
            config.retry_delay_duration(),
            config.timeout_duration(),
        );
        let assets = AssetManager::new(
            fetcher.clone(),
            config.asset_dir.clone(),
            config.max_asset_size,
            config.timeout_duration(),
        );

        Ok(Self {
            politeness: Politeness::new(&config),
            config,
            start_url,
            allowed_domains,
            fetcher,
            scheduler,
            retry,
            assets,
            stats,
        })
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Normalized start URL
    pub fn start_url(&self) -> &Url {
        &self.start_url
    }

    /// Domains links must belong to, after defaulting
    pub fn allowed_domains(&self) -> &[String] {
        &self.allowed_domains
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// Runs the crawl until the frontier is empty or the page budget is spent
    ///
    /// Accepted pages are streamed to `sink` as they complete. Fetch
    /// failures and policy rejections are counted in the returned statistics;
    /// only a sink failure ends the run early.
    pub async fn run<S>(&mut self, sink: &mut S) -> crate::Result<CrawlStats>
    where
        S: ResultSink + ?Sized,
    {
        tracing::info!(
            "Starting crawl at {} (max depth {}, max pages {}, domains {:?})",
            self.start_url,
            self.config.max_depth,
            self.config.max_pages,
            self.allowed_domains
        );

        let start_time = Instant::now();
        let mut pages_visited: u64 = 0;

        while let Some(entry) = self.scheduler.dequeue() {
            if !self.scheduler.mark_visited(&entry.url) {
                continue;
            }
            tracing::debug!("Processing URL: {} (depth {})", entry.url, entry.depth);

            let state = match self.process_entry(&entry).await {
                PageOutcome::Accepted(page) => {
                    for asset in &page.assets {
                        sink.record_asset(&page.url, asset).await?;
                    }
                    self.stats.record_assets(&page.assets);
                    sink.accept_page(*page).await?;
                    PageState::Processed
                }
                PageOutcome::Skipped(state) => state,
            };
            self.stats.record_page(state);
            pages_visited += 1;

            // Progress reporting every 10 pages
            if pages_visited % 10 == 0 {
                let rate = pages_visited as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} pages visited, {} in frontier, {:.2} pages/sec",
                    pages_visited,
                    self.scheduler.frontier_size(),
                    rate
                );
            }
        }

        if self.scheduler.budget_exhausted() && !self.scheduler.is_empty() {
            tracing::info!(
                "Page budget of {} reached with {} URLs left in the frontier",
                self.config.max_pages,
                self.scheduler.frontier_size()
            );
        }

        self.stats.elapsed += start_time.elapsed();
        sink.finish(&self.stats).await?;

        tracing::info!(
            "Crawl completed: {} pages visited, {} accepted in {:?}",
            pages_visited,
            self.stats.count(PageState::Processed),
            start_time.elapsed()
        );

        Ok(self.stats.clone())
    }

    /// Processes a single URL
    ///
    /// 1. Checks robots.txt
    /// 2. Fetches the page through the rate gate and retry policy, re-checking
    ///    robots.txt for the URL a redirect ended on
    /// 3. Extracts content and classifies it
    /// 4. Enqueues outbound links
    /// 5. Downloads assets of accepted pages
    async fn process_entry(&mut self, entry: &FrontierEntry) -> PageOutcome {
        let url = &entry.url;

        let crawl_delay = match self.politeness.admit(self.fetcher.as_ref(), url).await {
            Admission::Allowed { crawl_delay } => crawl_delay,
            Admission::Disallowed => {
                tracing::info!("URL {} disallowed by robots.txt", url);
                return PageOutcome::Skipped(PageState::Disallowed);
            }
        };

        let raw = match self
            .retry
            .fetch(url, self.politeness.limiter(), crawl_delay)
            .await
        {
            Ok(raw) => raw,
            Err(failure) => {
                tracing::warn!("Dropping {}: {}", url, failure);
                return PageOutcome::Skipped(failure.page_state());
            }
        };

        // A redirect can land on a path robots.txt forbids
        if raw.final_url != *url {
            let admission = self
                .politeness
                .admit(self.fetcher.as_ref(), &raw.final_url)
                .await;
            if admission == Admission::Disallowed {
                tracing::info!("{} redirected to {}, disallowed by robots.txt", url, raw.final_url);
                return PageOutcome::Skipped(PageState::Disallowed);
            }
        }

        let extracted = extract_page(&raw.body, &raw.final_url, &self.config.asset_types);
        let classification = classify(&raw.final_url, &extracted.metadata, &extracted.text);
        let accepted = self
            .config
            .accepts_content_type(classification.kind.as_str());

        tracing::debug!(
            "{} classified as {} ({:.2}, {:?})",
            url,
            classification.kind,
            classification.confidence,
            classification.features
        );

        if accepted || self.config.follow_rejected_links {
            self.enqueue_links(&extracted.links, entry.depth);
        }

        if !accepted {
            tracing::debug!("Rejecting {}: {} is not wanted", url, classification.kind);
            return PageOutcome::Skipped(PageState::Rejected);
        }

        let assets = if self.config.download_assets {
            self.assets.process(&extracted.asset_refs).await
        } else {
            Vec::new()
        };

        PageOutcome::Accepted(Box::new(PageResult {
            url: url.clone(),
            final_url: raw.final_url,
            depth: entry.depth,
            title: extracted.title,
            text: extracted.text,
            html: self.config.store_html.then_some(raw.body),
            metadata: extracted.metadata,
            classification,
            links: extracted.links,
            assets,
            crawled_at: Utc::now(),
        }))
    }

    fn enqueue_links(&mut self, links: &[Url], depth: u32) {
        if depth >= self.config.max_depth {
            return;
        }

        let kept = self.scheduler.filter_links(links, &self.allowed_domains);
        let mut added = 0;
        for link in kept {
            if self.scheduler.enqueue(link, depth + 1) {
                added += 1;
            }
        }

        if added > 0 {
            tracing::trace!("Enqueued {} of {} links at depth {}", added, links.len(), depth + 1);
        }
        self.stats.links_enqueued += added;
    }
}

/// Runs one crawl over HTTP with a [`ReqwestFetcher`]
///
/// # Example
///
/// ```no_run
/// use curio_crawl::crawler::run_crawl;
/// use curio_crawl::{CrawlConfig, MemorySink};
///
/// # async fn example() -> Result<(), curio_crawl::CrawlError> {
/// let mut sink = MemorySink::new();
/// let stats = run_crawl(CrawlConfig::new("https://docs.example.com/"), &mut sink).await?;
/// println!("{} pages accepted", sink.pages.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl<S>(config: CrawlConfig, sink: &mut S) -> crate::Result<CrawlStats>
where
    S: ResultSink + ?Sized,
{
    let fetcher = Arc::new(ReqwestFetcher::new(&config.user_agent)?);
    let mut crawler = Crawler::new(config, fetcher)?;
    crawler.run(sink).await
}
