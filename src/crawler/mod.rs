//! Crawler module for page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The [`PageFetcher`] transport seam and its reqwest implementation
//! - Frontier scheduling, robots.txt admission and rate limiting
//! - Fetch retries
//! - HTML extraction, content classification and asset downloads
//! - Overall crawl coordination

mod assets;
mod classify;
mod coordinator;
mod extract;
mod fetcher;
mod page;
mod politeness;
mod retry;
mod scheduler;

pub use assets::{asset_file_name, file_extension, AssetManager};
pub use classify::{classify, ContentClassification, ContentKind};
pub use coordinator::{run_crawl, Crawler};
pub use extract::{extract_links_simple, extract_page, ExtractedPage};
pub use fetcher::{
    build_http_client, AssetBody, AssetProbe, FetchError, PageFetcher, RawPage, ReqwestFetcher,
};
pub use page::{Asset, PageResult};
pub use politeness::{Admission, Politeness, RateLimiter};
pub use retry::{FetchCoordinator, FetchFailure};
pub use scheduler::{FrontierEntry, Scheduler};
