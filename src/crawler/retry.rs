//! Fetch and retry coordination for pages
//!
//! | Condition              | Action                                             |
//! |------------------------|----------------------------------------------------|
//! | 2xx                    | Return the page                                    |
//! | HTTP 429               | Cool down for `2 * retry_delay`, give up           |
//! | Other non-2xx status   | Give up immediately                                |
//! | Transport error        | Back off `retry_delay * attempt`, then try again   |
//! | Out of attempts        | Give up with the last transport error              |
//!
//! Every attempt waits for a slot on the run-wide rate gate first.

use crate::crawler::politeness::RateLimiter;
use crate::crawler::{FetchError, PageFetcher, RawPage};
use crate::state::PageState;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Why a page could not be fetched
#[derive(Debug, Clone, Error)]
pub enum FetchFailure {
    #[error("HTTP {status}")]
    Status { status: u16 },

    #[error("rate limited (HTTP 429)")]
    RateLimited,

    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: FetchError },
}

impl FetchFailure {
    /// Terminal page state this failure is recorded as
    pub fn page_state(&self) -> PageState {
        match self {
            Self::Status { status: 404 | 410 } => PageState::DeadLink,
            Self::Status { .. } => PageState::Failed,
            Self::RateLimited => PageState::RateLimited,
            Self::Exhausted { .. } => PageState::Unreachable,
        }
    }
}

/// Drives one page fetch through the rate gate and the retry policy
pub struct FetchCoordinator<F: ?Sized> {
    fetcher: Arc<F>,
    attempts: u32,
    retry_delay: Duration,
    timeout: Duration,
}

impl<F: PageFetcher + ?Sized> FetchCoordinator<F> {
    /// Creates a coordinator making at most `attempts` tries per page
    pub fn new(fetcher: Arc<F>, attempts: u32, retry_delay: Duration, timeout: Duration) -> Self {
        Self {
            fetcher,
            attempts: attempts.max(1),
            retry_delay,
            timeout,
        }
    }

    pub async fn fetch(
        &self,
        url: &Url,
        limiter: &RateLimiter,
        crawl_delay: Option<Duration>,
    ) -> Result<RawPage, FetchFailure> {
        let mut attempt = 1;
        loop {
            limiter.wait_for_slot(crawl_delay).await;

            match self.fetcher.fetch(url, self.timeout).await {
                Ok(page) if page.is_success() => return Ok(page),
                Ok(page) if page.status == 429 => {
                    let cooldown = self.retry_delay.saturating_mul(2);
                    tracing::warn!("Rate limited on {}, cooling down for {:?}", url, cooldown);
                    tokio::time::sleep(cooldown).await;
                    return Err(FetchFailure::RateLimited);
                }
                Ok(page) => {
                    tracing::debug!("{} returned HTTP {}", url, page.status);
                    return Err(FetchFailure::Status {
                        status: page.status,
                    });
                }
                Err(e) if attempt >= self.attempts => {
                    return Err(FetchFailure::Exhausted {
                        attempts: attempt,
                        last: e,
                    });
                }
                Err(e) => {
                    let backoff = self.retry_delay.saturating_mul(attempt);
                    tracing::warn!(
                        "Attempt {}/{} for {} failed: {}; retrying in {:?}",
                        attempt,
                        self.attempts,
                        url,
                        e,
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
            }
        }
    }
}
