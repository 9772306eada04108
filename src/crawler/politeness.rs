//! Politeness controls: robots.txt admission and the run-wide rate gate
//!
//! Every page fetch attempt, retries included, and every robots.txt request
//! passes through one [`RateLimiter`]. The gate spaces the *starts* of consecutive requests by at
//! least `max(1 / requests_per_second, delay_between_requests, crawl-delay)`.

use crate::config::CrawlConfig;
use crate::crawler::PageFetcher;
use crate::robots::{fetch_robots, RobotsCache, RobotsPolicy};
use crate::url::authority;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use url::Url;

/// Serializes request starts so they are at least `min_interval` apart
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until the next request may start, then claims the slot
    ///
    /// `crawl_delay` raises the interval for this request when it is longer
    /// than the configured minimum. The lock is held across the sleep, so
    /// concurrent callers queue up behind each other.
    pub async fn wait_for_slot(&self, crawl_delay: Option<Duration>) {
        let interval = self.min_interval.max(crawl_delay.unwrap_or_default());
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < interval {
                let wait = interval - elapsed;
                tracing::trace!("Rate limiting: sleeping {:?}", wait);
                tokio::time::sleep(wait).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// Outcome of the robots.txt check for one URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The URL may be fetched; carries the site's crawl-delay if it set one
    Allowed { crawl_delay: Option<Duration> },

    /// robots.txt forbids the URL
    Disallowed,
}

/// Robots.txt policy plus the rate gate for one run
#[derive(Debug)]
pub struct Politeness {
    robots: RobotsCache,
    limiter: RateLimiter,
    respect_robots: bool,
    user_agent: String,
    timeout: Duration,
}

impl Politeness {
    pub fn new(config: &CrawlConfig) -> Self {
        Self {
            robots: RobotsCache::new(),
            limiter: RateLimiter::new(config.min_request_interval()),
            respect_robots: config.respect_robots_txt,
            user_agent: config.user_agent.clone(),
            timeout: config.timeout_duration(),
        }
    }

    /// Decides whether `url` may be fetched
    ///
    /// The first URL seen for an authority triggers a robots.txt fetch whose
    /// result is cached for the rest of the run. With robots handling turned
    /// off, everything is allowed and no robots.txt is requested.
    pub async fn admit<F>(&mut self, fetcher: &F, url: &Url) -> Admission
    where
        F: PageFetcher + ?Sized,
    {
        if !self.respect_robots {
            return Admission::Allowed { crawl_delay: None };
        }

        let Some(key) = authority(url) else {
            return Admission::Allowed { crawl_delay: None };
        };

        if !self.robots.contains(&key) {
            self.limiter.wait_for_slot(None).await;
            let policy = fetch_robots(fetcher, url, &self.user_agent, self.timeout).await;
            if let Some(delay) = policy.crawl_delay() {
                tracing::info!("{} requests a crawl delay of {:?}", key, delay);
            }
            self.robots.insert(key.clone(), policy);
        }

        let policy = self
            .robots
            .get(&key)
            .cloned()
            .unwrap_or_else(RobotsPolicy::allow_all);

        if policy.is_allowed(url.path()) {
            Admission::Allowed {
                crawl_delay: policy.crawl_delay(),
            }
        } else {
            Admission::Disallowed
        }
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn robots_cache(&self) -> &RobotsCache {
        &self.robots
    }
}
