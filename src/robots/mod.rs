//! Robots.txt handling module
//!
//! This module provides fetching, parsing, and per-run caching of robots.txt
//! files. Fetching is fail-open: any transport error or non-200 response
//! yields a policy that allows everything.

mod cache;
mod parser;

pub use cache::RobotsCache;
pub use parser::RobotsPolicy;

use crate::crawler::PageFetcher;
use std::time::Duration;
use url::Url;

/// Builds the robots.txt URL for the origin of a page
///
/// Scheme and port of the page are kept, so a page served over plain http
/// on a non-default port looks for its robots.txt in the same place.
pub fn robots_url(page_url: &Url) -> Option<Url> {
    let host = page_url.host_str()?;
    let origin = match page_url.port() {
        Some(port) => format!("{}://{}:{}/robots.txt", page_url.scheme(), host, port),
        None => format!("{}://{}/robots.txt", page_url.scheme(), host),
    };
    Url::parse(&origin).ok()
}

/// Fetches and parses robots.txt for the origin of `page_url`
///
/// # Returns
///
/// The parsed policy, or [`RobotsPolicy::allow_all`] when robots.txt is
/// missing, unreachable, or answered with anything but HTTP 200.
pub async fn fetch_robots<F>(
    fetcher: &F,
    page_url: &Url,
    user_agent: &str,
    timeout: Duration,
) -> RobotsPolicy
where
    F: PageFetcher + ?Sized,
{
    let Some(robots) = robots_url(page_url) else {
        return RobotsPolicy::allow_all();
    };

    match fetcher.fetch(&robots, timeout).await {
        Ok(response) if response.status == 200 => {
            tracing::debug!("Fetched {}", robots);
            RobotsPolicy::parse(&response.body, user_agent)
        }
        Ok(response) => {
            tracing::debug!(
                "robots.txt at {} returned HTTP {}, allowing all",
                robots,
                response.status
            );
            RobotsPolicy::allow_all()
        }
        Err(e) => {
            tracing::warn!("Failed to fetch {}: {}, allowing all", robots, e);
            RobotsPolicy::allow_all()
        }
    }
}
