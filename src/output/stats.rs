//! Run statistics
//!
//! [`CrawlStats`] is filled in by the crawler as URLs reach a terminal state
//! and is returned from `Crawler::run`.

use crate::crawler::Asset;
use crate::state::PageState;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrawlStats {
    /// Count of visited URLs by terminal state
    pub pages_by_state: BTreeMap<PageState, u64>,

    /// URLs added to the frontier (the start URL included)
    pub links_enqueued: u64,

    pub assets_downloaded: u64,
    pub assets_failed: u64,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_page(&mut self, state: PageState) {
        *self.pages_by_state.entry(state).or_insert(0) += 1;
    }

    pub fn record_assets(&mut self, assets: &[Asset]) {
        for asset in assets {
            if asset.downloaded {
                self.assets_downloaded += 1;
            } else {
                self.assets_failed += 1;
            }
        }
    }

    pub fn count(&self, state: PageState) -> u64 {
        self.pages_by_state.get(&state).copied().unwrap_or(0)
    }

    /// Total number of URLs taken off the frontier
    pub fn pages_visited(&self) -> u64 {
        self.pages_by_state.values().sum()
    }

    /// Number of HTTP page fetches that were started
    pub fn pages_fetched(&self) -> u64 {
        self.pages_by_state
            .iter()
            .filter(|(state, _)| state.was_fetched())
            .map(|(_, count)| count)
            .sum()
    }

    pub fn error_count(&self) -> u64 {
        self.pages_by_state
            .iter()
            .filter(|(state, _)| state.is_error())
            .map(|(_, count)| count)
            .sum()
    }

    /// Returns the success rate as a percentage of visited URLs
    pub fn success_rate(&self) -> f64 {
        let visited = self.pages_visited();
        if visited == 0 {
            return 0.0;
        }
        (self.count(PageState::Processed) as f64 / visited as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStats) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  URLs visited: {}", stats.pages_visited());
    println!("  Pages fetched: {}", stats.pages_fetched());
    println!("  Links enqueued: {}", stats.links_enqueued);
    println!(
        "  Assets: {} downloaded, {} failed",
        stats.assets_downloaded, stats.assets_failed
    );
    println!("  Elapsed: {:.1}s", stats.elapsed.as_secs_f64());
    println!();

    println!("Pages by State:");
    // Sort states by count (descending)
    let mut state_counts: Vec<_> = stats.pages_by_state.iter().collect();
    state_counts.sort_by(|a, b| b.1.cmp(a.1));

    let visited = stats.pages_visited();
    for (state, count) in state_counts {
        let percentage = if visited > 0 {
            (*count as f64 / visited as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", state, count, percentage);
    }
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} URLs accepted)",
        stats.success_rate(),
        stats.count(PageState::Processed),
        visited
    );
}
