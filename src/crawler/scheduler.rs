//! Frontier and scheduler for the crawl
//!
//! This module handles:
//! - The FIFO frontier of URLs waiting to be fetched
//! - Deduplication against visited and pending URLs
//! - The depth bound and the page budget
//! - Filtering extracted links to the allowed domains
//!
//! Every URL stored here is normalized, so equality on the string form is
//! equality of the crawl target.

use crate::url::{normalize_parsed, url_in_domains};
use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL waiting in the frontier together with its link depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Normalized URL to fetch
    pub url: Url,

    /// Number of link hops from the start URL (which has depth 0)
    pub depth: u32,
}

/// Scheduler manages the frontier queue and the visited set
///
/// The scheduler enforces:
/// - Breadth-first order (entries are dequeued in the order they were added)
/// - At most one fetch per normalized URL per run
/// - `depth <= max_depth` for every enqueued entry
/// - At most `max_pages` URLs marked visited
#[derive(Debug)]
pub struct Scheduler {
    /// FIFO queue of URLs to fetch
    frontier: VecDeque<FrontierEntry>,

    /// URLs currently sitting in the frontier
    pending: HashSet<String>,

    /// URLs already taken off the frontier
    visited: HashSet<String>,

    max_depth: u32,
    max_pages: usize,
}

impl Scheduler {
    /// Creates a new, empty scheduler
    pub fn new(max_depth: u32, max_pages: usize) -> Self {
        Self {
            frontier: VecDeque::new(),
            pending: HashSet::new(),
            visited: HashSet::new(),
            max_depth,
            max_pages,
        }
    }

    /// Adds a URL to the back of the frontier
    ///
    /// The URL is normalized first. Returns false (and does nothing) when the
    /// URL cannot be normalized, exceeds the depth bound, was already visited,
    /// or is already pending.
    pub fn enqueue(&mut self, url: Url, depth: u32) -> bool {
        if depth > self.max_depth {
            tracing::trace!("Skipping {} at depth {} (max {})", url, depth, self.max_depth);
            return false;
        }

        let url = match normalize_parsed(url) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Not enqueueing link: {}", e);
                return false;
            }
        };

        let key = url.as_str().to_string();
        if self.visited.contains(&key) || self.pending.contains(&key) {
            return false;
        }

        self.pending.insert(key);
        self.frontier.push_back(FrontierEntry { url, depth });
        true
    }

    /// Takes the next URL off the frontier
    ///
    /// Returns None once the frontier is empty or the page budget has been
    /// spent. Entries that were visited in the meantime are skipped.
    pub fn dequeue(&mut self) -> Option<FrontierEntry> {
        while !self.budget_exhausted() {
            let entry = self.frontier.pop_front()?;
            self.pending.remove(entry.url.as_str());

            if self.visited.contains(entry.url.as_str()) {
                continue;
            }
            return Some(entry);
        }
        None
    }

    /// Records that a URL has been taken off the frontier
    ///
    /// Returns false if the URL was already visited.
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.visited.insert(url.as_str().to_string())
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    pub fn is_pending(&self, url: &Url) -> bool {
        self.pending.contains(url.as_str())
    }

    /// Number of URLs taken off the frontier so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Returns the number of URLs in the frontier
    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    /// True once `max_pages` URLs have been visited
    pub fn budget_exhausted(&self) -> bool {
        self.visited.len() >= self.max_pages
    }

    /// Keeps the links worth enqueueing
    ///
    /// A link is kept when its normalized form is on an allowed domain and
    /// has been neither visited nor queued. Duplicates within `links`
    /// collapse to their first occurrence.
    pub fn filter_links(&self, links: &[Url], allowed_domains: &[String]) -> Vec<Url> {
        let mut seen = HashSet::new();

        links
            .iter()
            .filter_map(|link| normalize_parsed(link.clone()).ok())
            .filter(|link| url_in_domains(link, allowed_domains))
            .filter(|link| !self.is_visited(link) && !self.is_pending(link))
            .filter(|link| seen.insert(link.as_str().to_string()))
            .collect()
    }
}
