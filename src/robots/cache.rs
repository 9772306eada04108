//! Per-run robots.txt cache
//!
//! Policies are keyed by authority (`host[:port]`) and live for the duration
//! of one crawl run. A run never re-fetches robots.txt for an authority it has
//! already seen, so there is no expiry.

use crate::robots::RobotsPolicy;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct RobotsCache {
    policies: HashMap<String, RobotsPolicy>,
}

impl RobotsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached policy for an authority
    pub fn get(&self, authority: &str) -> Option<&RobotsPolicy> {
        self.policies.get(authority)
    }

    pub fn contains(&self, authority: &str) -> bool {
        self.policies.contains_key(authority)
    }

    /// Stores a policy, replacing any previous entry for the authority
    pub fn insert(&mut self, authority: impl Into<String>, policy: RobotsPolicy) {
        self.policies.insert(authority.into(), policy);
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cache_is_empty() {
        let cache = RobotsCache::new();
        assert!(cache.is_empty());
        assert!(cache.get("example.com").is_none());
    }

    #[test]
    fn test_insert_and_get() {
        let mut cache = RobotsCache::new();
        let policy = RobotsPolicy::parse("User-agent: *\nDisallow: /x", "bot");
        cache.insert("example.com", policy.clone());

        assert!(cache.contains("example.com"));
        assert_eq!(cache.get("example.com"), Some(&policy));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_authorities_with_ports_are_distinct() {
        let mut cache = RobotsCache::new();
        cache.insert("localhost:8080", RobotsPolicy::allow_all());

        assert!(cache.contains("localhost:8080"));
        assert!(!cache.contains("localhost:9090"));
        assert!(!cache.contains("localhost"));
    }
}
