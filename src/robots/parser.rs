//! Robots.txt parser implementation
//!
//! Tokenizing is done by the `robotstxt` crate; its callbacks are folded into
//! groups here. Consecutive `User-agent` lines form one group and the rules
//! that follow belong to it until the next `User-agent` line after a rule.
//! Rule matching is our own, see [`RobotsPolicy::is_allowed`].

use robotstxt::{parse_robotstxt, RobotsParseHandler};
use std::time::Duration;

/// A `User-agent` group and the rules that follow it
#[derive(Debug, Default)]
struct Group {
    agents: Vec<String>,
    allow: Vec<String>,
    disallow: Vec<String>,
    crawl_delay: Option<f64>,
}

/// Robots rules that apply to this crawler on one domain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RobotsPolicy {
    allowed_paths: Vec<String>,
    disallowed_paths: Vec<String>,
    crawl_delay: Option<f64>,
}

impl RobotsPolicy {
    /// Creates a permissive policy that allows everything
    ///
    /// This is the policy used when robots.txt cannot be fetched.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Parses robots.txt content for the given user agent
    ///
    /// The group whose agent token is the longest one contained in
    /// `user_agent` (case-insensitive) wins; groups for `*` are used when no
    /// named group matches. Several groups naming the winning token are merged.
    pub fn parse(content: &str, user_agent: &str) -> Self {
        let groups = parse_groups(content);
        let agent = user_agent.to_lowercase();

        let best_token = groups
            .iter()
            .flat_map(|g| g.agents.iter())
            .filter(|token| token.as_str() != "*" && !token.is_empty() && agent.contains(token.as_str()))
            .max_by_key(|token| token.len())
            .cloned()
            .unwrap_or_else(|| "*".to_string());

        let mut policy = Self::default();
        for group in groups.iter().filter(|g| g.agents.contains(&best_token)) {
            policy.allowed_paths.extend(group.allow.iter().cloned());
            policy.disallowed_paths.extend(group.disallow.iter().cloned());
            if policy.crawl_delay.is_none() {
                policy.crawl_delay = group.crawl_delay;
            }
        }
        policy
    }

    /// Checks whether a URL path may be fetched
    ///
    /// Disallow prefixes are checked first and any match rejects the path.
    /// Otherwise, if allow prefixes were declared, one of them must match.
    /// With neither, the path is allowed.
    pub fn is_allowed(&self, path: &str) -> bool {
        let path = if path.is_empty() { "/" } else { path };

        let blocked_by = self
            .disallowed_paths
            .iter()
            .filter(|prefix| path.starts_with(prefix.as_str()))
            .max_by_key(|prefix| prefix.len());
        if let Some(prefix) = blocked_by {
            tracing::trace!("Path {} blocked by Disallow: {}", path, prefix);
            return false;
        }

        if !self.allowed_paths.is_empty() {
            return self
                .allowed_paths
                .iter()
                .any(|prefix| path.starts_with(prefix.as_str()));
        }

        true
    }

    /// Crawl delay requested by the site, if any
    pub fn crawl_delay(&self) -> Option<Duration> {
        self.crawl_delay
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    pub fn allowed_paths(&self) -> &[String] {
        &self.allowed_paths
    }

    pub fn disallowed_paths(&self) -> &[String] {
        &self.disallowed_paths
    }
}

fn parse_groups(content: &str) -> Vec<Group> {
    let mut collector = GroupCollector::default();
    parse_robotstxt(content, &mut collector);
    collector.finish()
}

/// Receives directives from the tokenizer and groups them by user agent
#[derive(Default)]
struct GroupCollector {
    groups: Vec<Group>,
    current: Group,
    seen_rule: bool,
}

impl GroupCollector {
    fn finish(mut self) -> Vec<Group> {
        if !self.current.agents.is_empty() {
            self.groups.push(self.current);
        }
        self.groups
    }
}

impl RobotsParseHandler for GroupCollector {
    fn handle_robots_start(&mut self) {}

    fn handle_robots_end(&mut self) {}

    fn handle_user_agent(&mut self, _line_num: u32, user_agent: &str) {
        if self.seen_rule {
            self.groups.push(std::mem::take(&mut self.current));
            self.seen_rule = false;
        }
        self.current.agents.push(user_agent.trim().to_lowercase());
    }

    fn handle_allow(&mut self, _line_num: u32, value: &str) {
        self.seen_rule = true;
        if !value.is_empty() {
            self.current.allow.push(value.to_string());
        }
    }

    fn handle_disallow(&mut self, _line_num: u32, value: &str) {
        self.seen_rule = true;
        // An empty Disallow means "nothing is disallowed"
        if !value.is_empty() {
            self.current.disallow.push(value.to_string());
        }
    }

    fn handle_sitemap(&mut self, _line_num: u32, _value: &str) {}

    fn handle_unknown_action(&mut self, _line_num: u32, action: &str, value: &str) {
        if !action.trim().eq_ignore_ascii_case("crawl-delay") {
            return;
        }
        self.seen_rule = true;
        if let Ok(delay) = value.trim().parse::<f64>() {
            if delay.is_finite() && delay >= 0.0 {
                self.current.crawl_delay = Some(delay);
            }
        }
    }
}
