/// Page state definitions for tracking crawl progress
///
/// Every URL taken off the frontier ends in exactly one of these states.
use serde::Serialize;
use std::fmt;

/// Terminal outcome of a visited URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageState {
    // ===== Success =====
    /// Page was fetched, classified as wanted, and handed to the sink
    Processed,

    // ===== Skips =====
    /// Page was fetched but its classification is not in the accepted set
    Rejected,

    /// robots.txt disallows the path; the page was never fetched
    Disallowed,

    // ===== Errors =====
    /// Page returned HTTP 404 or 410
    DeadLink,

    /// Page returned HTTP 429
    RateLimited,

    /// Page could not be reached after every retry attempt
    Unreachable,

    /// Page returned another non-success status
    Failed,
}

impl PageState {
    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Processed)
    }

    /// Returns true if the page was deliberately not kept
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Rejected | Self::Disallowed)
    }

    /// Returns true if this represents an error state
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::DeadLink | Self::RateLimited | Self::Unreachable | Self::Failed
        )
    }

    /// Returns true if an HTTP request for the page was made
    pub fn was_fetched(&self) -> bool {
        !matches!(self, Self::Disallowed)
    }

    /// Converts the page state to its stored string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Rejected => "rejected",
            Self::Disallowed => "disallowed",
            Self::DeadLink => "dead_link",
            Self::RateLimited => "rate_limited",
            Self::Unreachable => "unreachable",
            Self::Failed => "failed",
        }
    }

    /// Parses a page state from its stored string representation
    pub fn from_str_opt(s: &str) -> Option<Self> {
        Self::all_states().into_iter().find(|state| state.as_str() == s)
    }

    /// Returns all possible page states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Processed,
            Self::Rejected,
            Self::Disallowed,
            Self::DeadLink,
            Self::RateLimited,
            Self::Unreachable,
            Self::Failed,
        ]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
