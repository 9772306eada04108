//! State module for tracking crawl progress
//!
//! `PageState` records the terminal outcome of every URL the scheduler hands
//! out, and is what the run statistics are keyed by.

mod page_state;

pub use page_state::PageState;
