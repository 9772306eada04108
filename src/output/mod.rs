//! Output module for crawl results
//!
//! This module handles:
//! - The [`ResultSink`] trait results are streamed into
//! - An in-memory sink and a SQLite sink
//! - Run statistics and their console summary

mod memory;
mod schema;
mod sqlite_sink;
pub mod stats;
mod traits;

pub use memory::MemorySink;
pub use sqlite_sink::SqliteSink;
pub use stats::{print_statistics, CrawlStats};
pub use traits::{ResultSink, SinkError, SinkResult};
