//! Configuration module
//!
//! This module defines [`CrawlConfig`], the immutable parameter set of one
//! crawl run, and the TOML loading used by the command-line front end.
//!
//! # Example
//!
//! ```no_run
//! use curio_crawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawl.max_depth);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{Config, CrawlConfig, OutputConfig};

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate_crawl_config;
