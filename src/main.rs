//! curio-crawl main entry point
//!
//! This is the command-line interface for the curio-crawl documentation crawler.

use anyhow::Context;
use clap::Parser;
use curio_crawl::config::{load_config_with_hash, Config};
use curio_crawl::crawler::{Crawler, ReqwestFetcher};
use curio_crawl::output::{print_statistics, SqliteSink};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// curio-crawl: a polite documentation crawler
///
/// curio-crawl walks a documentation site breadth-first while respecting
/// robots.txt and a request rate limit, keeps the pages that look like
/// documentation, downloads their assets, and stores everything in SQLite.
#[derive(Parser, Debug)]
#[command(name = "curio-crawl")]
#[command(version)]
#[command(about = "A polite documentation crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config, &config_hash).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("curio_crawl=info,warn"),
            1 => EnvFilter::new("curio_crawl=debug,info"),
            2 => EnvFilter::new("curio_crawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    let crawl = &config.crawl;
    println!("=== curio-crawl Dry Run ===\n");

    println!("Crawl:");
    println!("  Start URL: {}", crawl.start_url);
    println!("  Max depth: {}", crawl.max_depth);
    println!("  Max pages: {}", crawl.max_pages);
    println!(
        "  Request interval: {:?} ({} req/s, {}s delay)",
        crawl.min_request_interval(),
        crawl.requests_per_second,
        crawl.delay_between_requests
    );
    println!("  Respect robots.txt: {}", crawl.respect_robots_txt);
    println!("  User agent: {}", crawl.user_agent);
    println!(
        "  Retries: {} attempts, {}s base delay, {}s timeout",
        crawl.retry_attempts, crawl.retry_delay, crawl.timeout
    );

    if crawl.allowed_domains.is_empty() {
        println!("  Allowed domains: (start URL's domain)");
    } else {
        println!("  Allowed domains: {}", crawl.allowed_domains.join(", "));
    }
    println!("  Content types: {}", crawl.content_types.join(", "));

    println!("\nAssets:");
    if crawl.download_assets {
        println!("  Types: {}", crawl.asset_types.join(" "));
        println!("  Max size: {} bytes", crawl.max_asset_size);
        println!("  Directory: {}", crawl.asset_dir.display());
    } else {
        println!("  Downloads disabled");
    }

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, config_hash: &str) -> anyhow::Result<()> {
    let mut sink = SqliteSink::open(Path::new(&config.output.database_path))
        .with_context(|| format!("Failed to open database {}", config.output.database_path))?;
    let run_id = sink.start_run(config_hash)?;
    tracing::info!("Recording results as run {} in {}", run_id, config.output.database_path);

    let fetcher = Arc::new(ReqwestFetcher::new(&config.crawl.user_agent)?);
    let mut crawler = Crawler::new(config.crawl, fetcher)?;

    match crawler.run(&mut sink).await {
        Ok(stats) => {
            tracing::info!("Crawl completed successfully");
            print_statistics(&stats);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
