//! Ripple-Crawl main entry point
//!
//! This is the command-line interface for the Ripple-Crawl web crawler.

use anyhow::{Context, Result};
use clap::Parser;
use ripple_crawl::config::{load_config_with_hash, Config};
use ripple_crawl::crawler::Coordinator;
use ripple_crawl::output::print_statistics;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Ripple-Crawl: a bounded-depth concurrent web crawler
///
/// Fetches the start page, follows every link it finds up to the configured
/// depth, and prints each page fetched along the way.
#[derive(Parser, Debug)]
#[command(name = "ripple-crawl")]
#[command(version)]
#[command(about = "A bounded-depth concurrent web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Override the start URL from the configuration
    #[arg(long, value_name = "URL")]
    start_url: Option<String>,

    /// Override the maximum depth from the configuration
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    max_depth: Option<i32>,

    /// Print page bodies instead of their sizes
    #[arg(long)]
    bodies: bool,

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
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let config = config
        .with_overrides(cli.start_url, cli.max_depth)
        .context("Invalid command-line override")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config, cli.bodies).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ripple_crawl=info,warn"),
            1 => EnvFilter::new("ripple_crawl=debug,info"),
            2 => EnvFilter::new("ripple_crawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Ripple-Crawl Dry Run ===\n");

    println!("Crawl:");
    println!("  Start URL: {}", config.crawl.start_url);
    println!("  Max depth: {}", config.crawl.max_depth);
    println!("  Result buffer: {}", config.crawl.result_buffer);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nHTTP:");
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);

    println!("\n✓ Configuration is valid");
    if config.crawl.max_depth <= 0 {
        println!("✓ Max depth is {}, nothing would be fetched", config.crawl.max_depth);
    }
}

/// Runs the crawl and prints every page as it arrives
async fn handle_crawl(config: &Config, bodies: bool) -> Result<()> {
    let coordinator =
        Coordinator::from_config(config).context("Failed to build the HTTP client")?;

    let mut handle = coordinator.crawl(config.crawl_request());
    while let Some(page) = handle.next_result().await {
        if bodies {
            println!("=== {}\n{}", page.url, page.body);
        } else {
            println!("{}\t{} bytes", page.url, page.body.len());
        }
    }

    let stats = handle.completed().await;
    println!();
    print_statistics(&stats);

    Ok(())
}
