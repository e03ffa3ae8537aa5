//! Spindrift main entry point
//!
//! Command-line driver for the three concurrency demos.

use anyhow::Context;
use clap::{Parser, Subcommand};
use spindrift::config::{load_config_with_hash, Config};
use spindrift::crawler::{crawl, CrawlReport, HttpFetcher, StaticFetcher};
use spindrift::poller::{self, HttpProbe};
use spindrift::treewalk::{same_values, Tree};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

/// Spindrift: concurrency patterns, one demo at a time
#[derive(Parser, Debug)]
#[command(name = "spindrift")]
#[command(version)]
#[command(about = "Concurrency pattern demos", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl a link graph with a bounded depth budget
    Crawl {
        /// Root URL (overrides the config)
        #[arg(long)]
        root: Option<String>,

        /// Maximum crawl depth (overrides the config)
        #[arg(long)]
        depth: Option<u32>,

        /// Fetch over real HTTP instead of the built-in sample site
        #[arg(long)]
        live: bool,
    },

    /// Compare two binary trees by walking them into channels
    Tree {
        /// Number of values per tree
        #[arg(long, default_value_t = 10)]
        size: usize,
    },

    /// Poll URLs with a worker pool and a central state monitor
    Poll {
        /// URL to poll (repeatable; overrides the config)
        #[arg(long = "url")]
        urls: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    match cli.command {
        Command::Crawl { root, depth, live } => handle_crawl(&config, root, depth, live).await?,
        Command::Tree { size } => handle_tree(size).await?,
        Command::Poll { urls } => handle_poll(&config, urls).await?,
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("spindrift=info,warn"),
            1 => EnvFilter::new("spindrift=debug,info"),
            2 => EnvFilter::new("spindrift=trace,debug"),
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

/// Runs the crawl demo and prints every page and failure
async fn handle_crawl(
    config: &Config,
    root: Option<String>,
    depth: Option<u32>,
    live: bool,
) -> anyhow::Result<()> {
    let max_depth = depth.unwrap_or(config.crawl.max_depth);

    let report = if live {
        let root = root.unwrap_or_else(|| config.crawl.root_url.clone());
        let fetcher = HttpFetcher::new(&config.crawl.user_agent)?;
        let report = crawl(fetcher, &root, max_depth).await;
        for page in &report.pages {
            println!("found: {} ({} bytes)", page.url, page.content.len());
        }
        report
    } else {
        let root = root.unwrap_or_else(|| StaticFetcher::sample_root().to_string());
        let report = crawl(StaticFetcher::sample_site(), &root, max_depth).await;
        for page in &report.pages {
            println!("found: {} {:?}", page.url, page.content);
        }
        report
    };

    print_crawl_summary(&report);
    Ok(())
}

fn print_crawl_summary(report: &CrawlReport) {
    for failure in &report.failures {
        println!("error: {}", failure.error);
    }
    println!(
        "\n{} pages fetched, {} failures",
        report.pages.len(),
        report.failures.len()
    );
}

/// Runs the tree comparison demo
async fn handle_tree(size: usize) -> anyhow::Result<()> {
    let size = size.max(1);

    let a = Tree::multiples_of(1, size).context("building first tree")?;
    let b = Tree::multiples_of(1, size).context("building second tree")?;
    println!("same values (1x vs 1x): {}", same_values(a, b).await);

    let a = Tree::multiples_of(1, size).context("building first tree")?;
    let b = Tree::multiples_of(2, size).context("building second tree")?;
    println!("same values (1x vs 2x): {}", same_values(a, b).await);

    Ok(())
}

/// Runs the poller demo until interrupted
async fn handle_poll(config: &Config, urls: Vec<String>) -> anyhow::Result<()> {
    let mut poll_config = config.poll.clone();
    if !urls.is_empty() {
        poll_config.urls = urls;
    }
    if poll_config.urls.is_empty() {
        anyhow::bail!("no URLs to poll; pass --url or set [poll] urls in the config");
    }

    let probe = Arc::new(HttpProbe::new(&config.crawl.user_agent)?);

    // ctrl-c flips the shutdown flag; every stage watches it.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, shutting down");
            let _ = shutdown_tx.send(true);
        }
    });

    tracing::info!(
        "polling {} URLs with {} workers (interval {}s)",
        poll_config.urls.len(),
        poll_config.num_workers,
        poll_config.poll_interval_secs
    );
    let final_state = poller::run(probe, &poll_config, shutdown_rx).await;

    println!("\nfinal state:");
    let mut entries: Vec<_> = final_state.iter().collect();
    entries.sort();
    for (url, status) in entries {
        println!(" {} {}", url, status);
    }

    Ok(())
}
