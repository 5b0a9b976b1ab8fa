//! Link-Catalog main entry point
//!
//! This is the command-line interface for the README link catalog.

use anyhow::Context;
use clap::Parser;
use link_catalog::catalog::{CatalogStore, JsonCatalogStore};
use link_catalog::config::{load_config_with_hash, Config};
use link_catalog::history::run_dates;
use link_catalog::output::{load_statistics, print_statistics};
use link_catalog::sync::run_sync;
use link_catalog::CatalogError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Link-Catalog: keeps a metadata catalog of the links in a README
///
/// The default pass reconciles the catalog with the current document,
/// fetching metadata for new links and pruning removed ones. The dates
/// pass fills in when each link first appeared in the document history.
#[derive(Parser, Debug)]
#[command(name = "link-catalog")]
#[command(version)]
#[command(about = "Catalog the links of a README with metadata and history", long_about = None)]
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

    /// Backfill added dates from the document's revision history
    #[arg(long, conflicts_with_all = ["dry_run", "stats"])]
    dates: bool,

    /// Validate config and show what would run without touching anything
    #[arg(long, conflicts_with_all = ["dates", "stats"])]
    dry_run: bool,

    /// Show statistics for the persisted catalog and exit
    #[arg(long, conflicts_with_all = ["dates", "dry_run"])]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else if cli.dates {
        handle_dates(&config).await?;
    } else {
        handle_sync(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_catalog=info,warn"),
            1 => EnvFilter::new("link_catalog=debug,info"),
            2 => EnvFilter::new("link_catalog=trace,debug"),
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

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &Config) {
    println!("=== Link-Catalog Dry Run ===\n");

    println!("Document:");
    println!(
        "  {}/{}:{}{}",
        config.source.owner,
        config.source.repo,
        config.source.path,
        config
            .source
            .branch
            .as_deref()
            .map(|b| format!(" @ {}", b))
            .unwrap_or_default()
    );
    println!("  API: {}", config.source.api_base);

    println!("\nCatalog:");
    println!("  Path: {}", config.catalog.path);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nMetadata:");
    println!("  oEmbed endpoint: {}", config.metadata.oembed_endpoint);
    println!("  Thumbnail base: {}", config.metadata.thumbnail_base);
    println!("  Video hosts: {}", config.metadata.video_hosts.join(", "));
    println!("  Request timeout: {}s", config.metadata.request_timeout_secs);

    println!("\nPacing:");
    println!("  Between links: {}ms", config.pacing.link_delay_ms);
    println!("  Between revisions: {}ms", config.pacing.revision_delay_ms);
    println!("  Between dated URLs: {}ms", config.pacing.date_delay_ms);

    println!("\nHistory:");
    println!("  Revision window: {}", config.history.per_page);
    println!("  Revisit provisional dates: {}", config.history.revisit_provisional);
    println!("  Cache revisions: {}", config.history.cache_revisions);

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: summarizes the persisted catalog
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let store = JsonCatalogStore::new(&config.catalog.path);
    println!("Catalog: {}\n", store.location());

    let catalog = store
        .load()
        .context("failed to read catalog")?
        .ok_or_else(|| CatalogError::MissingCatalog {
            path: store.location(),
        })?;

    print_statistics(&load_statistics(&catalog));
    Ok(())
}

/// Handles the --dates mode: backfills added dates
async fn handle_dates(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Dating links from {}/{}:{}",
        config.source.owner,
        config.source.repo,
        config.source.path
    );

    let report = run_dates(config).await.context("dates pass failed")?;
    if report.provisional > 0 {
        tracing::warn!(
            "{} links have provisional dates; rerun to retry them",
            report.provisional
        );
    }
    Ok(())
}

/// Handles the default sync pass
async fn handle_sync(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Syncing {} with {}/{}:{}",
        config.catalog.path,
        config.source.owner,
        config.source.repo,
        config.source.path
    );

    let report = run_sync(config).await.context("sync pass failed")?;
    if !report.changed() {
        tracing::info!("Catalog already up to date");
    }
    Ok(())
}
