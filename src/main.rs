//! Lead-Harvest main entry point
//!
//! This is the command-line interface for the Lead-Harvest directory crawler.

use anyhow::{bail, Context};
use clap::Parser;
use lead_harvest::catalog::page_url;
use lead_harvest::config::{load_config_with_hash, Config, CrawlSettings};
use lead_harvest::crawler::run_harvest;
use lead_harvest::output::{export_csv, generate_markdown_summary, print_report};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Lead-Harvest: a polite business-directory lead harvester
///
/// Lead-Harvest searches a catalog of public business directories for one
/// niche, respecting robots.txt, rate limits and a persistent page cache,
/// and exports the business contacts it recovers as CSV.
#[derive(Parser, Debug)]
#[command(name = "lead-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A polite business-directory lead harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Niche to harvest (see --list-niches)
    #[arg(short, long, required_unless_present = "list_niches")]
    niche: Option<String>,

    /// Result pages requested per source (overrides the config)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..=100))]
    max_pages: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// List configured niches and exit
    #[arg(long, conflicts_with = "dry_run")]
    list_niches: bool,

    /// Show the URLs that would be requested without crawling
    #[arg(long)]
    dry_run: bool,

    /// Bypass the page cache for this run
    #[arg(long)]
    no_cache: bool,

    /// CSV output path (overrides the config)
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Markdown summary path (overrides the config)
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.no_cache {
        config.crawler.cache_enabled = false;
    }

    if cli.list_niches {
        handle_list_niches(&config);
        return Ok(());
    }

    let Some(niche) = cli.niche.as_deref() else {
        bail!("--niche is required");
    };
    let max_pages = cli
        .max_pages
        .unwrap_or(config.crawler.max_pages_per_source);

    if cli.dry_run {
        handle_dry_run(&config, niche, max_pages)
    } else {
        handle_harvest(&cli, &config, &config_hash, niche, max_pages).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("lead_harvest=info,warn"),
            1 => EnvFilter::new("lead_harvest=debug,info"),
            2 => EnvFilter::new("lead_harvest=trace,debug"),
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

/// Handles --list-niches
fn handle_list_niches(config: &Config) {
    let settings = CrawlSettings::from_config(config);

    println!("Configured niches ({}):", settings.catalog.niches().len());
    for niche in settings.catalog.niches() {
        let sources = settings.catalog.sources_for(&niche.key).len();
        if niche.description.is_empty() {
            println!("  {} ({} sources)", niche.key, sources);
        } else {
            println!("  {} - {} ({} sources)", niche.key, niche.description, sources);
        }
    }
}

/// Handles --dry-run: shows every URL the harvest would request
fn handle_dry_run(config: &Config, niche: &str, max_pages: u32) -> anyhow::Result<()> {
    let settings = CrawlSettings::from_config(config);

    println!("=== Lead-Harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Region: {}", settings.region);
    println!("  Rate limit: {:?}", settings.rate_limit);
    println!("  Cache: {}", if settings.cache_enabled { "enabled" } else { "disabled" });
    println!("  Respect robots.txt: {}", settings.respect_robots);
    println!("  Pages per source: {}", max_pages);
    println!("  Lead cap: {}", settings.max_leads);

    println!("\nUser Agent:");
    println!("  {}", settings.user_agent);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    println!("  Summary: {}", config.output.summary_path);

    if !settings.catalog.contains(niche) {
        bail!("Unknown niche '{}' (see --list-niches)", niche);
    }

    let sources = settings.catalog.sources_for(niche);
    println!("\nSources for '{}' ({}):", niche, sources.len());
    for source in sources {
        let search_url = settings
            .catalog
            .search_url(source, niche, &settings.region);
        println!("  - {}", source.name);
        for page in 1..=max_pages {
            println!("    * {}", page_url(&search_url, page));
        }
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would request up to {} pages",
        sources.len() * max_pages as usize
    );

    Ok(())
}

/// Handles the main harvest
async fn handle_harvest(
    cli: &Cli,
    config: &Config,
    config_hash: &str,
    niche: &str,
    max_pages: u32,
) -> anyhow::Result<()> {
    let (leads, report) = run_harvest(config, niche, max_pages)
        .await
        .context("Harvest failed")?;

    let csv_path = cli
        .csv
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.csv_path));
    let summary_path = cli
        .summary
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.summary_path));

    export_csv(&leads, &csv_path)
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;
    generate_markdown_summary(&report, config_hash, &summary_path)
        .with_context(|| format!("Failed to write {}", summary_path.display()))?;

    if !cli.quiet {
        print_report(&report);
        println!();
        println!("✓ Leads written to: {}", csv_path.display());
        println!("✓ Summary written to: {}", summary_path.display());
    }

    Ok(())
}
