//! Gleaner main entry point
//!
//! Command-line interface for the gleaner notice board collector.

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use gleaner::catalog::DateInterval;
use gleaner::config::load_config;
use gleaner::crawler::harvest;
use gleaner::output::{render_report, write_report};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Gleaner: a date-windowed notice board collector
///
/// Gleaner pages through configured notice boards, resolves which listing
/// pages can contain records inside the requested date window, and writes
/// the matching records as a markdown report.
#[derive(Parser, Debug)]
#[command(name = "gleaner")]
#[command(version = "1.0.0")]
#[command(about = "Collects notice board records inside a date window", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Override the configured window start date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    start: Option<NaiveDate>,

    /// Override the configured window end date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    end: Option<NaiveDate>,

    /// Print the report to stdout instead of the configured file
    #[arg(long)]
    stdout: bool,

    /// Validate config and show what would be harvested without fetching
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config).context("failed to load configuration")?;

    let start = cli.start.unwrap_or(config.crawl.start_date);
    let end = cli.end.unwrap_or(config.crawl.end_date);
    let interval = DateInterval::new(start, end);

    if cli.dry_run {
        handle_dry_run(&config, &interval);
        return Ok(());
    }

    let report_path = PathBuf::from(&config.output.report_path);
    let reports = harvest(config, interval).await?;

    let total: u32 = reports.iter().map(|r| r.stats.items_collected).sum();
    tracing::info!(
        "Harvested {} records across {} sources",
        total,
        reports.len()
    );

    if cli.stdout {
        print!("{}", render_report(&reports));
    } else {
        write_report(&reports, &report_path).context("failed to write report")?;
        tracing::info!("Report written to: {}", report_path.display());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("gleaner=info,warn"),
            1 => EnvFilter::new("gleaner=debug,info"),
            2 => EnvFilter::new("gleaner=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the harvest plan
fn handle_dry_run(config: &gleaner::config::Config, interval: &DateInterval) {
    println!("=== Gleaner Dry Run ===\n");

    println!("Window:");
    println!("  Start: {}", interval.start());
    println!("  End:   {}", interval.end());
    println!("  Pacing: {}ms", config.crawl.pacing_ms);

    println!("\nOutput:");
    println!("  Report: {}", config.output.report_path);

    println!("\nSources ({}):", config.sources.len());
    for source in &config.sources {
        println!("  - {} ({:?})", source.name, source.ordering);
        println!("    URL: {}", source.list_url);
        println!("    Heading: {}", source.heading);
        if let Some(hint) = source.total_pages_hint {
            println!("    Total pages hint: {hint}");
        }
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would harvest {} sources", config.sources.len());
}
