//! Quote-Harvest main entry point
//!
//! This is the command-line interface for the Quote-Harvest scraper.

use anyhow::Context;
use clap::Parser;
use quote_harvest::config::{load_config_or_default, validate, Config};
use quote_harvest::crawler::fetch_all_with_config;
use quote_harvest::output::{print_summary, write_quotes, RunSummary};
use quote_harvest::Quote;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Quote-Harvest: a paginated quote scraper
///
/// Walks the numbered listing pages of a quotes site until a page fails or
/// comes back empty, then writes every quote found to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "quote-harvest")]
#[command(version)]
#[command(about = "A paginated quote scraper", long_about = None)]
struct Cli {
    /// Path of the CSV file to write (default: configured csv-path, then quotes.csv)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the base URL of the listing site
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (config, output_path) = resolve_config(&cli)?;

    tracing::info!("Harvesting quotes from {}", config.source.base_url);

    let harvest = match fetch_all_with_config(&config).await {
        Ok(harvest) => harvest,
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            return Err(e.into());
        }
    };

    save_quotes(&harvest.quotes, &output_path)?;

    if !cli.quiet {
        print_summary(&RunSummary::from_harvest(&harvest, &output_path));
    }

    Ok(())
}

/// Loads the configuration, applies command-line overrides and picks the output path
fn resolve_config(cli: &Cli) -> anyhow::Result<(Config, PathBuf)> {
    let mut config = match load_config_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e).context("Failed to load configuration");
        }
    };

    if let Some(base_url) = &cli.base_url {
        config.source.base_url = base_url.clone();
        if let Err(e) = validate(&config) {
            tracing::error!("Invalid --base-url: {}", e);
            return Err(e).context("Invalid --base-url");
        }
    }

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.csv_path));

    Ok((config, output_path))
}

/// Writes the CSV file, logging the failure before handing it back
fn save_quotes(quotes: &[Quote], output_path: &Path) -> anyhow::Result<()> {
    if let Err(e) = write_quotes(quotes, output_path) {
        tracing::error!("Failed to write {}: {}", output_path.display(), e);
        return Err(e).with_context(|| format!("Failed to write {}", output_path.display()));
    }

    tracing::info!("Wrote {} quotes to {}", quotes.len(), output_path.display());
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quote_harvest=info,warn"),
            1 => EnvFilter::new("quote_harvest=debug,info"),
            _ => EnvFilter::new("quote_harvest=trace,debug"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
