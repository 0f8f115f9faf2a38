//! sold-tracker - Sold-listing price tracker for eBay.ca and eBay.com
//!
//! Searches sold/completed listings and prints aggregated price statistics.

use anyhow::Result;
use clap::{Parser, Subcommand};
use sold_tracker::commands::SearchCommand;
use sold_tracker::config::{Config, OutputFormat};
use sold_tracker::ebay::Region;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sold-tracker",
    version,
    about = "Sold-listing price tracker for eBay.ca and eBay.com",
    long_about = "Searches eBay sold/completed listings across regions and reports per-title and overall price statistics."
)]
struct Cli {
    /// eBay regions to search, in order (comma-separated)
    #[arg(short, long, global = true, value_delimiter = ',')]
    region: Option<Vec<Region>>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "SOLD_TRACKER_PROXY")]
    proxy: Option<String>,

    /// Request timeout in seconds
    #[arg(
        long,
        global = true,
        env = "SOLD_TRACKER_TIMEOUT",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search sold listings and report price statistics
    #[command(alias = "s")]
    Search {
        /// Coin or collectible to search for
        #[arg(default_value = "2023 Silver Maple Leaf")]
        query: String,
    },

    /// List supported regions
    Regions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(regions) = cli.region {
        config.regions = regions;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    match cli.command {
        Commands::Search { query } => {
            let cmd = SearchCommand::new(config);
            let output = cmd.execute(&query).await?;
            println!("{}", output);
        }

        Commands::Regions => {
            println!("Supported eBay regions:\n");
            println!("{:<6} {:<12} {:<10} {:<10}", "Code", "Domain", "Currency", "Role");
            println!("{:-<6} {:-<12} {:-<10} {:-<10}", "", "", "", "");

            for region in Region::all() {
                println!(
                    "{:<6} {:<12} {:<10} {:<10}",
                    region.to_string(),
                    region.domain(),
                    region.currency(),
                    region.role()
                );
            }
        }
    }

    Ok(())
}
