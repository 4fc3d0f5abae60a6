use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use learnstr_core::constants::kinds;
use learnstr_core::nostr::EventFetcher;
use learnstr_core::zaps::{summarize_zaps, ZapSummary, Zappable};
use learnstr_core::{CoreConfig, EventAddress};

#[derive(Parser)]
#[command(name = "learnstr")]
#[command(about = "Nostr client for developer-education content and zap totals")]
struct Cli {
    /// Relay URL (can be given multiple times; defaults to the built-in set)
    #[arg(long, short = 'r')]
    relay: Vec<String>,

    /// Fetch timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Pretty-print JSON output
    #[arg(long, short)]
    pretty: bool,

    /// Log filter (e.g. "info", "learnstr_core=debug")
    #[arg(long, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List published resources (documents and videos)
    Resources {
        /// Restrict to one author (hex or bech32 public key)
        #[arg(long, short)]
        author: Option<String>,
    },

    /// Show a course and its lesson addresses
    Course {
        /// Course address (30004:pubkey:identifier)
        address: String,
    },

    /// Sum zap receipts for a piece of content
    Zaps {
        /// Content address (kind:pubkey:identifier)
        address: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log)?;

    let mut config = if cli.relay.is_empty() {
        CoreConfig::default()
    } else {
        CoreConfig::new(cli.relay.clone())
    };
    config = config.with_fetch_timeout(Duration::from_secs(cli.timeout));

    let fetcher = EventFetcher::connect(&config).await?;

    match &cli.command {
        Commands::Resources { author } => {
            let resources = fetcher.fetch_resources(author.as_deref()).await?;
            print_json(&resources, cli.pretty)
        }
        Commands::Course { address } => {
            let address: EventAddress = address.parse()?;
            if address.kind != kinds::COURSE {
                bail!("not a course address (expected kind {})", kinds::COURSE);
            }
            let course = fetcher
                .fetch_course(&address)
                .await?
                .with_context(|| format!("no course found at {address}"))?;
            print_json(&course, cli.pretty)
        }
        Commands::Zaps { address } => {
            let address: EventAddress = address.parse()?;
            let summary = zap_summary(&fetcher, &address).await?;
            print_json(&summary, cli.pretty)
        }
    }
}

/// Resolve the content at an address, fetch its receipts over both
/// reference schemes and aggregate them
async fn zap_summary(fetcher: &EventFetcher, address: &EventAddress) -> Result<ZapSummary> {
    let target: Box<dyn Zappable> = if address.kind == kinds::COURSE {
        Box::new(
            fetcher
                .fetch_course(address)
                .await?
                .with_context(|| format!("no course found at {address}"))?,
        )
    } else {
        Box::new(
            fetcher
                .fetch_resource(address)
                .await?
                .with_context(|| format!("no resource found at {address}"))?,
        )
    };

    let receipts = fetcher
        .fetch_zap_receipts(target.event_id(), &target.address())
        .await?;
    Ok(summarize_zaps(target.as_ref(), &receipts))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{output}");
    Ok(())
}

fn init_logging(filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter).context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    Ok(())
}
