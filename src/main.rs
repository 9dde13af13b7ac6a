mod config;
mod event;
pub mod helper;
mod query;
mod report;

use crate::config::MongoConfig;
use crate::query::MongoEventStore;
use clap::Parser;
use eyre::{Result, bail};
use log::debug;
use std::time::Duration;

/// Print the latest subgraph events stored in MongoDB
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Event type (e.g. depositRequest, redeemRequest)
    #[arg(long = "type", value_name = "TYPE")]
    event_type: String,

    /// Number of events to display
    #[arg(short, long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,

    /// Decimals of the vault asset (e.g. 6 for USDC, 18 for ETH)
    #[arg(short, long)]
    decimals: u32,

    /// MongoDB connect and server selection timeout, in seconds
    #[arg(long, default_value = "10")]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment variables from {:?}", path),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => bail!("Failed to load .env file: {}", e),
    }
    let config = MongoConfig::from_env()?;

    let store = MongoEventStore::try_new(&config, Duration::from_secs(args.timeout_secs)).await?;
    report::start(
        &store,
        &args.event_type,
        args.count,
        args.decimals,
        &mut std::io::stdout(),
    )
    .await?;

    Ok(())
}
