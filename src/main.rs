//! Main entry point for the tile-fetcher CLI

use clap::Parser;
use tile_fetcher::cli::{Cli, SuspendingStderr};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber with optional JSON formatting.
///
/// Lines go to stderr around any active progress bar.
fn init_tracing() {
    let json_format = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tile_fetcher=info"));

    if json_format {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(|| SuspendingStderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(|| SuspendingStderr)
            .init();
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    cli.execute().await.map_err(|e| anyhow::anyhow!(e))
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("Command failed: {}", e);
        std::process::exit(1);
    }
}
