//! Meridian node binary
//!
//! Boots a position service, assigns a position to every peer named on
//! the command line and prints the results as JSON lines.
//!
//! Usage:
//!   meridian-node <peer>...
//!
//! Environment:
//!   MERIDIAN_CONFIG           Path to a JSON config file (overrides the variables below)
//!   MERIDIAN_DIMENSION_COUNT  Number of coordinate axes
//!   MERIDIAN_DIMENSION_DEPTH  Exclusive upper bound per coordinate
//!   MERIDIAN_SERVICE_NAME     Name reported in metadata (default: position)
//!   RUST_LOG                  Log filter

use std::sync::Arc;

use meridian_node::{assign_peers, load_config, Error};
use meridian_registry::PositionService;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meridian_node=info,meridian=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let peers: Vec<String> = std::env::args().skip(1).collect();
    if peers.is_empty() {
        return Err(Error::Usage.into());
    }

    let config = load_config()?;
    let service = Arc::new(PositionService::with_defaults(config)?);
    service.boot()?;

    let dims = service.dimensions();
    tracing::info!("Starting Meridian node");
    tracing::info!("  Dimensions: {} x [0, {})", dims.count(), dims.depth());
    tracing::info!("  Peers: {}", peers.len());

    // Log once the shutdown signal is released
    let mut signal = service.shutdown_signal();
    let watcher = tokio::spawn(async move {
        if signal.wait_for(|closed| *closed).await.is_ok() {
            tracing::info!("Shutdown signal received");
        }
    });

    let result = assign_peers(&service, &peers, &mut std::io::stdout().lock());

    service.shutdown();
    watcher.await?;

    Ok(result?)
}
