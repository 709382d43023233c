//! Meridian node: assigns positions to peers and reports them as JSON lines.
//!
//! The binary in `main.rs` only wires up logging and the runtime; the
//! reporting logic lives here so it can be tested against any writer.

use std::io::Write;

use meridian_registry::{PositionService, ServiceConfig};
use serde::Serialize;
use thiserror::Error;

/// Result type for node operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running the node.
#[derive(Debug, Error)]
pub enum Error {
    /// No peers were given on the command line
    #[error("usage: meridian-node <peer>...")]
    Usage,

    /// Config, generation or lifecycle failure
    #[error(transparent)]
    Registry(#[from] meridian_registry::Error),

    /// Output could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One line of output per peer.
#[derive(Debug, Serialize)]
struct Assignment<'a> {
    peer: &'a str,
    position: String,
}

/// Load config from the JSON file named by `MERIDIAN_CONFIG`, else from
/// the `MERIDIAN_*` variables.
pub fn load_config() -> Result<ServiceConfig> {
    match std::env::var("MERIDIAN_CONFIG") {
        Ok(path) => {
            tracing::info!("Loading config from {}", path);
            let json = std::fs::read_to_string(&path)?;
            Ok(ServiceConfig::from_json(&json)?)
        }
        Err(_) => Ok(ServiceConfig::from_env()?),
    }
}

/// Create a position for every peer and write one JSON object per line,
/// followed by the service metadata.
pub fn assign_peers<W: Write>(service: &PositionService, peers: &[String], out: &mut W) -> Result<()> {
    if peers.is_empty() {
        return Err(Error::Usage);
    }

    for peer in peers {
        let position = service.create(peer)?;
        serde_json::to_writer(&mut *out, &Assignment { peer, position })?;
        writeln!(out)?;
    }

    serde_json::to_writer(&mut *out, &service.metadata())?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
