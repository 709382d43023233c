//! Meridian Peer Position Registry
//!
//! Tracks which position of the connection space each peer holds.
//!
//! # Operations
//!
//! - **create**: draw a fresh position for a peer, replacing any old one
//! - **search**: look up a peer's encoded position
//! - **delete**: remove a peer and hand back its position
//!
//! A [`PositionService`] adds a one-shot lifecycle on top: `boot` assigns
//! the instance identity and metadata, `shutdown` releases a signal that
//! background tasks can wait on.
//!
//! # Example
//!
//! ```
//! use meridian_registry::{PositionService, ServiceConfig};
//!
//! let config = ServiceConfig::default().with_dimensions(3, 4);
//! let service = PositionService::with_defaults(config)?;
//! service.boot()?;
//!
//! let position = service.create("peerA")?;
//! assert_eq!(service.search("peerA")?, position);
//!
//! service.shutdown();
//! # Ok::<(), meridian_registry::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod metadata;
pub mod registry;
pub mod service;

pub use config::ServiceConfig;
pub use error::{Error, Result};
pub use identity::{FixedIdentity, IdentityError, IdentityGenerator, RandomIdentity};
pub use lifecycle::{Lifecycle, OneShot};
pub use metadata::ServiceMetadata;
pub use registry::{PeerPositionRegistry, PositionRecord};
pub use service::{PositionService, PositionServiceBuilder};

pub use meridian_space::{
    Dimensions, EntropySource, Position, PositionCodec, ScriptedEntropy, ThreadRngEntropy,
};
