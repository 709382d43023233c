//! Position service: registry, lifecycle and metadata behind one handle.

use std::collections::BTreeMap;
use std::sync::Arc;

use meridian_space::{CoordinateGenerator, Dimensions, EntropySource, PositionCodec, ThreadRngEntropy};
use tokio::sync::watch;
use tracing::debug;

use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::identity::{IdentityGenerator, RandomIdentity};
use crate::lifecycle::Lifecycle;
use crate::metadata::ServiceMetadata;
use crate::registry::{PeerPositionRegistry, PositionRecord};

/// Builder for [`PositionService`].
///
/// Both collaborators must be supplied; [`PositionServiceBuilder::build`]
/// validates everything before any service state exists.
#[derive(Debug, Default)]
pub struct PositionServiceBuilder {
    config: ServiceConfig,
    entropy: Option<Arc<dyn EntropySource>>,
    identity: Option<Arc<dyn IdentityGenerator>>,
}

impl PositionServiceBuilder {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            entropy: None,
            identity: None,
        }
    }

    /// Set the entropy source positions are drawn from.
    #[must_use]
    pub fn entropy(mut self, entropy: Arc<dyn EntropySource>) -> Self {
        self.entropy = Some(entropy);
        self
    }

    /// Set the identity generator used at boot.
    #[must_use]
    pub fn identity(mut self, identity: Arc<dyn IdentityGenerator>) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn build(self) -> Result<PositionService> {
        let entropy = self
            .entropy
            .ok_or_else(|| Error::Config("entropy source must not be empty".into()))?;
        let identity = self
            .identity
            .ok_or_else(|| Error::Config("identity generator must not be empty".into()))?;
        let dims = self.config.dimensions()?;

        let registry = PeerPositionRegistry::new(CoordinateGenerator::new(dims, entropy));
        debug!(
            name = %self.config.name,
            dimension_count = dims.count(),
            dimension_depth = dims.depth(),
            "position service created"
        );

        Ok(PositionService {
            config: self.config,
            registry,
            lifecycle: Lifecycle::new(),
            identity,
        })
    }
}

/// Manages the positions of peers within the connection space.
///
/// Shareable across threads; wrap in an `Arc` to hand it out.
#[derive(Debug)]
pub struct PositionService {
    config: ServiceConfig,
    registry: PeerPositionRegistry,
    lifecycle: Lifecycle,
    identity: Arc<dyn IdentityGenerator>,
}

impl PositionService {
    /// Start building a service from `config`.
    pub fn builder(config: ServiceConfig) -> PositionServiceBuilder {
        PositionServiceBuilder::new(config)
    }

    /// Create a service from explicit collaborators.
    pub fn new(
        config: ServiceConfig,
        entropy: Arc<dyn EntropySource>,
        identity: Arc<dyn IdentityGenerator>,
    ) -> Result<Self> {
        Self::builder(config).entropy(entropy).identity(identity).build()
    }

    /// Create a service with the thread RNG and random hex identities.
    pub fn with_defaults(config: ServiceConfig) -> Result<Self> {
        Self::new(config, Arc::new(ThreadRngEntropy), Arc::new(RandomIdentity))
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn dimensions(&self) -> Dimensions {
        self.registry.dimensions()
    }

    pub fn codec(&self) -> &PositionCodec {
        self.registry.codec()
    }

    pub fn registry(&self) -> &PeerPositionRegistry {
        &self.registry
    }

    /// Assign a fresh position to `peer`; returns its encoding.
    pub fn create(&self, peer: &str) -> Result<String> {
        debug!(func = "create", peer);
        self.registry.create(peer)
    }

    /// Encoded position of `peer`.
    pub fn search(&self, peer: &str) -> Result<String> {
        debug!(func = "search", peer);
        self.registry.search(peer)
    }

    /// Remove `peer`; returns the position it had.
    pub fn delete(&self, peer: &str) -> Result<String> {
        debug!(func = "delete", peer);
        self.registry.delete(peer)
    }

    /// Encoded throwaway position, not registered for any peer.
    pub fn default_position(&self) -> Result<String> {
        debug!(func = "default_position");
        let (_, encoded) = self.registry.generate()?;
        Ok(encoded)
    }

    pub fn record(&self, peer: &str) -> Option<PositionRecord> {
        self.registry.record(peer)
    }

    /// Assign the service identity. Only the first successful call does work.
    pub fn boot(&self) -> Result<bool> {
        self.lifecycle.boot(self.identity.as_ref(), &self.config.name)
    }

    /// Release the shutdown signal. Only the first call does work.
    pub fn shutdown(&self) -> bool {
        self.lifecycle.shutdown()
    }

    pub fn is_booted(&self) -> bool {
        self.lifecycle.is_booted()
    }

    pub fn is_shut_down(&self) -> bool {
        self.lifecycle.is_shut_down()
    }

    /// `id` / `name` / `type` map; empty until boot completes.
    pub fn metadata(&self) -> BTreeMap<String, String> {
        self.lifecycle
            .metadata()
            .map(ServiceMetadata::to_map)
            .unwrap_or_default()
    }

    pub fn service_metadata(&self) -> Option<&ServiceMetadata> {
        self.lifecycle.metadata()
    }

    /// Receiver that flips to `true` on shutdown.
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.lifecycle.shutdown_signal()
    }
}
