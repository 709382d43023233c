//! Peer position registry.
//!
//! Maps peer identifiers to their current position. One record per peer;
//! a repeated create replaces the old record (last-write-wins). Records
//! live until deleted, with no expiry.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use meridian_space::{CoordinateGenerator, Dimensions, Position, PositionCodec};
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// A peer and the position assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionRecord {
    /// Opaque peer identifier.
    pub peer: String,

    /// Assigned coordinates.
    pub position: Position,

    /// Canonical encoding of `position`.
    pub encoded: String,
}

/// Registry of peer positions.
///
/// All access goes through one coarse `RwLock`. Entropy for a new position
/// is drawn before the lock is taken, so a slow entropy source never holds
/// up readers.
#[derive(Debug)]
pub struct PeerPositionRegistry {
    generator: CoordinateGenerator,
    codec: PositionCodec,
    records: RwLock<HashMap<String, PositionRecord>>,
}

impl PeerPositionRegistry {
    /// Create an empty registry drawing positions from `generator`.
    pub fn new(generator: CoordinateGenerator) -> Self {
        let codec = PositionCodec::new(generator.dimensions());
        Self {
            generator,
            codec,
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Shape of the space positions are drawn from.
    pub fn dimensions(&self) -> Dimensions {
        self.generator.dimensions()
    }

    /// Codec matching this registry's space.
    pub fn codec(&self) -> &PositionCodec {
        &self.codec
    }

    // Every critical section is one map operation, so a poisoned lock
    // still guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, PositionRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, PositionRecord>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Draw and encode a position without registering it.
    pub fn generate(&self) -> Result<(Position, String)> {
        let position = self.generator.generate()?;
        let encoded = self.codec.encode(&position);
        Ok((position, encoded))
    }

    /// Assign a fresh position to `peer`, replacing any previous one.
    pub fn create(&self, peer: &str) -> Result<String> {
        let (position, encoded) = self.generate()?;
        let record = PositionRecord {
            peer: peer.to_string(),
            position,
            encoded: encoded.clone(),
        };

        let previous = self.write().insert(peer.to_string(), record);
        debug!(
            peer,
            position = %encoded,
            replaced = previous.is_some(),
            "created position"
        );
        Ok(encoded)
    }

    /// Encoded position of `peer`.
    pub fn search(&self, peer: &str) -> Result<String> {
        let encoded = self
            .read()
            .get(peer)
            .map(|record| record.encoded.clone())
            .ok_or_else(|| Error::NotFound(peer.to_string()))?;
        debug!(peer, position = %encoded, "found position");
        Ok(encoded)
    }

    /// Remove `peer` and return the position it had.
    pub fn delete(&self, peer: &str) -> Result<String> {
        let record = self
            .write()
            .remove(peer)
            .ok_or_else(|| Error::NotFound(peer.to_string()))?;
        debug!(peer, position = %record.encoded, "deleted position");
        Ok(record.encoded)
    }

    /// Full record for `peer`, if any.
    pub fn record(&self, peer: &str) -> Option<PositionRecord> {
        self.read().get(peer).cloned()
    }

    pub fn contains(&self, peer: &str) -> bool {
        self.read().contains_key(peer)
    }

    /// Number of registered peers.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Snapshot of registered peer IDs, sorted.
    pub fn peers(&self) -> Vec<String> {
        let mut peers: Vec<_> = self.read().keys().cloned().collect();
        peers.sort();
        peers
    }
}
