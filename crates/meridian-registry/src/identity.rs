//! Identity generation for service instances.

use std::fmt;

use rand::RngCore;
use thiserror::Error;

/// Failure to produce an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct IdentityError(pub String);

/// Source of fresh unique identifiers.
pub trait IdentityGenerator: Send + Sync + fmt::Debug {
    fn new_id(&self) -> Result<String, IdentityError>;
}

/// 128 random bits from the OS-seeded thread RNG, hex encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdentity;

impl RandomIdentity {
    /// Bytes of randomness per identifier.
    pub const ID_BYTES: usize = 16;

    pub fn new() -> Self {
        Self
    }
}

impl IdentityGenerator for RandomIdentity {
    fn new_id(&self) -> Result<String, IdentityError> {
        let mut bytes = [0u8; Self::ID_BYTES];
        rand::thread_rng()
            .try_fill_bytes(&mut bytes)
            .map_err(|e| IdentityError(e.to_string()))?;
        Ok(hex::encode(bytes))
    }
}

/// Always hands out the same identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedIdentity(String);

impl FixedIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl IdentityGenerator for FixedIdentity {
    fn new_id(&self) -> Result<String, IdentityError> {
        Ok(self.0.clone())
    }
}
