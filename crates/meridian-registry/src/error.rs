//! Error types for meridian-registry.

use meridian_space::{FormatError, GenerationError};
use thiserror::Error;

use crate::identity::IdentityError;

/// Result type for registry and service operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in registry and service operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid setting or dependency at construction
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Drawing a position for a peer failed
    #[error("position generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// An encoded position could not be decoded
    #[error("malformed position: {0}")]
    Format(#[from] FormatError),

    /// No position is registered for the peer
    #[error("no position registered for peer {0:?}")]
    NotFound(String),

    /// The identity generator failed during boot
    #[error("identity generation failed: {0}")]
    Identity(#[from] IdentityError),
}

impl From<meridian_space::Error> for Error {
    fn from(e: meridian_space::Error) -> Self {
        match e {
            meridian_space::Error::Config(msg) => Error::Config(msg),
            meridian_space::Error::Generation(e) => Error::Generation(e),
            meridian_space::Error::Format(e) => Error::Format(e),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_errors_keep_their_kind() {
        let format = meridian_space::Error::Format(FormatError::FieldCount { expected: 3, actual: 2 });
        assert!(matches!(
            Error::from(format),
            Error::Format(FormatError::FieldCount { expected: 3, actual: 2 })
        ));

        let config = meridian_space::Error::Config("dimension count must not be empty".into());
        assert!(matches!(Error::from(config), Error::Config(_)));
    }
}
