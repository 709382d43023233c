//! Error types for meridian-space.

use thiserror::Error;

use crate::entropy::EntropyError;

/// Result type for meridian-space operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the connection space.
#[derive(Debug, Error)]
pub enum Error {
    /// A setting was missing or invalid at construction time.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Drawing a fresh position failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// An encoded position could not be decoded.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Failure to produce a position from the entropy source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The entropy source itself failed.
    #[error("entropy source failed: {0}")]
    Entropy(#[from] EntropyError),

    /// The entropy source returned the wrong number of values.
    #[error("entropy draw returned {actual} values, expected {expected}")]
    DrawLength { expected: usize, actual: usize },

    /// The entropy source returned a value outside the requested bound.
    #[error("entropy draw {index} is {value}, outside [0, {bound})")]
    DrawOutOfRange { index: usize, value: u32, bound: u32 },
}

/// Failure to decode the canonical text form of a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Wrong number of delimited fields.
    #[error("expected {expected} coordinates, found {actual}")]
    FieldCount { expected: usize, actual: usize },

    /// A field is not a canonical non-negative integer.
    #[error("coordinate {index} is not a canonical non-negative integer: {field:?}")]
    InvalidField { index: usize, field: String },

    /// A field parsed but lies outside the dimension depth.
    #[error("coordinate {index} is {value}, outside [0, {bound})")]
    OutOfRange { index: usize, value: u32, bound: u32 },
}
