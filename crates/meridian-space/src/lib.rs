//! Meridian Connection Space
//!
//! A discrete, fixed-dimensionality space in which every peer of the mesh
//! is given a coordinate.
//!
//! # Model
//!
//! A [`Position`] is a vector of exactly `count` coordinates, each in
//! `[0, depth)`. Both bounds live in [`Dimensions`] and are fixed when the
//! space is configured.
//!
//! - [`CoordinateGenerator`] draws fresh positions from an [`EntropySource`]
//!   in one batched call.
//! - [`PositionCodec`] turns positions into their canonical text form
//!   (`"1,3,0"`) and back.
//!
//! Nothing here assigns meaning to distances between positions. Two peers
//! may well end up on the same coordinate.

mod codec;
mod entropy;
mod error;
mod generator;
mod position;

pub use codec::{PositionCodec, DELIMITER};
pub use entropy::{EntropyError, EntropySource, ScriptedEntropy, ThreadRngEntropy};
pub use error::{Error, FormatError, GenerationError, Result};
pub use generator::CoordinateGenerator;
pub use position::{Dimensions, Position};
