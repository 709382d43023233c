//! Positions in the connection space and the bounds that shape it.

use std::fmt;

use crate::codec::DELIMITER;
use crate::error::{Error, Result};

/// Shape of the connection space.
///
/// `count` is the number of coordinate axes, `depth` the exclusive upper
/// bound on every coordinate. Both are positive and never change after
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDimensions"))]
pub struct Dimensions {
    count: usize,
    depth: u32,
}

/// Unvalidated wire form of [`Dimensions`]; deserialization goes through
/// [`Dimensions::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawDimensions {
    count: usize,
    depth: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDimensions> for Dimensions {
    type Error = Error;

    fn try_from(raw: RawDimensions) -> Result<Self> {
        Self::new(raw.count, raw.depth)
    }
}

impl Dimensions {
    /// Validate and create a space shape.
    pub fn new(count: usize, depth: u32) -> Result<Self> {
        if count == 0 {
            return Err(Error::Config("dimension count must not be empty".into()));
        }
        if depth == 0 {
            return Err(Error::Config("dimension depth must not be empty".into()));
        }
        Ok(Self { count, depth })
    }

    /// Number of coordinate axes.
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Exclusive upper bound on each coordinate.
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of distinct positions in the space, if it fits in a `u128`.
    pub fn capacity(&self) -> Option<u128> {
        let exp = u32::try_from(self.count).ok()?;
        u128::from(self.depth).checked_pow(exp)
    }

    /// Check that a position has the right length and stays inside the bounds.
    pub fn contains(&self, position: &Position) -> bool {
        position.len() == self.count && position.coords().iter().all(|&c| c < self.depth)
    }
}

/// A coordinate vector in the connection space.
///
/// The `Display` form is the canonical encoding: coordinates in axis
/// order, base 10, joined by [`DELIMITER`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Position(Vec<u32>);

impl Position {
    /// Wrap raw coordinates. Bounds are not checked; see [`Dimensions::contains`].
    pub fn new(coords: Vec<u32>) -> Self {
        Self(coords)
    }

    /// Coordinates in axis order.
    pub fn coords(&self) -> &[u32] {
        &self.0
    }

    /// Number of axes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the zero-axis position.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the raw coordinates.
    pub fn into_coords(self) -> Vec<u32> {
        self.0
    }
}

impl From<Vec<u32>> for Position {
    fn from(coords: Vec<u32>) -> Self {
        Self(coords)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut coords = self.0.iter();
        if let Some(first) = coords.next() {
            write!(f, "{first}")?;
        }
        for c in coords {
            write!(f, "{DELIMITER}{c}")?;
        }
        Ok(())
    }
}
