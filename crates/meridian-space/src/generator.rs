//! Drawing fresh positions.

use std::sync::Arc;

use tracing::{trace, warn};

use crate::entropy::EntropySource;
use crate::error::GenerationError;
use crate::position::{Dimensions, Position};

/// Draws random positions from an [`EntropySource`].
///
/// Every coordinate is an independent uniform draw in `[0, depth)`. All
/// coordinates of one position come from a single batched call. No attempt
/// is made to keep positions unique across peers.
#[derive(Debug, Clone)]
pub struct CoordinateGenerator {
    dims: Dimensions,
    entropy: Arc<dyn EntropySource>,
}

impl CoordinateGenerator {
    /// Create a generator for the given space.
    pub fn new(dims: Dimensions, entropy: Arc<dyn EntropySource>) -> Self {
        Self { dims, entropy }
    }

    /// Shape of the space this generator draws from.
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Draw a new position.
    pub fn generate(&self) -> Result<Position, GenerationError> {
        let count = self.dims.count();
        let bound = self.dims.depth();

        let draw = self.entropy.draw_bounded(count, bound).map_err(|e| {
            warn!(error = %e, "entropy draw failed");
            GenerationError::from(e)
        })?;

        if draw.len() != count {
            warn!(expected = count, actual = draw.len(), "entropy draw has wrong length");
            return Err(GenerationError::DrawLength {
                expected: count,
                actual: draw.len(),
            });
        }
        if let Some((index, &value)) = draw.iter().enumerate().find(|(_, &v)| v >= bound) {
            warn!(index, value, bound, "entropy draw out of range");
            return Err(GenerationError::DrawOutOfRange { index, value, bound });
        }

        let position = Position::new(draw);
        trace!(%position, "generated position");
        Ok(position)
    }
}
