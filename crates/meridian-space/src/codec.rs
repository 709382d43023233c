//! Canonical text encoding of positions.
//!
//! A position `[1, 3, 0]` encodes as `"1,3,0"`. Each field is a base-10
//! integer with no sign, no whitespace and no leading zeros, so every
//! position has exactly one encoding and decoding an encoding gives the
//! position back.

use crate::error::FormatError;
use crate::position::{Dimensions, Position};

/// Separator between coordinates in the canonical encoding.
pub const DELIMITER: char = ',';

/// Encodes and decodes positions for one connection space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionCodec {
    dims: Dimensions,
}

impl PositionCodec {
    pub fn new(dims: Dimensions) -> Self {
        Self { dims }
    }

    /// Shape the decoder validates against.
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Render a position in canonical form.
    pub fn encode(&self, position: &Position) -> String {
        position.to_string()
    }

    /// Parse a canonical encoding, checking it against the space's shape.
    pub fn decode(&self, encoded: &str) -> Result<Position, FormatError> {
        let fields: Vec<&str> = encoded.split(DELIMITER).collect();
        if fields.len() != self.dims.count() {
            return Err(FormatError::FieldCount {
                expected: self.dims.count(),
                actual: fields.len(),
            });
        }

        let bound = self.dims.depth();
        let coords = fields
            .into_iter()
            .enumerate()
            .map(|(index, field)| -> Result<u32, FormatError> {
                let value = parse_field(field).ok_or_else(|| FormatError::InvalidField {
                    index,
                    field: field.to_string(),
                })?;
                if value >= bound {
                    return Err(FormatError::OutOfRange { index, value, bound });
                }
                Ok(value)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Position::new(coords))
    }
}

/// Parse one canonical field: ASCII digits only, no leading zero unless
/// the field is exactly `"0"`.
fn parse_field(field: &str) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if field.len() > 1 && field.starts_with('0') {
        return None;
    }
    field.parse().ok()
}
