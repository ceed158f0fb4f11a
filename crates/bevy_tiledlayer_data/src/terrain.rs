//! Terrain corner descriptors (`<tile terrain="0,0,1,1">`).

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, Result};
use crate::gid::TileId;

/// The terrain tile used at each corner of a tile.
///
/// The zero value is what an untagged tile reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerrainCorners {
    pub top_left: TileId,
    pub top_right: TileId,
    pub bottom_left: TileId,
    pub bottom_right: TileId,
}

impl TerrainCorners {
    /// Parse a `top-left,top-right,bottom-left,bottom-right` descriptor.
    ///
    /// An empty descriptor yields the zero value.
    ///
    /// # Errors
    ///
    /// [`DecodeError::TerrainFieldCount`] unless there are exactly four fields,
    /// [`DecodeError::InvalidTerrainField`] if one of them is not an integer.
    pub fn parse(descriptor: &str) -> Result<Self> {
        if descriptor.is_empty() {
            return Ok(Self::default());
        }

        let fields: Vec<&str> = descriptor.split(',').collect();
        let [top_left, top_right, bottom_left, bottom_right] = fields.as_slice() else {
            return Err(DecodeError::TerrainFieldCount {
                descriptor: descriptor.to_string(),
                count: fields.len(),
            });
        };

        let parse_field = |field: &str| {
            let field = field.trim();
            field
                .parse::<u32>()
                .map(TileId)
                .map_err(|source| DecodeError::InvalidTerrainField {
                    descriptor: descriptor.to_string(),
                    field: field.to_string(),
                    source,
                })
        };

        Ok(Self {
            top_left: parse_field(*top_left)?,
            top_right: parse_field(*top_right)?,
            bottom_left: parse_field(*bottom_left)?,
            bottom_right: parse_field(*bottom_right)?,
        })
    }
}
