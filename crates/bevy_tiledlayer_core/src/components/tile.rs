//! Decoded tile grid components.
//!
//! Individual tiles are NOT spawned as entities. Decoded cells are stored in the
//! `TileLayerData` component on the layer entity.

use bevy::prelude::*;
use bevy_tiledlayer_data::layer::TileRef;

/// Decoded tile grid attached to tile layer entities.
///
/// Rendering and physics plugins decide what to do with it.
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use bevy_tiledlayer_core::components::tile::TileLayerData;
/// fn count_walls(layer_query: Query<&TileLayerData>) {
///     for tile_data in layer_query.iter() {
///         let walls = tile_data
///             .iter_tiles()
///             .filter(|(_, _, tile)| tile.tile_type.as_deref() == Some("wall"))
///             .count();
///         info!("{} walls", walls);
///     }
/// }
/// ```
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct TileLayerData {
    /// Layer width in tiles
    pub width: u32,

    /// Layer height in tiles
    pub height: u32,

    /// Flattened grid of tiles: index = y * width + x
    /// None = empty tile
    pub tiles: Vec<Option<TileInstance>>,
}

impl TileLayerData {
    /// Create an empty tile layer with the given dimensions.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![None; width as usize * height as usize],
        }
    }

    /// Get tile at position (returns None if out of bounds or empty).
    pub fn get(&self, x: u32, y: u32) -> Option<&TileInstance> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles.get(self.index(x, y))?.as_ref()
    }

    /// Set tile at position. Out-of-bounds positions are ignored.
    pub fn set(&mut self, x: u32, y: u32, tile: Option<TileInstance>) {
        if x < self.width && y < self.height {
            let index = self.index(x, y);
            if let Some(slot) = self.tiles.get_mut(index) {
                *slot = tile;
            }
        }
    }

    /// Iterate all non-empty tiles with their positions.
    ///
    /// Returns `(x, y, tile_instance)` tuples in row-major order.
    pub fn iter_tiles(&self) -> impl Iterator<Item = (u32, u32, &TileInstance)> {
        self.tiles.iter().enumerate().filter_map(|(idx, tile)| {
            tile.as_ref().map(|t| {
                let width = self.width as usize;
                ((idx % width) as u32, (idx / width) as u32, t)
            })
        })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// One decoded cell (NOT a component, stored in `TileLayerData`).
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct TileInstance {
    /// Original GID from the map, flip bits included
    pub gid: u32,

    /// Name of the owning tileset
    pub tileset_name: String,

    /// `firstgid` of the owning tileset
    pub first_gid: u32,

    /// Local tile ID within the tileset (0-based)
    pub tile_id: u32,

    /// Tile class from the tileset's per-tile metadata, if any
    pub tile_type: Option<String>,

    /// Horizontal flip flag
    pub flipped_h: bool,

    /// Vertical flip flag
    pub flipped_v: bool,

    /// Diagonal flip flag (used for rotation in some contexts)
    pub flipped_d: bool,
}

impl From<&TileRef> for TileInstance {
    fn from(tile: &TileRef) -> Self {
        Self {
            gid: tile.gid.0,
            tileset_name: tile.tileset.name.clone(),
            first_gid: tile.tileset.first_gid.0,
            tile_id: tile.id.0,
            tile_type: tile
                .tile()
                .map(|meta| meta.tile_type.clone())
                .filter(|tile_type| !tile_type.is_empty()),
            flipped_h: tile.flip.horizontal,
            flipped_v: tile.flip.vertical,
            flipped_d: tile.flip.diagonal,
        }
    }
}
