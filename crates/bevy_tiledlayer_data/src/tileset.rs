//! Tilesets and per-tile metadata.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::gid::{GlobalId, TileId};
use crate::terrain::TerrainCorners;

/// A tileset as referenced by a map.
///
/// Only `first_gid` and `tiles` take part in decoding; the remaining fields are
/// carried through for consumers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSet {
    /// First global ID of this tileset in the map's shared ID space.
    #[serde(rename = "firstgid")]
    pub first_gid: GlobalId,

    pub name: String,

    /// External `.tsx` path, if the tileset is not embedded.
    pub source: String,

    #[serde(rename = "tilewidth")]
    pub tile_width: u32,

    #[serde(rename = "tileheight")]
    pub tile_height: u32,

    #[serde(rename = "tilecount")]
    pub tile_count: u32,

    pub columns: u32,

    /// Tiles that declare metadata. Most tiles of a tileset usually don't.
    pub tiles: Vec<Tile>,
}

impl TileSet {
    pub fn new(name: impl Into<String>, first_gid: u32) -> Self {
        Self {
            first_gid: GlobalId(first_gid),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style setter for the declared tile count.
    pub fn with_tile_count(mut self, tile_count: u32) -> Self {
        self.tile_count = tile_count;
        self
    }

    /// Builder-style append of a metadata entry.
    pub fn with_tile(mut self, tile: Tile) -> Self {
        self.tiles.push(tile);
        self
    }

    /// Metadata for a local tile ID, if the tileset declares any.
    pub fn tile_with_id(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    pub(crate) fn tile_position(&self, id: TileId) -> Option<usize> {
        self.tiles.iter().position(|tile| tile.id == id)
    }

    /// One past the last bare ID this tileset declares, when it declares a count.
    pub fn end_gid(&self) -> Option<u32> {
        (self.tile_count > 0).then(|| self.first_gid.0.saturating_add(self.tile_count))
    }
}

/// Metadata attached to a single tile of a tileset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tile {
    pub id: TileId,

    #[serde(rename = "type")]
    pub tile_type: String,

    pub probability: f32,

    /// Unparsed `terrain` attribute; read it through [`Tile::terrain_corners`].
    #[serde(rename = "terrain")]
    pub raw_terrain: String,

    #[serde(skip)]
    terrain: OnceLock<TerrainCorners>,
}

impl Tile {
    pub fn new(id: u32) -> Self {
        Self {
            id: TileId(id),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, tile_type: impl Into<String>) -> Self {
        self.tile_type = tile_type.into();
        self
    }

    pub fn with_terrain(mut self, descriptor: impl Into<String>) -> Self {
        self.raw_terrain = descriptor.into();
        self.terrain = OnceLock::new();
        self
    }

    /// Terrain corners of this tile, parsed on first access.
    pub fn terrain_corners(&self) -> Result<TerrainCorners> {
        if let Some(corners) = self.terrain.get() {
            return Ok(*corners);
        }

        let corners = TerrainCorners::parse(&self.raw_terrain)?;
        Ok(*self.terrain.get_or_init(|| corners))
    }
}
