//! # `bevy_tiledlayer_data`
//!
//! Tile layer decoding for `bevy_tiledlayer`. Turns the `<data>` payload of a Tiled
//! tile layer into resolved tile definitions: which tileset, which local tile,
//! which way it is flipped.
//!
//! **This crate does NOT depend on Bevy** and does no I/O. It works on layers and
//! tilesets that some structural parser (TMX reader, `serde_json`) already filled in.
//!
//! ## Pipeline
//!
//! 1. [`payload`]: `csv` / `base64` (+ `zlib` / `gzip`) text to raw GIDs
//! 2. [`gid`]: GIDs to flip flags and bare IDs
//! 3. [`resolver`]: bare IDs to the owning tileset
//! 4. [`layer`]: the memoized per-layer orchestration of the above
//!
//! ## Example
//!
//! ```rust
//! use bevy_tiledlayer_data::prelude::*;
//!
//! let layer = Layer::new("walls", 2, 2, LayerPayload::csv("1,0,\n2,2147483649"));
//! let tilesets = TileSetIndex::new(&[TileSet::new("dungeon", 1)]);
//!
//! let cells = layer.tile_definitions(&tilesets).unwrap();
//! assert!(cells[1].is_nil());
//! assert_eq!(cells[2].as_tile().unwrap().id, TileId(1));
//! assert!(cells[3].as_tile().unwrap().flip.horizontal);
//! ```

pub mod error;
pub mod gid;
pub mod layer;
pub mod map;
pub mod payload;
pub mod resolver;
pub mod terrain;
pub mod tileset;

pub mod prelude {
    //! Common imports for `bevy_tiledlayer_data` users.

    pub use crate::error::DecodeError;
    pub use crate::gid::{FlipFlags, GlobalId, TileId};
    pub use crate::layer::{Layer, LayerPayload, TileDefinition, TileGlobalRef, TileRef};
    pub use crate::map::TiledMap;
    pub use crate::payload::{Compression, Encoding, PayloadDecoder, StandardDecoder};
    pub use crate::resolver::{RangePolicy, TileSetIndex};
    pub use crate::terrain::TerrainCorners;
    pub use crate::tileset::{Tile, TileSet};
}

pub use error::{DecodeError, Result};
