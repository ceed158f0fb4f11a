//! Tile layers and their lazily decoded contents.
//!
//! Decoding happens in two memoized stages:
//!
//! 1. [`Layer::tile_refs`]: raw GIDs, straight from the structured list or decoded
//!    from the CSV/base64 payload.
//! 2. [`Layer::tile_definitions`]: every GID resolved against the map's tilesets.
//!
//! Each stage runs at most once per layer; later calls return the cached slice.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{DecodeError, Result};
use crate::gid::{FlipFlags, GlobalId, TileId};
use crate::payload::{Compression, Encoding, PayloadDecoder, StandardDecoder, decode_bytes};
use crate::resolver::TileSetIndex;
use crate::tileset::{Tile, TileSet};

/// One cell as stored in the map: just its packed GID.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileGlobalRef {
    pub gid: GlobalId,
}

impl From<u32> for TileGlobalRef {
    fn from(raw: u32) -> Self {
        Self { gid: GlobalId(raw) }
    }
}

/// Where a layer's cells come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerPayload {
    /// Already-parsed per-cell references (`<tile gid="..."/>` children, JSON arrays).
    Structured(Vec<TileGlobalRef>),
    /// Encoded text, still to be decoded.
    Encoded {
        encoding: Encoding,
        compression: Compression,
        /// Raw element text, including any surrounding whitespace.
        raw: Vec<u8>,
    },
}

impl Default for LayerPayload {
    fn default() -> Self {
        LayerPayload::Structured(Vec::new())
    }
}

impl LayerPayload {
    /// Pick the payload from everything a `<data>` element can carry.
    ///
    /// A non-empty structured list wins; otherwise the encoded text is used.
    pub fn from_parts(
        encoding: Encoding,
        compression: Compression,
        structured: Vec<TileGlobalRef>,
        raw: Vec<u8>,
    ) -> Self {
        if structured.is_empty() {
            LayerPayload::Encoded {
                encoding,
                compression,
                raw,
            }
        } else {
            LayerPayload::Structured(structured)
        }
    }

    pub fn structured(gids: impl IntoIterator<Item = u32>) -> Self {
        LayerPayload::Structured(gids.into_iter().map(TileGlobalRef::from).collect())
    }

    pub fn csv(text: impl Into<String>) -> Self {
        LayerPayload::Encoded {
            encoding: Encoding::Csv,
            compression: Compression::None,
            raw: text.into().into_bytes(),
        }
    }

    pub fn base64(compression: Compression, text: impl Into<String>) -> Self {
        LayerPayload::Encoded {
            encoding: Encoding::Base64,
            compression,
            raw: text.into().into_bytes(),
        }
    }
}

/// A decoded cell.
#[derive(Debug, Clone, PartialEq)]
pub enum TileDefinition {
    /// Empty cell (bare GID 0). Flip bits on an empty cell are dropped.
    Nil,
    Tile(TileRef),
}

impl TileDefinition {
    pub fn is_nil(&self) -> bool {
        matches!(self, TileDefinition::Nil)
    }

    pub fn as_tile(&self) -> Option<&TileRef> {
        match self {
            TileDefinition::Nil => None,
            TileDefinition::Tile(tile) => Some(tile),
        }
    }
}

/// A non-empty cell resolved against its tileset.
#[derive(Debug, Clone)]
pub struct TileRef {
    /// Tileset-local tile ID.
    pub id: TileId,
    /// The GID as stored in the map, flags included.
    pub gid: GlobalId,
    pub tileset: Arc<TileSet>,
    pub flip: FlipFlags,
    tile_index: Option<usize>,
}

impl TileRef {
    /// Per-tile metadata, if the tileset declares any for this ID.
    pub fn tile(&self) -> Option<&Tile> {
        self.tile_index.and_then(|index| self.tileset.tiles.get(index))
    }
}

impl PartialEq for TileRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.gid == other.gid
            && self.flip == other.flip
            && self.tile_index == other.tile_index
            && Arc::ptr_eq(&self.tileset, &other.tileset)
    }
}

/// A tile layer: a `width * height` grid of cells in row-major order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "RawLayer")]
pub struct Layer {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub payload: LayerPayload,

    refs: OnceLock<Vec<TileGlobalRef>>,
    definitions: OnceLock<Vec<TileDefinition>>,
}

impl Layer {
    pub fn new(name: impl Into<String>, width: u32, height: u32, payload: LayerPayload) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            payload,
            ..Default::default()
        }
    }

    /// Number of cells the layer's dimensions call for.
    pub fn expected_cells(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The payload after base64 decoding and decompression.
    ///
    /// Structured layers have no byte form and yield an empty buffer.
    pub fn bytes(&self) -> Result<Vec<u8>> {
        match &self.payload {
            LayerPayload::Structured(_) => Ok(Vec::new()),
            LayerPayload::Encoded {
                encoding,
                compression,
                raw,
            } => decode_bytes(encoding, compression, raw),
        }
    }

    /// Raw cell references, decoding the payload on first use.
    pub fn tile_refs(&self) -> Result<&[TileGlobalRef]> {
        self.tile_refs_with(&StandardDecoder)
    }

    /// [`Layer::tile_refs`] with a custom payload decoder.
    pub fn tile_refs_with<D: PayloadDecoder + ?Sized>(
        &self,
        decoder: &D,
    ) -> Result<&[TileGlobalRef]> {
        let (encoding, compression, raw) = match &self.payload {
            LayerPayload::Structured(refs) if !refs.is_empty() => return Ok(refs.as_slice()),
            LayerPayload::Structured(_) => {
                return Err(DecodeError::UnsupportedEncoding(Encoding::None.to_string()));
            }
            LayerPayload::Encoded {
                encoding,
                compression,
                raw,
            } => (encoding, compression, raw),
        };

        if let Some(refs) = self.refs.get() {
            return Ok(refs.as_slice());
        }

        let gids = match encoding {
            Encoding::Base64 | Encoding::Csv => decoder.decode(encoding, compression, raw)?,
            Encoding::None | Encoding::Other(_) => {
                return Err(DecodeError::UnsupportedEncoding(encoding.to_string()));
            }
        };

        let expected = self.expected_cells();
        if expected > 0 && gids.len() != expected {
            warn!(
                "Layer `{}` decoded {} cells but is {}x{} ({} cells)",
                self.name,
                gids.len(),
                self.width,
                self.height,
                expected
            );
        }
        debug!(
            "Decoded {} cells from {} layer `{}`",
            gids.len(),
            encoding,
            self.name
        );

        let refs: Vec<TileGlobalRef> = gids.into_iter().map(TileGlobalRef::from).collect();
        Ok(self.refs.get_or_init(|| refs).as_slice())
    }

    /// Every cell resolved against `tilesets`, computed on first use.
    ///
    /// The result is cached for the life of the layer; later calls return it
    /// regardless of the index passed in.
    ///
    /// # Errors
    ///
    /// Any payload error from [`Layer::tile_refs`], or
    /// [`DecodeError::NoSuitableTileSet`] if a single cell has no owning tileset.
    /// There is no partial result.
    pub fn tile_definitions(&self, tilesets: &TileSetIndex) -> Result<&[TileDefinition]> {
        self.tile_definitions_with(&StandardDecoder, tilesets)
    }

    /// [`Layer::tile_definitions`] against a plain tileset list.
    ///
    /// The list is copied and sorted; the caller's order is left alone.
    pub fn tile_definitions_from(&self, tilesets: &[TileSet]) -> Result<&[TileDefinition]> {
        if let Some(definitions) = self.definitions.get() {
            return Ok(definitions.as_slice());
        }
        self.tile_definitions(&TileSetIndex::new(tilesets))
    }

    /// [`Layer::tile_definitions`] with a custom payload decoder.
    pub fn tile_definitions_with<D: PayloadDecoder + ?Sized>(
        &self,
        decoder: &D,
        tilesets: &TileSetIndex,
    ) -> Result<&[TileDefinition]> {
        if let Some(definitions) = self.definitions.get() {
            return Ok(definitions.as_slice());
        }

        let definitions = self
            .tile_refs_with(decoder)?
            .iter()
            .map(|tile_ref| resolve_cell(tile_ref.gid, tilesets))
            .collect::<Result<Vec<_>>>()?;

        Ok(self.definitions.get_or_init(|| definitions).as_slice())
    }

    /// Resolved cell at `(x, y)`, if definitions have been computed.
    pub fn cell(&self, x: u32, y: u32) -> Option<&TileDefinition> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.definitions.get()?.get(index)
    }
}

fn resolve_cell(gid: GlobalId, tilesets: &TileSetIndex) -> Result<TileDefinition> {
    let (flip, bare_id) = gid.decode();
    if bare_id == 0 {
        return Ok(TileDefinition::Nil);
    }

    let tileset = tilesets.resolve(bare_id)?;
    let id = gid.local_tile_id(tileset.first_gid);

    Ok(TileDefinition::Tile(TileRef {
        id,
        gid,
        tileset: Arc::clone(tileset),
        flip,
        tile_index: tileset.tile_position(id),
    }))
}

/// Layer as it appears in Tiled's JSON map format.
#[derive(Deserialize)]
#[serde(default)]
struct RawLayer {
    name: String,
    width: u32,
    height: u32,
    data: RawData,
    encoding: Encoding,
    compression: Compression,
}

impl Default for RawLayer {
    fn default() -> Self {
        Self {
            name: String::new(),
            width: 0,
            height: 0,
            data: RawData::Gids(Vec::new()),
            encoding: Encoding::None,
            compression: Compression::None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawData {
    Gids(Vec<u32>),
    Text(String),
}

impl From<RawLayer> for Layer {
    fn from(raw: RawLayer) -> Self {
        let payload = match raw.data {
            RawData::Gids(gids) => LayerPayload::structured(gids),
            RawData::Text(text) => LayerPayload::Encoded {
                encoding: raw.encoding,
                compression: raw.compression,
                raw: text.into_bytes(),
            },
        };
        Layer::new(raw.name, raw.width, raw.height, payload)
    }
}
