//! Errors produced while decoding tile layer data.

use std::num::ParseIntError;

use thiserror::Error;

use crate::gid::GlobalId;

/// Convenience alias used throughout the crate.
pub type Result<T, E = DecodeError> = std::result::Result<T, E>;

/// Everything that can go wrong turning a layer payload into tile definitions.
///
/// Every failure is a deterministic function of the input, so none of these are
/// worth retrying. A single bad cell fails the whole layer.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unsupported layer encoding `{0}`")]
    UnsupportedEncoding(String),

    #[error("unsupported compression `{0}`")]
    UnsupportedCompression(String),

    #[error("no suitable tileset found for tile with global ID {gid}; the map is invalid")]
    NoSuitableTileSet { gid: GlobalId },

    #[error("expected decoded layer data to be divisible by 4, length was {len}")]
    LengthMismatch { len: usize },

    #[error("invalid CSV tile value `{field}` at index {index}: {source}")]
    InvalidCsvField {
        index: usize,
        field: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid base64 layer data: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("failed to decompress layer data: {0}")]
    Decompression(#[source] std::io::Error),

    #[error("unexpected terrain specifier `{descriptor}`; expected 4 values, got {count}")]
    TerrainFieldCount { descriptor: String, count: usize },

    #[error("invalid terrain tile ID `{field}` in `{descriptor}`: {source}")]
    InvalidTerrainField {
        descriptor: String,
        field: String,
        #[source]
        source: ParseIntError,
    },
}
