//! Layer payload decoding.
//!
//! Turns the text inside a `<data>` element (or a JSON `data` string) into the
//! stream of raw GIDs it encodes. Supported forms:
//!
//! - `csv`: comma-separated decimal GIDs
//! - `base64`: little-endian `u32`s, optionally `zlib` or `gzip` compressed
//!
//! The unencoded XML `<tile gid="..."/>` form never reaches this module; it is
//! already a list of references (see [`LayerPayload::Structured`](crate::layer::LayerPayload)).

use std::fmt;
use std::io::Read;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flate2::read::{MultiGzDecoder, ZlibDecoder};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{DecodeError, Result};

/// Value of a layer's `encoding` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Encoding {
    /// No attribute. Only valid together with structured tile references.
    #[default]
    None,
    Base64,
    Csv,
    /// Anything else; kept so the error can name it.
    Other(String),
}

/// Value of a layer's `compression` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Compression {
    #[default]
    None,
    Zlib,
    Gzip,
    Other(String),
}

impl Encoding {
    /// Parse a document tag: `""`, `"base64"` or `"csv"`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "" => Encoding::None,
            "base64" => Encoding::Base64,
            "csv" => Encoding::Csv,
            other => Encoding::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Encoding::None => "",
            Encoding::Base64 => "base64",
            Encoding::Csv => "csv",
            Encoding::Other(tag) => tag,
        }
    }
}

impl Compression {
    /// Parse a document tag: `""`, `"zlib"` or `"gzip"`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "" => Compression::None,
            "zlib" => Compression::Zlib,
            "gzip" => Compression::Gzip,
            other => Compression::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Compression::None => "",
            Compression::Zlib => "zlib",
            Compression::Gzip => "gzip",
            Compression::Other(tag) => tag,
        }
    }
}

impl From<String> for Encoding {
    fn from(tag: String) -> Self {
        Encoding::from_tag(&tag)
    }
}

impl From<Encoding> for String {
    fn from(encoding: Encoding) -> Self {
        encoding.as_tag().to_string()
    }
}

impl From<String> for Compression {
    fn from(tag: String) -> Self {
        Compression::from_tag(&tag)
    }
}

impl From<Compression> for String {
    fn from(compression: Compression) -> Self {
        compression.as_tag().to_string()
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Seam between the layer pipeline and the payload format.
///
/// [`StandardDecoder`] is what every layer uses unless told otherwise.
pub trait PayloadDecoder {
    /// Decode `raw` into one GID per cell, in row-major order.
    fn decode(&self, encoding: &Encoding, compression: &Compression, raw: &[u8])
    -> Result<Vec<u32>>;
}

/// Decoder for the `csv` and `base64` (+ `zlib`/`gzip`) formats.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDecoder;

impl PayloadDecoder for StandardDecoder {
    fn decode(
        &self,
        encoding: &Encoding,
        compression: &Compression,
        raw: &[u8],
    ) -> Result<Vec<u32>> {
        decode_payload(encoding, compression, raw)
    }
}

/// Decode a raw payload into GIDs.
///
/// # Errors
///
/// - [`DecodeError::UnsupportedEncoding`] unless `encoding` is `csv` or `base64`
/// - [`DecodeError::UnsupportedCompression`] for an unknown compression under `base64`
/// - [`DecodeError::InvalidCsvField`] naming the first non-numeric CSV field
/// - [`DecodeError::LengthMismatch`] if the decoded bytes are not whole `u32`s
pub fn decode_payload(
    encoding: &Encoding,
    compression: &Compression,
    raw: &[u8],
) -> Result<Vec<u32>> {
    match encoding {
        Encoding::Csv => {
            if *compression != Compression::None {
                debug!("Ignoring compression `{}` on CSV layer data", compression);
            }
            decode_csv(raw)
        }
        Encoding::Base64 => {
            let bytes = decode_base64(compression, raw)?;
            gids_from_le_bytes(&bytes)
        }
        Encoding::None | Encoding::Other(_) => {
            Err(DecodeError::UnsupportedEncoding(encoding.to_string()))
        }
    }
}

/// The payload's bytes after base64 decoding and decompression.
///
/// `csv` and unencoded payloads are returned untouched; an empty result is valid.
pub fn decode_bytes(
    encoding: &Encoding,
    compression: &Compression,
    raw: &[u8],
) -> Result<Vec<u8>> {
    match encoding {
        Encoding::Base64 => decode_base64(compression, raw),
        Encoding::Csv | Encoding::None => Ok(raw.to_vec()),
        Encoding::Other(tag) => Err(DecodeError::UnsupportedEncoding(tag.clone())),
    }
}

fn decode_base64(compression: &Compression, raw: &[u8]) -> Result<Vec<u8>> {
    // Surrounding whitespace is trimmed; inside the payload only line breaks are skipped.
    let text: Vec<u8> = raw
        .trim_ascii()
        .iter()
        .copied()
        .filter(|b| !matches!(b, b'\r' | b'\n'))
        .collect();
    let decoded = STANDARD.decode(&text)?;
    trace!("base64 payload: {} bytes decoded", decoded.len());

    match compression {
        Compression::None => Ok(decoded),
        Compression::Zlib => inflate(ZlibDecoder::new(decoded.as_slice())),
        Compression::Gzip => inflate(MultiGzDecoder::new(decoded.as_slice())),
        Compression::Other(tag) => Err(DecodeError::UnsupportedCompression(tag.clone())),
    }
}

fn inflate(mut reader: impl Read) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    reader
        .read_to_end(&mut out)
        .map_err(DecodeError::Decompression)?;
    trace!("decompressed layer data to {} bytes", out.len());
    Ok(out)
}

fn gids_from_le_bytes(bytes: &[u8]) -> Result<Vec<u32>> {
    if bytes.len() % 4 != 0 {
        return Err(DecodeError::LengthMismatch { len: bytes.len() });
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

fn decode_csv(raw: &[u8]) -> Result<Vec<u32>> {
    let text = String::from_utf8_lossy(raw);

    text.trim()
        .split(',')
        .enumerate()
        .map(|(index, field)| {
            let field = field.trim();
            field
                .parse::<u32>()
                .map_err(|source| DecodeError::InvalidCsvField {
                    index,
                    field: field.to_string(),
                    source,
                })
        })
        .collect()
}
