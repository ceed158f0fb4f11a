//! Systems driving tile layer decoding.

mod decode;

pub use decode::decode_tile_layers;
