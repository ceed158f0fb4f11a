//! Components for decoded tile layers.

pub mod source;
pub mod tile;

pub use source::{TileLayerDecodeError, TileLayerSource};
pub use tile::{TileInstance, TileLayerData};
