//! Building components from decoded layer data.

mod tiles;

pub use tiles::build_tile_layer_data;
