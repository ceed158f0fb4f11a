//! Undecoded layer input.

use bevy::prelude::*;
use bevy_tiledlayer_data::layer::Layer;
use bevy_tiledlayer_data::map::TiledMap;
use bevy_tiledlayer_data::resolver::TileSetIndex;

/// A tile layer waiting to be decoded.
///
/// Spawn an entity with this component; the plugin decodes it during `PreUpdate`
/// and inserts [`TileLayerData`](super::TileLayerData) (or
/// [`TileLayerDecodeError`] if the layer is invalid).
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use bevy_tiledlayer_core::components::TileLayerSource;
/// # use bevy_tiledlayer_core::data::map::TiledMap;
/// fn spawn_layers(commands: &mut Commands, json: &str) {
///     let map = TiledMap::from_json(json).unwrap();
///     for source in TileLayerSource::from_map(&map) {
///         commands.spawn(source);
///     }
/// }
/// ```
#[derive(Component, Debug, Clone)]
pub struct TileLayerSource {
    pub layer: Layer,
    pub tilesets: TileSetIndex,
}

impl TileLayerSource {
    pub fn new(layer: Layer, tilesets: TileSetIndex) -> Self {
        Self { layer, tilesets }
    }

    /// One source per tile layer of `map`, sharing a single tileset index.
    pub fn from_map(map: &TiledMap) -> Vec<Self> {
        let tilesets = map.tileset_index();
        map.layers
            .iter()
            .map(|layer| Self::new(layer.clone(), tilesets.clone()))
            .collect()
    }
}

/// Marks a layer whose data could not be decoded. It will not be retried.
#[derive(Component, Debug, Clone)]
pub struct TileLayerDecodeError {
    pub message: String,
}
