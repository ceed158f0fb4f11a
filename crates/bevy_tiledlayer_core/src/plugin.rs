//! Plugin for `bevy_tiledlayer_core`.

use bevy::prelude::*;
use bevy_tiledlayer_data::resolver::RangePolicy;

use crate::systems::decode_tile_layers;

/// Configuration for `TiledlayerCorePlugin`.
///
/// Inserted as a resource, so it can also be changed at runtime; changes apply
/// to layers decoded afterwards.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_tiledlayer_core::{TiledlayerCoreConfig, TiledlayerCorePlugin};
/// use bevy_tiledlayer_core::data::resolver::RangePolicy;
///
/// App::new()
///     .add_plugins(TiledlayerCorePlugin::new(TiledlayerCoreConfig {
///         range_policy: Some(RangePolicy::Strict),
///         ..default()
///     }));
/// ```
#[derive(Resource, Debug, Clone)]
pub struct TiledlayerCoreConfig {
    /// Overrides how GIDs are matched to tilesets for every layer.
    ///
    /// `None` keeps each `TileSetIndex`'s own policy. `Permissive` matches Tiled:
    /// the closest tileset starting at or below the GID wins. `Strict` also
    /// rejects GIDs past a tileset's declared tile count.
    pub range_policy: Option<RangePolicy>,

    /// Keep `TileLayerSource` on the entity after a successful decode.
    ///
    /// The source holds the layer's cached definitions; drop it to free memory
    /// once `TileLayerData` is all you need.
    pub keep_source: bool,
}

impl Default for TiledlayerCoreConfig {
    fn default() -> Self {
        Self {
            range_policy: None,
            keep_source: true,
        }
    }
}

/// Plugin for the `bevy_tiledlayer_core` decoding system.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_tiledlayer_core::TiledlayerCorePlugin;
///
/// App::new()
///     .add_plugins(TiledlayerCorePlugin::default())
///     .run();
/// ```
#[derive(Default)]
pub struct TiledlayerCorePlugin {
    config: TiledlayerCoreConfig,
}

impl TiledlayerCorePlugin {
    /// Create a new plugin with custom configuration.
    pub fn new(config: TiledlayerCoreConfig) -> Self {
        Self { config }
    }
}

impl Plugin for TiledlayerCorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone());

        // Decode before user systems so freshly spawned layers have data this frame
        app.add_systems(PreUpdate, decode_tile_layers);
    }
}
