//! # `bevy_tiledlayer_core`
//!
//! Bevy integration for `bevy_tiledlayer`. Spawn an entity with a
//! [`TileLayerSource`](components::TileLayerSource) and the plugin decodes it into a
//! [`TileLayerData`](components::TileLayerData) grid during `PreUpdate`.
//!
//! **This crate does NOT handle rendering or physics.** Those plugins observe
//! [`TileLayerDecoded`](events::TileLayerDecoded) and read `TileLayerData`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_tiledlayer_core::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(TiledlayerCorePlugin::default())
//!         .add_systems(Startup, spawn_layer)
//!         .run();
//! }
//!
//! fn spawn_layer(mut commands: Commands) {
//!     let layer = Layer::new("ground", 2, 1, LayerPayload::csv("1,2"));
//!     let tilesets = TileSetIndex::new(&[TileSet::new("terrain", 1)]);
//!     commands.spawn(TileLayerSource::new(layer, tilesets));
//! }
//! ```

pub mod components;
pub mod events;
pub mod plugin;
pub mod spawn;
pub mod systems;

// Re-export the decoding crate for direct use
pub use bevy_tiledlayer_data as data;

pub mod prelude {
    //! Common imports for `bevy_tiledlayer_core` users.

    pub use crate::components::{
        TileInstance, TileLayerData, TileLayerDecodeError, TileLayerSource,
    };
    pub use crate::events::{TileLayerDecodeFailed, TileLayerDecoded};
    pub use crate::plugin::{TiledlayerCoreConfig, TiledlayerCorePlugin};

    pub use bevy_tiledlayer_data::layer::{Layer, LayerPayload};
    pub use bevy_tiledlayer_data::map::TiledMap;
    pub use bevy_tiledlayer_data::resolver::{RangePolicy, TileSetIndex};
    pub use bevy_tiledlayer_data::tileset::{Tile, TileSet};
}

// Re-export plugin types at crate root for convenience
pub use plugin::{TiledlayerCoreConfig, TiledlayerCorePlugin};
