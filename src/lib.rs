//! # bevy_tiledlayer
//!
//! Decoding of Tiled tile layers, with optional Bevy integration.
//!
//! This is a meta-crate that combines the `bevy_tiledlayer_*` sub-crates behind
//! feature flags.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_tiledlayer::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(BevyTiledlayerPlugin::default())
//!         .add_systems(Startup, spawn_layers)
//!         .run();
//! }
//!
//! fn spawn_layers(mut commands: Commands) {
//!     let map = TiledMap::from_json(r#"{ "tilesets": [], "layers": [] }"#).unwrap();
//!     for source in TileLayerSource::from_map(&map) {
//!         commands.spawn(source);
//!     }
//! }
//! ```
//!
//! ## Features
//!
//! - **default**: Includes `bevy`
//! - **bevy**: [`TileLayerSource`](core::components::TileLayerSource) decoding plugin
//!
//! ## Architecture
//!
//! - **Layer 1** ([`data`]): Pure decoding: GIDs, CSV/base64/zlib/gzip payloads, tileset resolution
//! - **Layer 2** (`core`, feature `bevy`): ECS components, decode system and events

#[cfg(feature = "bevy")]
pub mod plugin;

// Re-export sub-crates for advanced usage
pub use bevy_tiledlayer_data as data;

#[cfg(feature = "bevy")]
pub use bevy_tiledlayer_core as core;

/// Unified prelude for `bevy_tiledlayer`.
pub mod prelude {
    // Decoding (always available)
    pub use crate::data::prelude::*;

    // Bevy integration (feature-gated)
    #[cfg(feature = "bevy")]
    pub use crate::core::prelude::*;

    #[cfg(feature = "bevy")]
    pub use crate::plugin::BevyTiledlayerPlugin;
}
