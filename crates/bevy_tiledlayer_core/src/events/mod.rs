//! Events fired once a tile layer has been processed.
//!
//! Rendering and physics plugins observe these to attach their own components.

use bevy::prelude::*;

/// Fired when a tile layer was decoded and `TileLayerData` inserted.
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use bevy_tiledlayer_core::events::TileLayerDecoded;
/// fn on_layer_decoded(trigger: On<TileLayerDecoded>) {
///     let event = trigger.event();
///     info!("layer '{}' has {} tiles", event.layer_name, event.tile_count);
/// }
/// ```
#[derive(Event, Debug, Clone)]
pub struct TileLayerDecoded {
    /// The layer entity
    pub entity: Entity,
    /// The layer's name from Tiled
    pub layer_name: String,
    /// Number of non-empty cells
    pub tile_count: usize,
}

/// Fired when a tile layer could not be decoded.
///
/// The entity gets a `TileLayerDecodeError` component and is not retried.
#[derive(Event, Debug, Clone)]
pub struct TileLayerDecodeFailed {
    /// The layer entity
    pub entity: Entity,
    /// The layer's name from Tiled
    pub layer_name: String,
    /// Rendered decode error
    pub error: String,
}
