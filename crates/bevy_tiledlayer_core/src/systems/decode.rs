//! Reactive decoding system.

use bevy::prelude::*;

use crate::components::{TileLayerData, TileLayerDecodeError, TileLayerSource};
use crate::events::{TileLayerDecoded, TileLayerDecodeFailed};
use crate::plugin::TiledlayerCoreConfig;
use crate::spawn::build_tile_layer_data;

/// Decodes every `TileLayerSource` that has neither data nor an error yet.
///
/// Runs in `PreUpdate` before user systems. Fires [`TileLayerDecoded`] or
/// [`TileLayerDecodeFailed`] per layer.
pub fn decode_tile_layers(
    config: Res<TiledlayerCoreConfig>,
    mut commands: Commands,
    sources: Query<
        (Entity, &TileLayerSource),
        (Without<TileLayerData>, Without<TileLayerDecodeError>),
    >,
) {
    for (entity, source) in sources.iter() {
        let layer_name = source.layer.name.clone();

        match build_tile_layer_data(source, config.range_policy) {
            Ok(tile_data) => {
                let tile_count = tile_data.iter_tiles().count();
                info!("Decoded tile layer '{}': {} tiles", layer_name, tile_count);

                let mut layer_commands = commands.entity(entity);
                layer_commands.insert(tile_data);
                if !config.keep_source {
                    layer_commands.remove::<TileLayerSource>();
                }

                commands.trigger(TileLayerDecoded {
                    entity,
                    layer_name,
                    tile_count,
                });
            }
            Err(error) => {
                error!("Failed to decode tile layer '{}': {}", layer_name, error);
                let message = error.to_string();

                commands.entity(entity).insert(TileLayerDecodeError {
                    message: message.clone(),
                });

                commands.trigger(TileLayerDecodeFailed {
                    entity,
                    layer_name,
                    error: message,
                });
            }
        }
    }
}
