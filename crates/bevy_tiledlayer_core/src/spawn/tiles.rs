//! Tile layer data building.

use bevy::prelude::*;
use bevy_tiledlayer_data::error::DecodeError;
use bevy_tiledlayer_data::resolver::RangePolicy;

use crate::components::tile::{TileInstance, TileLayerData};
use crate::components::TileLayerSource;

/// Build `TileLayerData` component from an undecoded layer.
///
/// Resolves every cell against the source's tilesets and extracts flip flags.
/// `policy` replaces the index's own range policy when set. It only matters the
/// first time a layer is resolved; the layer caches its definitions.
///
/// # Errors
///
/// Any [`DecodeError`] from the layer. A single bad cell fails the whole layer.
pub fn build_tile_layer_data(
    source: &TileLayerSource,
    policy: Option<RangePolicy>,
) -> Result<TileLayerData, DecodeError> {
    let layer = &source.layer;
    let definitions = match policy {
        Some(policy) => {
            let tilesets = source.tilesets.clone().with_policy(policy);
            layer.tile_definitions(&tilesets)?
        }
        None => layer.tile_definitions(&source.tilesets)?,
    };

    let mut tile_data = TileLayerData::empty(layer.width, layer.height);
    if layer.width == 0 {
        if !definitions.is_empty() {
            warn!(
                "Layer '{}' has {} cells but zero width; dropping them",
                layer.name,
                definitions.len()
            );
        }
        return Ok(tile_data);
    }

    for (index, definition) in definitions.iter().enumerate() {
        let x = index as u32 % layer.width;
        let y = index as u32 / layer.width;
        if y >= layer.height {
            warn!(
                "Layer '{}' has more cells than its {}x{} grid; ignoring the rest",
                layer.name, layer.width, layer.height
            );
            break;
        }

        if let Some(tile) = definition.as_tile() {
            tile_data.set(x, y, Some(TileInstance::from(tile)));
        }
    }

    Ok(tile_data)
}

#[cfg(test)]
mod tests {
    use bevy_tiledlayer_data::layer::{Layer, LayerPayload};
    use bevy_tiledlayer_data::resolver::TileSetIndex;
    use bevy_tiledlayer_data::tileset::TileSet;

    use super::*;

    fn gap_source(policy: RangePolicy) -> TileLayerSource {
        let tilesets = TileSetIndex::new(&[
            TileSet::new("small", 1).with_tile_count(8),
            TileSet::new("props", 65).with_tile_count(16),
        ])
        .with_policy(policy);
        let layer = Layer::new("gap", 1, 1, LayerPayload::structured([40]));
        TileLayerSource::new(layer, tilesets)
    }

    #[test]
    fn test_index_policy_kept_without_override() {
        let err = build_tile_layer_data(&gap_source(RangePolicy::Strict), None).unwrap_err();
        assert!(matches!(err, DecodeError::NoSuitableTileSet { .. }));
    }

    #[test]
    fn test_override_replaces_index_policy() {
        let source = gap_source(RangePolicy::Strict);
        let tile_data = build_tile_layer_data(&source, Some(RangePolicy::Permissive)).unwrap();
        assert_eq!(tile_data.get(0, 0).unwrap().tileset_name, "small");

        let source = gap_source(RangePolicy::Permissive);
        assert!(build_tile_layer_data(&source, Some(RangePolicy::Strict)).is_err());
    }

    #[test]
    fn test_overflow_cells_are_ignored() {
        let layer = Layer::new("walls", 1, 1, LayerPayload::structured([1, 2]));
        let source = TileLayerSource::new(layer, TileSetIndex::new(&[TileSet::new("temp", 1)]));
        let tile_data = build_tile_layer_data(&source, None).unwrap();
        assert_eq!(tile_data.iter_tiles().count(), 1);
        assert_eq!(tile_data.get(0, 0).unwrap().tile_id, 0);
    }
}
