//! Map-level container for layers and tilesets.

use serde::Deserialize;

use crate::layer::Layer;
use crate::resolver::TileSetIndex;
use crate::tileset::TileSet;

/// The parts of a Tiled map this crate works with.
///
/// Structural parsing is left to the caller: fill this in from a TMX reader, or
/// deserialize it from Tiled's JSON map format with [`TiledMap::from_json`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TiledMap {
    pub width: u32,
    pub height: u32,

    #[serde(rename = "tilewidth")]
    pub tile_width: u32,

    #[serde(rename = "tileheight")]
    pub tile_height: u32,

    pub tilesets: Vec<TileSet>,

    /// Tile layers in document order. Non-tile layers in JSON input are skipped.
    #[serde(deserialize_with = "tile_layers")]
    pub layers: Vec<Layer>,
}

impl TiledMap {
    /// Parse a map saved in Tiled's JSON format.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// First layer named `name`.
    pub fn layer_with_name(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    /// First tileset named `name`.
    pub fn tileset_with_name(&self, name: &str) -> Option<&TileSet> {
        self.tilesets.iter().find(|tileset| tileset.name == name)
    }

    /// A sorted snapshot of this map's tilesets, ready for resolving layers.
    pub fn tileset_index(&self) -> TileSetIndex {
        TileSetIndex::new(&self.tilesets)
    }
}

fn tile_layers<'de, D>(deserializer: D) -> Result<Vec<Layer>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Tagged {
        #[serde(rename = "type", default)]
        kind: String,
        #[serde(flatten)]
        rest: serde_json::Value,
    }

    let tagged = Vec::<Tagged>::deserialize(deserializer)?;
    tagged
        .into_iter()
        .filter(|layer| layer.kind.is_empty() || layer.kind == "tilelayer")
        .map(|layer| Layer::deserialize(layer.rest).map_err(<D::Error as serde::de::Error>::custom))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gid::TileId;

    const MAP: &str = r#"{
        "width": 2,
        "height": 2,
        "tilewidth": 16,
        "tileheight": 16,
        "orientation": "orthogonal",
        "tilesets": [
            { "firstgid": 65, "name": "props", "tilecount": 16 },
            { "firstgid": 1, "name": "temp", "tilecount": 64,
              "tiles": [{ "id": 3, "type": "wall" }] }
        ],
        "layers": [
            { "type": "tilelayer", "name": "walls", "width": 2, "height": 2,
              "data": [4, 0, 2147483652, 66] },
            { "type": "objectgroup", "name": "players", "objects": [] },
            { "type": "tilelayer", "name": "floor", "width": 2, "height": 2,
              "encoding": "base64", "data": "AQAAAAEAAAABAAAAAQAAAA==" }
        ]
    }"#;

    #[test]
    fn test_map_from_json() {
        let map = TiledMap::from_json(MAP).unwrap();
        assert_eq!(map.layers.len(), 2);
        assert!(map.layer_with_name("players").is_none());
        assert_eq!(map.tileset_with_name("props").unwrap().tile_count, 16);

        let index = map.tileset_index();
        let walls = map.layer_with_name("walls").unwrap();
        let definitions = walls.tile_definitions(&index).unwrap();
        assert_eq!(definitions.len(), 4);

        let wall = definitions[0].as_tile().unwrap();
        assert_eq!(wall.tile().unwrap().tile_type, "wall");
        assert!(definitions[1].is_nil());
        assert!(definitions[2].as_tile().unwrap().flip.horizontal);
        assert_eq!(definitions[3].as_tile().unwrap().tileset.name, "props");
        assert_eq!(definitions[3].as_tile().unwrap().id, TileId(1));

        let floor = map.layer_with_name("floor").unwrap();
        let definitions = floor.tile_definitions(&index).unwrap();
        assert!(
            definitions
                .iter()
                .all(|definition| definition.as_tile().unwrap().id == TileId(0))
        );
    }
}
