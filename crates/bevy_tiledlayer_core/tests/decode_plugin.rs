use bevy::prelude::*;
use bevy_tiledlayer_core::prelude::*;

#[derive(Resource, Default)]
struct Decoded(Vec<(String, usize)>);

#[derive(Resource, Default)]
struct Failed(Vec<(String, String)>);

fn test_app(config: TiledlayerCoreConfig) -> App {
    let mut app = App::new();
    app.add_plugins(TiledlayerCorePlugin::new(config))
        .init_resource::<Decoded>()
        .init_resource::<Failed>()
        .add_observer(|trigger: On<TileLayerDecoded>, mut decoded: ResMut<Decoded>| {
            let event = trigger.event();
            decoded.0.push((event.layer_name.clone(), event.tile_count));
        })
        .add_observer(|trigger: On<TileLayerDecodeFailed>, mut failed: ResMut<Failed>| {
            let event = trigger.event();
            failed.0.push((event.layer_name.clone(), event.error.clone()));
        });
    app
}

fn tilesets() -> TileSetIndex {
    TileSetIndex::new(&[
        TileSet::new("props", 65).with_tile_count(16),
        TileSet::new("temp", 1)
            .with_tile_count(64)
            .with_tile(Tile::new(3).with_type("wall")),
    ])
}

#[test]
fn test_decodes_layer_into_tile_data() {
    let mut app = test_app(TiledlayerCoreConfig::default());
    let layer = Layer::new("walls", 2, 2, LayerPayload::csv("4,0,\n2147483652,66"));
    let entity = app
        .world_mut()
        .spawn(TileLayerSource::new(layer, tilesets()))
        .id();

    app.update();

    let tile_data = app.world().get::<TileLayerData>(entity).unwrap();
    assert_eq!(tile_data.iter_tiles().count(), 3);

    let wall = tile_data.get(0, 0).unwrap();
    assert_eq!(wall.tileset_name, "temp");
    assert_eq!(wall.tile_id, 3);
    assert_eq!(wall.tile_type.as_deref(), Some("wall"));
    assert!(!wall.flipped_h);

    assert!(tile_data.get(1, 0).is_none());

    let flipped = tile_data.get(0, 1).unwrap();
    assert_eq!(flipped.tile_id, 3);
    assert!(flipped.flipped_h);
    assert_eq!(flipped.gid, 0x8000_0004);

    let prop = tile_data.get(1, 1).unwrap();
    assert_eq!(prop.tileset_name, "props");
    assert_eq!(prop.first_gid, 65);
    assert_eq!(prop.tile_id, 1);
    assert_eq!(prop.tile_type, None);

    assert!(app.world().get::<TileLayerSource>(entity).is_some());
    assert_eq!(
        app.world().resource::<Decoded>().0,
        vec![("walls".to_string(), 3)]
    );
}

#[test]
fn test_failed_layer_is_marked_once() {
    let mut app = test_app(TiledlayerCoreConfig::default());
    let layer = Layer::new("broken", 2, 1, LayerPayload::csv("1,oops"));
    let entity = app
        .world_mut()
        .spawn(TileLayerSource::new(layer, tilesets()))
        .id();

    app.update();
    app.update();

    assert!(app.world().get::<TileLayerData>(entity).is_none());
    let error = app.world().get::<TileLayerDecodeError>(entity).unwrap();
    assert!(error.message.contains("oops"));

    let failed = &app.world().resource::<Failed>().0;
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].0, "broken");
}

#[test]
fn test_strict_policy_rejects_gap() {
    let mut app = test_app(TiledlayerCoreConfig {
        range_policy: Some(RangePolicy::Strict),
        ..default()
    });
    // GID 40 is past the end of `small` but below `props`.
    let tilesets = TileSetIndex::new(&[
        TileSet::new("small", 1).with_tile_count(8),
        TileSet::new("props", 65).with_tile_count(16),
    ]);
    let layer = Layer::new("gap", 1, 1, LayerPayload::structured([40]));
    let entity = app
        .world_mut()
        .spawn(TileLayerSource::new(layer, tilesets))
        .id();

    app.update();

    assert!(app.world().get::<TileLayerDecodeError>(entity).is_some());
    assert_eq!(app.world().resource::<Failed>().0.len(), 1);
}

#[test]
fn test_default_config_keeps_index_policy() {
    let mut app = test_app(TiledlayerCoreConfig::default());
    let tilesets = TileSetIndex::new(&[
        TileSet::new("small", 1).with_tile_count(8),
        TileSet::new("props", 65).with_tile_count(16),
    ])
    .with_policy(RangePolicy::Strict);
    let layer = Layer::new("gap", 1, 1, LayerPayload::structured([40]));
    let entity = app
        .world_mut()
        .spawn(TileLayerSource::new(layer, tilesets))
        .id();

    app.update();

    assert!(app.world().get::<TileLayerData>(entity).is_none());
    assert!(app.world().get::<TileLayerDecodeError>(entity).is_some());
}

#[test]
fn test_drops_source_when_configured() {
    let mut app = test_app(TiledlayerCoreConfig {
        keep_source: false,
        ..default()
    });
    let layer = Layer::new("floor", 1, 1, LayerPayload::structured([1]));
    let entity = app
        .world_mut()
        .spawn(TileLayerSource::new(layer, tilesets()))
        .id();

    app.update();

    assert!(app.world().get::<TileLayerData>(entity).is_some());
    assert!(app.world().get::<TileLayerSource>(entity).is_none());
}

#[test]
fn test_sources_from_json_map() {
    let map = TiledMap::from_json(
        r#"{
            "width": 2, "height": 1,
            "tilesets": [{ "firstgid": 1, "name": "temp" }],
            "layers": [
                { "type": "tilelayer", "name": "a", "width": 2, "height": 1, "data": [1, 2] },
                { "type": "tilelayer", "name": "b", "width": 2, "height": 1, "data": [0, 0] }
            ]
        }"#,
    )
    .unwrap();

    let mut app = test_app(TiledlayerCoreConfig::default());
    for source in TileLayerSource::from_map(&map) {
        app.world_mut().spawn(source);
    }

    app.update();

    let mut decoded = app.world().resource::<Decoded>().0.clone();
    decoded.sort();
    assert_eq!(decoded, vec![("a".to_string(), 2), ("b".to_string(), 0)]);
}
