//! Integration tests: parse → emit → re-parse round-trip.
//!
//! Verifies that no modelled content is lost when converting MapFile
//! text → document model → MapFile text, and that the file-backed
//! open/save path behaves the same way.

use mf_core::{
    Class, Color, Label, LabelPosition, Layer, LayerStatus, LayerType, Map, Status, Style, Units,
    emit_document, parse_document,
};
use pretty_assertions::assert_eq;

// ─── Helpers ─────────────────────────────────────────────────────────────

/// Parse, emit, re-parse, and require the two models to be identical.
fn assert_roundtrip(input: &str) -> Map {
    let first = parse_document(input).expect("first parse failed");
    let emitted = emit_document(&first);
    let second = parse_document(&emitted).expect("re-parse failed");
    assert_eq!(
        first, second,
        "model changed across round-trip.\nEmitted:\n{emitted}"
    );
    first
}

// ─── Fixture-based tests ─────────────────────────────────────────────────

#[test]
fn roundtrip_minimal_fixture() {
    let map = assert_roundtrip(include_str!("fixtures/minimal.map"));
    assert_eq!(map.name, "minimal");
    assert!(map.extent.is_none());
    assert!(map.metadata.is_empty());
    assert!(map.layers().is_empty());
}

#[test]
fn roundtrip_world_fixture() {
    let map = assert_roundtrip(include_str!("fixtures/world.map"));

    assert_eq!(map.projection, "epsg:4326");
    assert_eq!(map.extent, Some([-180.0, -90.0, 180.0, 90.0]));
    assert_eq!(map.units, Units::DecimalDegrees);
    assert_eq!(map.font_set(), Some("fonts.list"));
    assert_eq!(map.symbol_set(), Some("symbols.sym"));
    assert_eq!(map.metadata.get("wms_enable_request"), Some("*"));
    assert_eq!(map.legend.status, Status::On);
    assert_eq!(map.scalebar.units, Units::Kilometers);
    assert_eq!(map.scalebar.outline_color, Color::rgb(255, 255, 255));

    assert_eq!(map.layers().len(), 2);
    let countries = map.layer(0).unwrap();
    assert_eq!(countries.group.as_deref(), Some("background"));
    assert_eq!(countries.kind, LayerType::Polygon);
    assert_eq!(countries.projection, "epsg:4326");
    assert_eq!(countries.data.as_deref(), Some("shapes/countries.shp"));
    let class = countries.class(0).unwrap();
    assert_eq!(class.name.as_deref(), Some("landmass"));
    assert_eq!(class.style(0).unwrap().width, Some(0.5));
    assert_eq!(class.label(0).unwrap().size, Some(7.5));

    let cities = map.layer(1).unwrap();
    assert_eq!(cities.status, LayerStatus::Default);
    assert_eq!(
        cities.class(0).unwrap().expression.as_deref(),
        Some("[pop] > 1000000")
    );
}

#[test]
fn foreign_blocks_are_dropped_but_siblings_survive() {
    let input = include_str!("fixtures/foreign_blocks.map");
    let map = parse_document(input).expect("parse failed");
    let emitted = emit_document(&map);

    assert!(!emitted.contains("OUTPUTFORMAT"));
    assert!(!emitted.contains("QUERYMAP"));

    // The layers around the dropped blocks are intact and in order.
    assert_eq!(map.layers().len(), 2);
    assert_eq!(map.layer(0).unwrap().name, "before");
    assert_eq!(map.layer(0).unwrap().kind, LayerType::Line);
    assert_eq!(map.layer(1).unwrap().name, "after");
    assert_eq!(map.layer(1).unwrap().kind, LayerType::Point);

    // And the lossy re-emit is stable from then on.
    assert_roundtrip(&emitted);
}

// ─── Mutation-API round-trip ─────────────────────────────────────────────

#[test]
fn roundtrip_map_built_through_the_mutation_api() {
    let mut map = Map::new();
    map.name = "editor session".to_string();
    map.projection = "epsg:3857".to_string();
    map.set_extent(-20026376.39, -20048966.1, 20026376.39, 20048966.1);
    map.set_size(1024, 768);
    map.units = Units::Meters;
    map.metadata.set("wms_enable_request", "*");
    map.metadata.set("wms_title", "Editor session");
    map.legend.status = Status::On;
    map.legend.label.font = Some("sans-bold".to_string());
    map.scalebar.status = Status::On;
    map.scalebar.units = Units::Kilometers;

    let roads = map.add_layer(Layer::new());
    roads.name = "roads".to_string();
    roads.kind = LayerType::Line;
    roads.projection = "epsg:3857".to_string();
    let major = roads.add_class(Class::default());
    major.name = Some("major".to_string());
    major.expression = Some("[class] = 'major'".to_string());
    major.add_style(Style {
        color: Some(Color::rgb(220, 80, 30)),
        width: Some(2.5),
        ..Style::default()
    });
    major.add_label(Label {
        font: Some("sans".to_string()),
        size: Some(8.0),
        color: Some(Color::rgb(40, 40, 40)),
        position: Some(LabelPosition::Auto),
        ..Label::default()
    });

    let pois = map.add_layer(Layer::new());
    pois.name = "pois".to_string();
    pois.kind = LayerType::Point;
    pois.status = LayerStatus::Off;
    pois.data = Some("poi.sqlite".to_string());

    let emitted = emit_document(&map);
    let reparsed = parse_document(&emitted).expect("re-parse failed");
    assert_eq!(map, reparsed, "emitted:\n{emitted}");
}

#[test]
fn extent_line_appears_only_after_set_extent() {
    let mut map = Map::new();
    assert!(!emit_document(&map).contains("EXTENT"));

    map.set_extent(-180.0, -90.0, 180.0, 90.0);
    let emitted = emit_document(&map);
    assert_eq!(emitted.matches("EXTENT").count(), 1);
    assert!(emitted.contains("EXTENT -180 -90 180 90\n"));
}

#[test]
fn layer_reordering_survives_serialization() {
    let mut map = Map::new();
    for name in ["a", "b", "c"] {
        map.add_layer(Layer {
            name: name.to_string(),
            ..Layer::default()
        });
    }
    map.move_layer_up(2);
    map.remove_layer(0);

    let reparsed = parse_document(&emit_document(&map)).unwrap();
    let names: Vec<&str> = reparsed.layers().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["c", "b"]);
}

// ─── File-backed open/save ───────────────────────────────────────────────

#[test]
fn save_then_open_reproduces_the_model() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.map");

    let mut map = Map::new();
    map.name = "persisted".to_string();
    map.set_extent(0.0, 0.0, 300000.0, 300000.0);
    map.projection = "epsg:31370".to_string();
    map.add_layer(Layer {
        name: "parcels".to_string(),
        kind: LayerType::Polygon,
        ..Layer::default()
    });

    map.save(&path).expect("save failed");
    let reopened = Map::open(&path).expect("open failed");
    assert_eq!(map, reopened);
}

#[test]
fn open_missing_document_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = Map::open(dir.path().join("absent.map")).unwrap_err();
    assert!(matches!(err, mf_core::Error::FileNotFound { .. }));
}

#[test]
fn font_and_symbol_sets_are_validated_eagerly_and_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let fontset = dir.path().join("fonts.list");
    std::fs::write(&fontset, "sans sans.ttf\n").unwrap();

    let mut map = Map::new();
    map.set_font_set(&fontset).expect("fontset exists");
    assert!(
        map.set_symbol_set(dir.path().join("missing.sym")).is_err(),
        "a dangling symbolset reference must be rejected at set time"
    );

    let path = dir.path().join("out.map");
    map.save(&path).unwrap();
    let reopened = Map::open(&path).unwrap();
    assert_eq!(reopened.font_set(), map.font_set());
    assert_eq!(reopened.symbol_set(), None);
}
