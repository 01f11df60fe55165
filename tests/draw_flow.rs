//! End-to-end pass over the GUI-free pieces: configuration, drawing
//! gestures, the vector store, and measurement.

use geomark_core::config::AppConfig;
use geomark_core::measure::{line_length, measure, polygon_area, Measurement};
use geomark_core::store::VectorStore;
use geomark_core::types::{DrawMode, GeoPoint, Geometry};
use geomark_gui::DrawInteraction;

fn at(lon: f64, lat: f64) -> GeoPoint {
    GeoPoint::new(lon, lat)
}

#[test]
fn default_config_boots_the_original_view() {
    let config = AppConfig::load(None).expect("defaults load");
    config.validate().expect("defaults validate");

    assert_eq!(config.map.center(), at(78.9629, 20.5937));
    assert_eq!(config.map.zoom, 5.0);
    assert_eq!(config.geolocation.zoom, 10.0);
}

#[test]
fn config_env_style_yaml_overrides_merge_with_defaults() {
    let config = AppConfig::from_yaml(
        r#"
tiles:
  url: "https://tiles.example.org/{z}/{x}/{y}.png"
geolocation:
  enabled: false
"#,
    )
    .expect("partial yaml parses");

    assert!(!config.geolocation.enabled);
    assert_eq!(config.map.zoom, 5.0);
    config.validate().expect("still valid");
}

#[test]
fn polygon_draw_stores_feature_and_measures_library_area() {
    let mut store = VectorStore::new();
    let mut interaction = DrawInteraction::new(DrawMode::Polygon);

    let ring = [at(10.0, 50.0), at(10.5, 50.0), at(10.5, 50.4), at(10.0, 50.4)];
    for vertex in ring {
        assert!(interaction.click(vertex).is_none());
    }
    let geometry = interaction.finish().expect("polygon completes");
    assert_eq!(geometry.draw_mode(), DrawMode::Polygon);

    let measurement = measure(&geometry).expect("polygons are measured");
    assert_eq!(measurement, Measurement::Area(polygon_area(&ring)));

    store.add(geometry);
    assert_eq!(store.len(), 1);
}

#[test]
fn circle_draw_measures_pi_r_squared() {
    let mut interaction = DrawInteraction::new(DrawMode::Circle);
    interaction.click(at(77.5946, 12.9716));
    let geometry = interaction
        .click(at(77.6046, 12.9716))
        .expect("second click completes the circle");

    let Geometry::Circle { radius, .. } = geometry.clone() else {
        panic!("expected a circle");
    };

    let measurement = measure(&geometry).expect("circles are measured");
    let expected = std::f64::consts::PI * radius * radius;
    assert!((measurement.value() - expected).abs() < 1e-9);
}

#[test]
fn line_draw_measures_haversine_length() {
    let mut interaction = DrawInteraction::new(DrawMode::LineString);
    interaction.click(at(0.0, 0.0));
    interaction.click(at(1.0, 0.0));
    let geometry = interaction.finish().expect("line completes");

    let measurement = measure(&geometry).expect("lines are measured");
    assert_eq!(
        measurement,
        Measurement::Length(line_length(&[at(0.0, 0.0), at(1.0, 0.0)]))
    );
}

#[test]
fn point_draw_is_stored_but_never_measured() {
    let mut store = VectorStore::new();
    let mut interaction = DrawInteraction::new(DrawMode::Point);

    let geometry = interaction.click(at(2.0, 41.0)).expect("single click");
    assert_eq!(measure(&geometry), None);

    store.add(geometry);
    assert_eq!(store.len(), 1);
}

#[test]
fn mode_tags_map_to_matching_interactions() {
    for tag in ["Point", "LineString", "Polygon", "Circle"] {
        let mode = DrawMode::from_tag(tag);
        let interaction = DrawInteraction::new(mode);
        assert_eq!(interaction.mode().to_string(), tag);
    }

    // Unrecognized tags silently fall back to Point.
    let interaction = DrawInteraction::new(DrawMode::from_tag("Square"));
    assert_eq!(interaction.mode(), DrawMode::Point);
}

#[test]
fn switching_modes_never_leaks_sketch_state() {
    let mut store = VectorStore::new();
    let mut interaction = DrawInteraction::new(DrawMode::Polygon);

    interaction.click(at(0.0, 0.0));
    interaction.click(at(1.0, 0.0));

    interaction.set_mode(DrawMode::LineString);
    interaction.set_mode(DrawMode::Circle);

    // Exactly one interaction, fresh sketch: the first circle click is
    // a center, not a completion.
    assert!(!interaction.is_sketching());
    assert!(interaction.click(at(5.0, 5.0)).is_none());

    // The abandoned polygon never reached the store.
    assert!(store.is_empty());
    let geometry = interaction.click(at(5.1, 5.0)).expect("circle completes");
    store.add(geometry);
    assert_eq!(store.len(), 1);
}
