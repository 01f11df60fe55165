//! Core types for the GeoMark map annotator.
//!
//! This module defines the fundamental types used throughout the system:
//! feature identifiers, geographic positions, the draw-mode selector, and
//! the annotation geometries produced by drawing gestures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an annotation feature.
///
/// Wraps a UUID v4 to provide type-safe feature tracking. Each completed
/// annotation gets a unique FeatureId that persists for the lifetime of
/// that feature in the vector store.
///
/// # Examples
///
/// ```
/// use geomark_core::types::FeatureId;
///
/// let id = FeatureId::new();
/// println!("Feature: {}", id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureId(Uuid);

impl FeatureId {
    /// Creates a new random feature identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for FeatureId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for FeatureId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<FeatureId> for Uuid {
    fn from(id: FeatureId) -> Self {
        id.0
    }
}

/// A geographic position as a longitude/latitude pair, in degrees.
///
/// Longitude grows eastward in [-180, 180], latitude grows northward in
/// [-90, 90]. Positions are plain data; drawing gestures never validate
/// them, but configuration does (see [`crate::config::AppConfig::validate`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in degrees
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
}

impl GeoPoint {
    /// Creates a position from a longitude/latitude pair.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Returns true if both coordinates are inside their nominal ranges.
    pub fn in_bounds(&self) -> bool {
        (-180.0..=180.0).contains(&self.lon) && (-90.0..=90.0).contains(&self.lat)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(p: GeoPoint) -> Self {
        geo::Point::new(p.lon, p.lat)
    }
}

impl From<geo::Point<f64>> for GeoPoint {
    fn from(p: geo::Point<f64>) -> Self {
        Self::new(p.x(), p.y())
    }
}

/// The currently selected annotation shape type.
///
/// Exactly one mode is active at a time; the mode decides which gesture
/// the drawing interaction runs and which geometry it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// A single clicked position
    #[default]
    Point,
    /// An open sequence of vertices
    LineString,
    /// A closed ring of vertices
    Polygon,
    /// A center plus a radius in meters
    Circle,
}

impl DrawMode {
    /// All modes, in toolbar order.
    pub const ALL: [DrawMode; 4] = [
        DrawMode::Circle,
        DrawMode::Polygon,
        DrawMode::LineString,
        DrawMode::Point,
    ];

    /// Parses a mode tag. Unrecognized tags fall back to Point.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "LineString" => DrawMode::LineString,
            "Polygon" => DrawMode::Polygon,
            "Circle" => DrawMode::Circle,
            _ => DrawMode::Point,
        }
    }

    /// Minimum number of sketch vertices for a completable gesture.
    pub fn min_vertices(&self) -> usize {
        match self {
            DrawMode::Point => 1,
            DrawMode::LineString => 2,
            DrawMode::Polygon => 3,
            DrawMode::Circle => 2,
        }
    }

    /// Returns true if the mode completes on the first click.
    pub fn single_click(&self) -> bool {
        matches!(self, DrawMode::Point)
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawMode::Point => write!(f, "Point"),
            DrawMode::LineString => write!(f, "LineString"),
            DrawMode::Polygon => write!(f, "Polygon"),
            DrawMode::Circle => write!(f, "Circle"),
        }
    }
}

/// Geometry of a completed annotation.
///
/// Polygons carry their exterior ring unclosed (the first vertex is not
/// repeated); measurement and rendering close it implicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// A single position
    Point(GeoPoint),
    /// An open polyline, at least two vertices
    LineString(Vec<GeoPoint>),
    /// An exterior ring, at least three vertices, unclosed
    Polygon(Vec<GeoPoint>),
    /// A circle with center and radius in meters
    Circle { center: GeoPoint, radius: f64 },
}

impl Geometry {
    /// Returns the draw mode that produces this geometry kind.
    pub fn draw_mode(&self) -> DrawMode {
        match self {
            Geometry::Point(_) => DrawMode::Point,
            Geometry::LineString(_) => DrawMode::LineString,
            Geometry::Polygon(_) => DrawMode::Polygon,
            Geometry::Circle { .. } => DrawMode::Circle,
        }
    }

    /// All vertices of the geometry. Circles contribute only their center.
    pub fn vertices(&self) -> &[GeoPoint] {
        match self {
            Geometry::Point(p) => std::slice::from_ref(p),
            Geometry::LineString(v) | Geometry::Polygon(v) => v,
            Geometry::Circle { center, .. } => std::slice::from_ref(center),
        }
    }
}

/// A single drawn or placed annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Unique identifier
    pub id: FeatureId,
    /// The annotation geometry
    pub geometry: Geometry,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Feature {
    /// Creates a feature with a fresh identifier.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: FeatureId::new(),
            geometry,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_id_unique() {
        let a = FeatureId::new();
        let b = FeatureId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_draw_mode_from_tag() {
        assert_eq!(DrawMode::from_tag("LineString"), DrawMode::LineString);
        assert_eq!(DrawMode::from_tag("Polygon"), DrawMode::Polygon);
        assert_eq!(DrawMode::from_tag("Circle"), DrawMode::Circle);
        assert_eq!(DrawMode::from_tag("Point"), DrawMode::Point);
    }

    #[test]
    fn test_draw_mode_fallback_to_point() {
        assert_eq!(DrawMode::from_tag("Rectangle"), DrawMode::Point);
        assert_eq!(DrawMode::from_tag(""), DrawMode::Point);
        assert_eq!(DrawMode::from_tag("linestring"), DrawMode::Point);
    }

    #[test]
    fn test_draw_mode_min_vertices() {
        assert_eq!(DrawMode::Point.min_vertices(), 1);
        assert_eq!(DrawMode::LineString.min_vertices(), 2);
        assert_eq!(DrawMode::Polygon.min_vertices(), 3);
        assert_eq!(DrawMode::Circle.min_vertices(), 2);
    }

    #[test]
    fn test_geometry_draw_mode_roundtrip() {
        let p = GeoPoint::new(78.9629, 20.5937);
        assert_eq!(Geometry::Point(p).draw_mode(), DrawMode::Point);
        assert_eq!(
            Geometry::LineString(vec![p, p]).draw_mode(),
            DrawMode::LineString
        );
        assert_eq!(Geometry::Polygon(vec![p, p, p]).draw_mode(), DrawMode::Polygon);
        assert_eq!(
            Geometry::Circle {
                center: p,
                radius: 100.0
            }
            .draw_mode(),
            DrawMode::Circle
        );
    }

    #[test]
    fn test_geo_point_bounds() {
        assert!(GeoPoint::new(78.9629, 20.5937).in_bounds());
        assert!(!GeoPoint::new(181.0, 0.0).in_bounds());
        assert!(!GeoPoint::new(0.0, -90.5).in_bounds());
    }

    #[test]
    fn test_geo_point_display() {
        let p = GeoPoint::new(-0.1276, 51.5074);
        assert_eq!(format!("{}", p), "51.5074, -0.1276");
    }

    #[test]
    fn test_geo_point_conversion() {
        let p = GeoPoint::new(2.3522, 48.8566);
        let gp: geo::Point<f64> = p.into();
        assert_eq!(gp.x(), 2.3522);
        assert_eq!(gp.y(), 48.8566);
        let back: GeoPoint = gp.into();
        assert_eq!(back, p);
    }

    #[test]
    fn test_feature_serialization() {
        let feature = Feature::new(Geometry::Point(GeoPoint::new(1.0, 2.0)));
        let json = serde_json::to_string(&feature).unwrap();
        let parsed: Feature = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, feature);
    }
}
