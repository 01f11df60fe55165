//! Geodesic measurements for completed annotation geometries.
//!
//! Area and length delegate to the `geo` crate's spherical algorithms on
//! the mean-radius earth sphere: Chamberlain–Duquette spherical excess
//! for polygon area, haversine for line length. Circle area is the
//! planar π·r² on the drawn radius in meters.

use crate::types::{GeoPoint, Geometry};
use geo::{
    ChamberlainDuquetteArea, HaversineDestination, HaversineDistance, HaversineLength,
};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// A scalar measurement of a completed geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measurement {
    /// Area in square meters
    Area(f64),
    /// Length in meters
    Length(f64),
}

impl Measurement {
    /// The raw scalar, in m² or m.
    pub fn value(&self) -> f64 {
        match self {
            Measurement::Area(v) | Measurement::Length(v) => *v,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measurement::Area(v) => {
                if *v < 1_000_000.0 {
                    write!(f, "{:.2} m\u{b2}", v)
                } else {
                    write!(f, "{:.2} km\u{b2}", v / 1_000_000.0)
                }
            }
            Measurement::Length(v) => {
                if *v < 1000.0 {
                    write!(f, "{:.2} m", v)
                } else {
                    write!(f, "{:.2} km", v / 1000.0)
                }
            }
        }
    }
}

/// Measures a completed geometry: polygon → area, line → length,
/// circle → π·r². Other kinds are not measured.
pub fn measure(geometry: &Geometry) -> Option<Measurement> {
    match geometry {
        Geometry::Polygon(ring) => Some(Measurement::Area(polygon_area(ring))),
        Geometry::LineString(vertices) => Some(Measurement::Length(line_length(vertices))),
        Geometry::Circle { radius, .. } => Some(Measurement::Area(PI * radius * radius)),
        Geometry::Point(_) => None,
    }
}

/// Spherical area of the exterior ring, in square meters.
pub fn polygon_area(ring: &[GeoPoint]) -> f64 {
    let exterior: geo::LineString<f64> =
        ring.iter().map(|p| (p.lon, p.lat)).collect::<Vec<_>>().into();
    geo::Polygon::new(exterior, vec![]).chamberlain_duquette_unsigned_area()
}

/// Haversine length of a polyline, in meters.
pub fn line_length(vertices: &[GeoPoint]) -> f64 {
    let line: geo::LineString<f64> = vertices
        .iter()
        .map(|p| (p.lon, p.lat))
        .collect::<Vec<_>>()
        .into();
    line.haversine_length()
}

/// Haversine distance between two positions, in meters.
pub fn distance(a: GeoPoint, b: GeoPoint) -> f64 {
    geo::Point::from(a).haversine_distance(&geo::Point::from(b))
}

/// Position reached from `origin` along `bearing_deg` (clockwise from
/// north) after `distance_m` meters.
pub fn destination(origin: GeoPoint, bearing_deg: f64, distance_m: f64) -> GeoPoint {
    geo::Point::from(origin)
        .haversine_destination(bearing_deg, distance_m)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    // One degree of arc on the mean-radius sphere (2πR / 360, R = 6371008.8 m).
    const METERS_PER_DEGREE: f64 = 111_195.08;

    #[test]
    fn test_line_length_one_degree_at_equator() {
        let line = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0)];
        let length = line_length(&line);
        assert!((length - METERS_PER_DEGREE).abs() < 1.0, "got {length}");
    }

    #[test]
    fn test_line_length_sums_segments() {
        let line = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(2.0, 0.0),
        ];
        assert!((line_length(&line) - 2.0 * METERS_PER_DEGREE).abs() < 2.0);
    }

    #[test]
    fn test_polygon_area_unit_square_at_equator() {
        let ring = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(0.0, 1.0),
        ];
        let area = polygon_area(&ring);
        let expected = METERS_PER_DEGREE * METERS_PER_DEGREE;
        // Spherical excess shrinks the square slightly; 1% tolerance.
        assert!((area - expected).abs() / expected < 0.01, "got {area}");
    }

    #[test]
    fn test_measure_polygon_matches_library() {
        let ring = vec![
            GeoPoint::new(10.0, 50.0),
            GeoPoint::new(10.5, 50.0),
            GeoPoint::new(10.5, 50.4),
            GeoPoint::new(10.0, 50.4),
        ];
        let measured = measure(&Geometry::Polygon(ring.clone())).unwrap();
        assert_eq!(measured, Measurement::Area(polygon_area(&ring)));
    }

    #[test]
    fn test_measure_circle_pi_r_squared() {
        let geometry = Geometry::Circle {
            center: GeoPoint::new(78.9629, 20.5937),
            radius: 250.0,
        };
        let measured = measure(&geometry).unwrap();
        let expected = PI * 250.0 * 250.0;
        assert!((measured.value() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_measure_point_is_ignored() {
        assert_eq!(measure(&Geometry::Point(GeoPoint::new(0.0, 0.0))), None);
    }

    #[test]
    fn test_distance_symmetry() {
        let a = GeoPoint::new(2.3522, 48.8566);
        let b = GeoPoint::new(-0.1276, 51.5074);
        let d = distance(a, b);
        assert!((d - distance(b, a)).abs() < 1e-9);
        // Paris to London is roughly 343 km.
        assert!((d - 343_000.0).abs() < 2_000.0, "got {d}");
    }

    #[test]
    fn test_destination_roundtrip() {
        let origin = GeoPoint::new(10.0, 45.0);
        let moved = destination(origin, 90.0, 5_000.0);
        assert!((distance(origin, moved) - 5_000.0).abs() < 1.0);
        assert!(moved.lon > origin.lon);
    }

    #[test]
    fn test_measurement_display() {
        assert_eq!(format!("{}", Measurement::Length(512.3)), "512.30 m");
        assert_eq!(format!("{}", Measurement::Length(1500.0)), "1.50 km");
        assert_eq!(format!("{}", Measurement::Area(250.0)), "250.00 m\u{b2}");
        assert_eq!(format!("{}", Measurement::Area(2_500_000.0)), "2.50 km\u{b2}");
    }
}
