//! # GeoMark Core
//!
//! Core types, measurement, and configuration for the GeoMark map
//! annotator.
//!
//! This crate provides the GUI-free building blocks of the viewer:
//!
//! - **Types**: `FeatureId`, `GeoPoint`, the four-way `DrawMode`
//!   selector, annotation `Geometry`, and `Feature`.
//! - **Store**: the `VectorStore` owning completed annotations.
//! - **Measure**: geodesic area/length of completed geometries via the
//!   `geo` crate.
//! - **Errors**: `thiserror` taxonomies for configuration and
//!   geolocation failures.
//! - **Configuration**: YAML files with environment variable overrides
//!   and validation.
//!
//! ## Example
//!
//! ```
//! use geomark_core::measure::measure;
//! use geomark_core::store::VectorStore;
//! use geomark_core::types::{GeoPoint, Geometry};
//!
//! let mut store = VectorStore::new();
//! let geometry = Geometry::Circle {
//!     center: GeoPoint::new(78.9629, 20.5937),
//!     radius: 150.0,
//! };
//! let measurement = measure(&geometry).unwrap();
//! store.add(geometry);
//! assert!(measurement.value() > 0.0);
//! ```

pub mod config;
pub mod error;
pub mod measure;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use error::{GeoMarkError, Result};
pub use measure::{measure, Measurement};
pub use store::VectorStore;
pub use types::{DrawMode, Feature, FeatureId, GeoPoint, Geometry};
