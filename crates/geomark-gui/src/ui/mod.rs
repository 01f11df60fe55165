//! UI modules for the GeoMark GUI.

pub mod map;
