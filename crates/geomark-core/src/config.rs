//! Configuration for the GeoMark viewer.
//!
//! Supports loading from YAML files, environment variable overrides
//! (`GEOMARK__*`), and validation of all settings. Every field has a
//! compiled default, so running without a config file is the common case.

use crate::error::{ConfigError, Result};
use crate::types::GeoPoint;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration.
///
/// # Examples
///
/// ```
/// use geomark_core::config::AppConfig;
///
/// let config = AppConfig::default();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Initial map view
    #[serde(default)]
    pub map: MapConfig,

    /// Base tile layer
    #[serde(default)]
    pub tiles: TileConfig,

    /// Startup position lookup
    #[serde(default)]
    pub geolocation: GeolocationConfig,
}

/// Initial map view settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Longitude of the initial view center, in degrees
    #[serde(default = "default_center_lon")]
    pub center_lon: f64,

    /// Latitude of the initial view center, in degrees
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,

    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub zoom: f64,
}

impl MapConfig {
    /// The initial view center as a position.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.center_lon, self.center_lat)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lon: default_center_lon(),
            center_lat: default_center_lat(),
            zoom: default_zoom(),
        }
    }
}

/// Base tile layer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileConfig {
    /// Display name of the tile provider
    #[serde(default = "default_tile_name")]
    pub name: String,

    /// URL template with `{z}`, `{x}`, `{y}` placeholders
    #[serde(default = "default_tile_url")]
    pub url: String,

    /// Attribution line rendered over the map
    #[serde(default = "default_tile_attribution")]
    pub attribution: String,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            name: default_tile_name(),
            url: default_tile_url(),
            attribution: default_tile_attribution(),
        }
    }
}

/// Startup position lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    /// Whether to look up the position at all
    #[serde(default = "default_geolocation_enabled")]
    pub enabled: bool,

    /// IP geolocation endpoint returning JSON
    #[serde(default = "default_geolocation_endpoint")]
    pub endpoint: String,

    /// Zoom level applied when recentering on the located position
    #[serde(default = "default_geolocation_zoom")]
    pub zoom: f64,

    /// HTTP timeout for the lookup, in seconds
    #[serde(default = "default_geolocation_timeout")]
    pub timeout_secs: u64,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            enabled: default_geolocation_enabled(),
            endpoint: default_geolocation_endpoint(),
            zoom: default_geolocation_zoom(),
            timeout_secs: default_geolocation_timeout(),
        }
    }
}

fn default_center_lon() -> f64 {
    78.9629
}

fn default_center_lat() -> f64 {
    20.5937
}

fn default_zoom() -> f64 {
    5.0
}

fn default_tile_name() -> String {
    "OpenStreetMap".to_string()
}

fn default_tile_url() -> String {
    "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

fn default_tile_attribution() -> String {
    "© OpenStreetMap contributors".to_string()
}

fn default_geolocation_enabled() -> bool {
    true
}

fn default_geolocation_endpoint() -> String {
    "http://ip-api.com/json".to_string()
}

fn default_geolocation_zoom() -> f64 {
    10.0
}

fn default_geolocation_timeout() -> u64 {
    10
}

impl AppConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_yaml(&contents)
    }

    /// Loads configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| {
            ConfigError::InvalidFormat {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Loads configuration using the `config` crate, which merges the
    /// file with `GEOMARK__*` environment variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or merged.
    pub fn from_config_builder<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let config = config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .add_source(
                config::Environment::with_prefix("GEOMARK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ConfigError::LoadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        config.try_deserialize().map_err(|e| {
            ConfigError::InvalidFormat {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Loads the configuration for startup: an explicit path must exist
    /// and parse; no path means compiled defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => {
                let config = Self::from_config_builder(path)?;
                config.validate()?;
                Ok(config)
            }
            Some(path) => Err(ConfigError::file_not_found(path.display().to_string()).into()),
            None => Ok(Self::default()),
        }
    }

    /// Validates the configuration.
    ///
    /// Checks coordinate ranges, zoom levels, the tile URL template, and
    /// the geolocation settings.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn validate(&self) -> Result<()> {
        if !(-180.0..=180.0).contains(&self.map.center_lon) {
            return Err(ConfigError::invalid_value(
                "map.center_lon",
                "must be between -180 and 180",
            )
            .into());
        }

        if !(-90.0..=90.0).contains(&self.map.center_lat) {
            return Err(ConfigError::invalid_value(
                "map.center_lat",
                "must be between -90 and 90",
            )
            .into());
        }

        if !(0.0..=22.0).contains(&self.map.zoom) {
            return Err(ConfigError::invalid_value("map.zoom", "must be between 0 and 22").into());
        }

        for placeholder in ["{z}", "{x}", "{y}"] {
            if !self.tiles.url.contains(placeholder) {
                return Err(ConfigError::invalid_value(
                    "tiles.url",
                    format!("missing {placeholder} placeholder"),
                )
                .into());
            }
        }

        if !(0.0..=22.0).contains(&self.geolocation.zoom) {
            return Err(
                ConfigError::invalid_value("geolocation.zoom", "must be between 0 and 22").into(),
            );
        }

        if self.geolocation.timeout_secs == 0 {
            return Err(
                ConfigError::invalid_value("geolocation.timeout_secs", "must be positive").into(),
            );
        }

        Ok(())
    }
}
