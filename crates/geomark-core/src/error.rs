//! Error types for GeoMark.
//!
//! Drawing and measurement never signal errors (unrecognized modes fall
//! back, unmeasurable geometries are skipped); what remains is
//! configuration loading and the one-shot geolocation request. All errors
//! implement `std::error::Error` and are serializable for logging.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using GeoMarkError as the error type.
pub type Result<T> = std::result::Result<T, GeoMarkError>;

/// Top-level error type for all GeoMark operations.
#[derive(Debug, Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum GeoMarkError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Geolocation errors
    #[error("Geolocation error: {0}")]
    Geolocation(#[from] GeolocationError),

    /// Internal errors that shouldn't normally occur
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors related to configuration loading and validation.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {reason}")]
    LoadFailed { path: String, reason: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {reason}")]
    InvalidFormat { reason: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    /// Creates a file not found error.
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Creates a load failed error.
    pub fn load_failed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LoadFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors from the one-shot position lookup.
///
/// None of these is ever surfaced in the UI; the app logs the failure
/// and proceeds without a location marker.
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
pub enum GeolocationError {
    /// The HTTP request could not be completed
    #[error("Position request failed: {reason}")]
    RequestFailed { reason: String },

    /// The service answered but refused the lookup
    #[error("Position lookup refused by service")]
    LookupRefused,

    /// The service answered with an unusable payload
    #[error("Invalid position response: {reason}")]
    InvalidResponse { reason: String },
}

impl GeolocationError {
    /// Creates a request failed error.
    pub fn request_failed(reason: impl Into<String>) -> Self {
        Self::RequestFailed {
            reason: reason.into(),
        }
    }

    /// Creates an invalid response error.
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }
}
