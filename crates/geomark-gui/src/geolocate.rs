//! One-shot IP-based position lookup.
//!
//! The request runs once, on a promise-backed worker thread; the UI
//! polls for the result and applies it on a later frame. Failures are
//! never surfaced — the caller logs them and moves on.

use std::time::Duration;

use geomark_core::config::GeolocationConfig;
use geomark_core::error::GeolocationError;
use geomark_core::types::GeoPoint;
use poll_promise::Promise;
use serde::Deserialize;

/// A located position with an optional place label.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFix {
    /// Located position
    pub position: GeoPoint,
    /// Human-readable place, when the service provides one
    pub label: Option<String>,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    country: Option<String>,
}

/// Drives the single position lookup.
#[derive(Default)]
pub struct Geolocator {
    promise: Option<Promise<Result<GeoFix, GeolocationError>>>,
    requested: bool,
}

impl Geolocator {
    /// Creates an idle geolocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires the one-shot request. Later calls are no-ops.
    pub fn request(&mut self, config: &GeolocationConfig) {
        if self.requested {
            return;
        }
        self.requested = true;

        let endpoint = config.endpoint.clone();
        let timeout = Duration::from_secs(config.timeout_secs);
        self.promise = Some(Promise::spawn_thread("geolocate", move || {
            fetch(&endpoint, timeout)
        }));
    }

    /// Returns true while the request is in flight.
    pub fn is_pending(&self) -> bool {
        self.promise
            .as_ref()
            .is_some_and(|p| p.ready().is_none())
    }

    /// Takes the result once it is ready. Returns at most once.
    pub fn poll(&mut self) -> Option<Result<GeoFix, GeolocationError>> {
        if self.promise.as_ref()?.ready().is_some() {
            self.promise.take().map(Promise::block_and_take)
        } else {
            None
        }
    }
}

fn fetch(endpoint: &str, timeout: Duration) -> Result<GeoFix, GeolocationError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| GeolocationError::request_failed(e.to_string()))?;

    let response = client
        .get(endpoint)
        .send()
        .map_err(|e| GeolocationError::request_failed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(GeolocationError::request_failed(format!(
            "service returned status {}",
            response.status()
        )));
    }

    let payload: IpApiResponse = response
        .json()
        .map_err(|e| GeolocationError::invalid_response(e.to_string()))?;

    decode(payload)
}

fn decode(payload: IpApiResponse) -> Result<GeoFix, GeolocationError> {
    if payload.status != "success" {
        return Err(GeolocationError::LookupRefused);
    }

    let lat = payload
        .lat
        .ok_or_else(|| GeolocationError::invalid_response("missing latitude"))?;
    let lon = payload
        .lon
        .ok_or_else(|| GeolocationError::invalid_response("missing longitude"))?;

    let label = [payload.city, payload.region_name, payload.country]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");

    Ok(GeoFix {
        position: GeoPoint::new(lon, lat),
        label: if label.is_empty() { None } else { Some(label) },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: serde_json::Value) -> IpApiResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_decode_success() {
        let fix = decode(payload(serde_json::json!({
            "status": "success",
            "lat": 12.9716,
            "lon": 77.5946,
            "city": "Bengaluru",
            "regionName": "Karnataka",
            "country": "India"
        })))
        .unwrap();

        assert_eq!(fix.position, GeoPoint::new(77.5946, 12.9716));
        assert_eq!(fix.label.as_deref(), Some("Bengaluru, Karnataka, India"));
    }

    #[test]
    fn test_decode_without_place_fields() {
        let fix = decode(payload(serde_json::json!({
            "status": "success",
            "lat": 0.5,
            "lon": -0.5
        })))
        .unwrap();

        assert_eq!(fix.position, GeoPoint::new(-0.5, 0.5));
        assert!(fix.label.is_none());
    }

    #[test]
    fn test_decode_refused_lookup() {
        let result = decode(payload(serde_json::json!({ "status": "fail" })));
        assert!(matches!(result, Err(GeolocationError::LookupRefused)));
    }

    #[test]
    fn test_decode_missing_coordinates() {
        let result = decode(payload(serde_json::json!({
            "status": "success",
            "lat": 12.9716
        })));
        assert!(matches!(
            result,
            Err(GeolocationError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn test_request_fires_once() {
        let mut geolocator = Geolocator::new();
        assert!(!geolocator.requested);
        // Pointing at an unroutable endpoint keeps the test offline; the
        // request flag is what matters here.
        let config = GeolocationConfig {
            endpoint: "http://127.0.0.1:0/json".to_string(),
            timeout_secs: 1,
            ..Default::default()
        };
        geolocator.request(&config);
        assert!(geolocator.requested);
        let first = geolocator.promise.is_some();
        geolocator.request(&config);
        assert_eq!(geolocator.promise.is_some(), first);
    }
}
