//! Geocoding providers
//!
//! The upstream provider answers reverse geocoding queries; the legacy
//! provider only answers country lookups and passthrough APIs.

pub mod geonames;
#[cfg(test)]
pub mod mock;
pub mod opencage;

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::place::RawPlaceRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reverse geocoding response of the upstream provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocodeResponse {
    /// Matches, best first
    #[serde(default)]
    pub results: Vec<GeocodeResult>,

    /// Quota information, when the provider reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<RateInfo>,
}

/// A single geocoding match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,

    /// Sparse address components, keyed by component name
    #[serde(default)]
    pub components: Map<String, Value>,
}

/// Resolved point of a match
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Geometry {
    pub lat: f64,
    pub lng: f64,
}

/// Upstream quota status
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    pub remaining: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset: Option<u64>,
}

impl GeocodeResult {
    /// Build a match from components and a point
    pub fn new(lat: f64, lng: f64, components: Map<String, Value>) -> Self {
        Self {
            geometry: Geometry { lat, lng },
            components,
        }
    }

    /// Convert into a raw place record
    ///
    /// Components we model must be strings; anything else is an unexpected
    /// upstream shape.
    pub fn into_record(self) -> Result<RawPlaceRecord> {
        let mut fields = self.components;
        fields.insert("lat".to_string(), Value::from(self.geometry.lat));
        fields.insert("lng".to_string(), Value::from(self.geometry.lng));

        serde_json::from_value(Value::Object(fields)).map_err(|e| {
            Error::Upstream(format!("Unexpected address components: {}", e))
        })
    }
}

impl GeocodeResponse {
    /// Remaining upstream quota, if reported
    pub fn remaining(&self) -> Option<u64> {
        self.rate.map(|rate| rate.remaining)
    }

    /// Record of the first match
    ///
    /// Only the first match is ever consulted. No match at all is an
    /// upstream error.
    pub fn into_first_record(self) -> Result<RawPlaceRecord> {
        self.results
            .into_iter()
            .next()
            .ok_or_else(|| Error::Upstream("No results returned".to_string()))?
            .into_record()
    }
}

/// Trait for upstream reverse geocoding backends
pub trait GeocodeBackend: Send + Sync {
    /// Backend name, for logs
    fn name(&self) -> &'static str;

    /// Reverse geocode a coordinate pair in the given language
    fn reverse_geocode(
        &self,
        coords: Coordinates,
        language: &str,
    ) -> impl std::future::Future<Output = Result<GeocodeResponse>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_opencage_response() {
        let body = json!({
            "rate": {"limit": 2500, "remaining": 2487, "reset": 1700006400},
            "results": [
                {
                    "components": {
                        "ISO_3166-1_alpha-2": "DE",
                        "ISO_3166-2": ["DE-HE"],
                        "_category": "place",
                        "_type": "city",
                        "city": "Frankfurt am Main",
                        "country": "Deutschland",
                        "country_code": "de",
                        "state": "Hessen"
                    },
                    "confidence": 7,
                    "formatted": "Frankfurt am Main, Hessen, Deutschland",
                    "geometry": {"lat": 50.1109, "lng": 8.6821}
                },
                {
                    "components": {"city": "Offenbach"},
                    "geometry": {"lat": 50.09, "lng": 8.76}
                }
            ],
            "status": {"code": 200, "message": "OK"},
            "total_results": 2
        });

        let response: GeocodeResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.remaining(), Some(2487));

        let record = response.into_first_record().unwrap();
        assert_eq!(record.city.as_deref(), Some("Frankfurt am Main"));
        assert_eq!(record.iso_alpha2.as_deref(), Some("DE"));
        assert_eq!(record.lat, 50.1109);
        assert_eq!(record.lng, 8.6821);
    }

    #[test]
    fn test_missing_rate() {
        let response: GeocodeResponse = serde_json::from_value(json!({"results": []})).unwrap();
        assert_eq!(response.remaining(), None);
    }

    #[test]
    fn test_no_results_is_upstream_error() {
        let response = GeocodeResponse::default();
        assert!(matches!(response.into_first_record(), Err(Error::Upstream(_))));
    }

    #[test]
    fn test_non_string_component_is_upstream_error() {
        let mut components = Map::new();
        components.insert("city".to_string(), json!(42));

        let result = GeocodeResult::new(0.0, 0.0, components);
        assert!(matches!(result.into_record(), Err(Error::Upstream(_))));
    }
}
