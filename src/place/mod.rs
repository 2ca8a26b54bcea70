//! Place records
//!
//! [`RawPlaceRecord`] is the sparse record returned by the upstream geocoder,
//! [`NormalizedPlace`] the fixed shape the legacy schema requires. The
//! mapping between the two lives in [`normalize`].

pub mod corrections;
pub mod normalize;

use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};

pub use normalize::{normalize, select_city, select_locality, select_region};

/// Address components of a geocoding result
///
/// Every component is optional. `None` means the provider did not report
/// the component; `Some("")` is a reported empty value and wins a cascade
/// step like any other value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPlaceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Lowercase country code, used for region overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,

    /// ISO 3166-1 alpha-2 code as reported, used in responses
    #[serde(
        rename = "ISO_3166-1_alpha-2",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub iso_alpha2: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_district: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_district: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighbourhood: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hamlet: Option<String>,

    /// Latitude resolved by the provider
    pub lat: f64,

    /// Longitude resolved by the provider
    pub lng: f64,

    /// Set when the record was served from the result cache
    #[serde(skip)]
    pub cached: bool,
}

impl RawPlaceRecord {
    /// Record with coordinates and no address components
    pub fn at(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            ..Default::default()
        }
    }

    /// Coordinates resolved by the provider
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    /// Country code checked against the region overrides
    pub fn override_country_code(&self) -> Option<&str> {
        self.country_code
            .as_deref()
            .or(self.iso_alpha2.as_deref())
    }
}

/// The three display fields produced by the normalizer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceFields {
    /// State-equivalent administrative region
    pub region: String,
    pub city: String,
    /// Fine-grained place name
    pub locality: String,
}

/// A place in the shape required by the legacy schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPlace {
    pub country_code: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub locality: String,
    pub lat: f64,
    pub lng: f64,

    /// Distance from the queried point in kilometers
    pub distance: f64,

    /// Whether the underlying record came from the cache
    pub cached: bool,

    /// Remaining upstream quota, only known after a fresh upstream call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests_remaining: Option<u64>,
}
