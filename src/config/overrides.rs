//! Country and place-name overrides for the place normalizer
//!
//! Each list names the exact places (or country codes) for which a different
//! branch of the field-selection cascade is preferred.

use super::defaults::*;
use serde::{Deserialize, Serialize};

/// Override lists consulted by name equality during normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryOverrideConfig {
    /// Country codes whose `state` is ignored in favor of counties
    #[serde(default = "default_ignore_region")]
    pub ignore_region: Vec<String>,

    /// Municipalities used as the city name when present
    #[serde(default = "default_prefer_municipality")]
    pub prefer_municipality: Vec<String>,

    /// Cities replaced by their city district
    #[serde(default = "default_prefer_city_district")]
    pub prefer_city_district: Vec<String>,

    /// Cities replaced by their suburb
    #[serde(default = "default_prefer_suburb_as_city")]
    pub prefer_suburb_as_city: Vec<String>,

    /// Cities whose locality prefers the neighbourhood over the suburb
    #[serde(default = "default_prefer_neighbourhood")]
    pub prefer_neighbourhood: Vec<String>,
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn default_ignore_region() -> Vec<String> {
    to_owned_list(DEFAULT_IGNORE_REGION)
}
fn default_prefer_municipality() -> Vec<String> {
    to_owned_list(DEFAULT_PREFER_MUNICIPALITY)
}
fn default_prefer_city_district() -> Vec<String> {
    to_owned_list(DEFAULT_PREFER_CITY_DISTRICT)
}
fn default_prefer_suburb_as_city() -> Vec<String> {
    to_owned_list(DEFAULT_PREFER_SUBURB_AS_CITY)
}
fn default_prefer_neighbourhood() -> Vec<String> {
    to_owned_list(DEFAULT_PREFER_NEIGHBOURHOOD)
}

impl Default for CountryOverrideConfig {
    fn default() -> Self {
        Self {
            ignore_region: default_ignore_region(),
            prefer_municipality: default_prefer_municipality(),
            prefer_city_district: default_prefer_city_district(),
            prefer_suburb_as_city: default_prefer_suburb_as_city(),
            prefer_neighbourhood: default_prefer_neighbourhood(),
        }
    }
}

impl CountryOverrideConfig {
    /// Override set with every list empty
    pub fn empty() -> Self {
        Self {
            ignore_region: Vec::new(),
            prefer_municipality: Vec::new(),
            prefer_city_district: Vec::new(),
            prefer_suburb_as_city: Vec::new(),
            prefer_neighbourhood: Vec::new(),
        }
    }

    /// Whether regions of this country are ignored
    ///
    /// Country codes are compared case-insensitively.
    pub fn ignores_region(&self, country_code: &str) -> bool {
        self.ignore_region
            .iter()
            .any(|c| c.eq_ignore_ascii_case(country_code))
    }

    pub fn prefers_municipality(&self, municipality: &str) -> bool {
        contains(&self.prefer_municipality, municipality)
    }

    pub fn prefers_city_district(&self, city: &str) -> bool {
        contains(&self.prefer_city_district, city)
    }

    pub fn prefers_suburb_as_city(&self, city: &str) -> bool {
        contains(&self.prefer_suburb_as_city, city)
    }

    pub fn prefers_neighbourhood(&self, city: &str) -> bool {
        contains(&self.prefer_neighbourhood, city)
    }
}

fn contains(list: &[String], name: &str) -> bool {
    list.iter().any(|entry| entry == name)
}
