//! Cascading field selection
//!
//! No single OpenCage component maps onto the legacy region/city/locality
//! slots across all countries, so each slot is filled from a precedence list
//! of candidate components, with a few named places switching branches via
//! [`CountryOverrideConfig`]. Every cascade ends in a fallback, so
//! normalization never fails.

use crate::config::CountryOverrideConfig;
use crate::place::corrections::{correct_city, correct_locality, correct_region};
use crate::place::{PlaceFields, RawPlaceRecord};

/// Map a raw record onto the three legacy display fields
pub fn normalize(raw: &RawPlaceRecord, overrides: &CountryOverrideConfig) -> PlaceFields {
    PlaceFields {
        region: select_region(raw, overrides),
        city: select_city(raw, overrides),
        locality: select_locality(raw, overrides),
    }
}

/// Select the state-equivalent region
///
/// `state` → `county` → `state_district` → `city`. Countries listed in
/// `ignore_region` skip `state`.
pub fn select_region(raw: &RawPlaceRecord, overrides: &CountryOverrideConfig) -> String {
    let ignore_state = raw
        .override_country_code()
        .is_some_and(|code| overrides.ignores_region(code));

    let state = raw.state.as_ref().filter(|_| !ignore_state);

    let region = state
        .or(raw.county.as_ref())
        .or(raw.state_district.as_ref())
        .or(raw.city.as_ref())
        .cloned()
        .unwrap_or_default();

    correct_region(region)
}

/// Select the city name
///
/// Override branches first, then `town` → `city` → `village` → `district` →
/// `municipality` → `county`, falling back to the region.
pub fn select_city(raw: &RawPlaceRecord, overrides: &CountryOverrideConfig) -> String {
    let city = preferred_municipality(raw, overrides)
        .or_else(|| when_city_listed(raw, &raw.city_district, |c| overrides.prefers_city_district(c)))
        .or_else(|| when_city_listed(raw, &raw.suburb, |c| overrides.prefers_suburb_as_city(c)))
        .or(raw.town.as_ref())
        .or(raw.city.as_ref())
        .or(raw.village.as_ref())
        .or(raw.district.as_ref())
        .or(raw.municipality.as_ref())
        .or(raw.county.as_ref())
        .cloned()
        .unwrap_or_else(|| select_region(raw, overrides));

    correct_city(city)
}

/// Select the fine-grained place name
///
/// `neighbourhood` for listed cities, then `suburb` → `neighbourhood` →
/// `hamlet` → `village` → `city_district` → `district` → `town` → `city`,
/// falling back to the city.
pub fn select_locality(raw: &RawPlaceRecord, overrides: &CountryOverrideConfig) -> String {
    let locality = when_city_listed(raw, &raw.neighbourhood, |c| overrides.prefers_neighbourhood(c))
        .or(raw.suburb.as_ref())
        .or(raw.neighbourhood.as_ref())
        .or(raw.hamlet.as_ref())
        .or(raw.village.as_ref())
        .or(raw.city_district.as_ref())
        .or(raw.district.as_ref())
        .or(raw.town.as_ref())
        .or(raw.city.as_ref())
        .cloned()
        .unwrap_or_else(|| select_city(raw, overrides));

    correct_locality(locality)
}

fn preferred_municipality<'a>(
    raw: &'a RawPlaceRecord,
    overrides: &CountryOverrideConfig,
) -> Option<&'a String> {
    raw.municipality
        .as_ref()
        .filter(|m| overrides.prefers_municipality(m))
}

/// `field` if both it and `city` are present and `city` is listed
fn when_city_listed<'a>(
    raw: &'a RawPlaceRecord,
    field: &'a Option<String>,
    listed: impl Fn(&str) -> bool,
) -> Option<&'a String> {
    match (field, &raw.city) {
        (Some(value), Some(city)) if listed(city.as_str()) => Some(value),
        _ => None,
    }
}
