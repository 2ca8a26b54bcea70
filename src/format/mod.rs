//! Legacy response formatting
//!
//! Builds the GeoNames-shaped XML documents for a [`NormalizedPlace`] and
//! the JSON dump served by the `debug` API.

pub mod xml;

use crate::assembler::Resolution;
use crate::place::NormalizedPlace;
use serde::Serialize;
use xml::XmlElement;

/// `findNearbyPlaceName` document
///
/// Both the toponym and the display name carry the locality.
pub fn place_name_xml(place: &NormalizedPlace) -> String {
    let mut geoname = XmlElement::new("geoname");
    geoname
        .push_text("toponymName", &place.locality)
        .push_text("name", &place.locality)
        .push_text("lat", place.lat)
        .push_text("lng", place.lng)
        .push_text("countryCode", &place.country_code)
        .push_text("countryName", &place.country)
        .push_text("distance", place.distance);

    document(geoname, place)
}

/// `findNearbyPostalCodes` document
///
/// The postal-code schema has no locality slot: `name` is the city and
/// `adminName1` the region.
pub fn postal_code_xml(place: &NormalizedPlace) -> String {
    let mut code = XmlElement::new("code");
    code.push_text("name", &place.city)
        .push_text("countryCode", &place.country_code)
        .push_text("lat", place.lat)
        .push_text("lng", place.lng)
        .push_text("adminName1", &place.region)
        .push_text("distance", place.distance);

    document(code, place)
}

/// Wrap a record element in `<geonames>`, appending the remaining quota
fn document(record: XmlElement, place: &NormalizedPlace) -> String {
    let mut root = XmlElement::new("geonames");
    root.push(record);
    if let Some(remaining) = place.requests_remaining {
        root.push_text("remaining", remaining);
    }
    root.to_document()
}

/// Body of the `debug` API
#[derive(Debug, Serialize)]
pub struct DebugReport<'a> {
    #[serde(flatten)]
    pub resolution: &'a Resolution,

    /// Seconds spent handling the request
    pub elapsed_secs: f64,
}

/// Pretty JSON dump of a resolution
pub fn debug_json(resolution: &Resolution, elapsed_secs: f64) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&DebugReport {
        resolution,
        elapsed_secs,
    })
}
