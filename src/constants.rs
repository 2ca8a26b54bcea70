//! Centralized constants for the geo-api-proxy crate

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

    /// Decimal places kept for the reported distance (in kilometers)
    pub const DISTANCE_PRECISION: i32 = 4;
}

/// External API endpoints
pub mod api {
    /// OpenCage reverse geocoding endpoint
    pub const OPENCAGE_URL: &str = "https://api.opencagedata.com/geocode/v1/json";

    /// Legacy GeoNames web service
    pub const GEONAMES_URL: &str = "http://api.geonames.org";

    /// GeoNames API used to resolve the country of a coordinate pair
    pub const COUNTRY_CODE_API: &str = "countryCode";
}

/// Legacy request surface
pub mod legacy {
    use super::api::COUNTRY_CODE_API;

    /// APIs forwarded verbatim to GeoNames
    pub const PASSTHROUGH_APIS: &[&str] = &[COUNTRY_CODE_API, "timezone", "srtm3", "gtopo30"];

    /// APIs whose response is not an XML document
    pub const NON_XML_APIS: &[&str] = &[COUNTRY_CODE_API, "srtm3", "gtopo30", "debug"];

    pub const FIND_NEARBY_PLACE_NAME: &str = "findNearbyPlaceName";
    pub const FIND_NEARBY_POSTAL_CODES: &str = "findNearbyPostalCodes";
    pub const DEBUG: &str = "debug";

    /// Content type of legacy XML responses
    pub const XML_CONTENT_TYPE: &str = "text/xml;charset=UTF-8";
}

/// Cache settings
pub mod cache {
    /// Name of the single cache slot in the state store
    pub const CACHE_SLOT_NAME: &str = "rgcCache";

    /// File extension used by the file-backed state store
    pub const STATE_FILE_EXTENSION: &str = "json";
}
