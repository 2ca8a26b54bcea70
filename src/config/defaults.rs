//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8042;

/// Official limit for the free OpenCage tier is 1 req/sec. Serving the cached
/// second request of a lookup pair takes some time too, so the ceiling sits a
/// little higher to land at an effective rate of about 1 req/sec.
pub const DEFAULT_REQUESTS_PER_SEC: f64 = 1.25;

/// Decimal places coordinates are rounded to before lookup
pub const DEFAULT_COORDINATE_PRECISION: u32 = 5;

/// Upper bound for the coordinate precision (f64 has ~15 significant digits)
pub const MAX_COORDINATE_PRECISION: u32 = 12;

/// Language requested for countries without an explicit mapping
pub const DEFAULT_LANGUAGE: &str = "de,en";

/// Country (lowercase ISO code) to OpenCage language mapping
pub const DEFAULT_LANGUAGE_MAPPING: &[(&str, &str)] = &[
    ("us", "en"),
    ("ca", "en"),
    ("de", "de"),
    ("ch", "de"),
    ("at", "de"),
    ("be", "native"),
    ("fr", "fr"),
    ("lu", "fr"),
    ("gb", "en"),
    ("ie", "en"),
    ("ro", "ro"),
    ("hu", "hu"),
];

/// Ignore states and use counties instead
pub const DEFAULT_IGNORE_REGION: &[&str] = &["gb"];

/// Prefer the municipality name as the city name
pub const DEFAULT_PREFER_MUNICIPALITY: &[&str] = &["Stutensee"];

/// Prefer the city district name as the city name
pub const DEFAULT_PREFER_CITY_DISTRICT: &[&str] = &["London"];

/// Prefer the suburb name as the city name
pub const DEFAULT_PREFER_SUBURB_AS_CITY: &[&str] = &["New York"];

/// Prefer the neighbourhood over the suburb for the locality
pub const DEFAULT_PREFER_NEIGHBOURHOOD: &[&str] = &["New York"];

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "geo-api-proxy";
