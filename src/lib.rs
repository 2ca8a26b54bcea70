//! geo-api-proxy: GeoNames-compatible reverse geocoding proxy
//!
//! Accepts requests shaped like calls to the GeoNames reverse geocoding API
//! and answers them from OpenCage, reshaping the result into the GeoNames XML
//! schema so legacy clients keep working.
//!
//! ## Features
//!
//! - Cascading region/city/locality selection with per-place overrides
//! - Single-slot result cache for the client's repeated query pairs
//! - Upstream rate governance that skips cached answers
//! - Verbatim passthrough of timezone and elevation APIs
//!
//! ## Quick Start
//!
//! ```rust
//! use geo_api_proxy::config::CountryOverrideConfig;
//! use geo_api_proxy::place::{normalize, RawPlaceRecord};
//!
//! let mut raw = RawPlaceRecord::at(50.1109, 8.6821);
//! raw.city = Some("Frankfurt am Main".to_string());
//! raw.state = Some("Hessen".to_string());
//!
//! let fields = normalize(&raw, &CountryOverrideConfig::default());
//! assert_eq!(fields.region, "Hessen");
//! assert_eq!(fields.locality, "Frankfurt am Main");
//! ```

pub mod assembler;
pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod place;
pub mod rate;
pub mod server;

// Re-export commonly used types
pub use assembler::{GeoDataAssembler, Resolution};
pub use cache::ResultCache;
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use place::{NormalizedPlace, RawPlaceRecord};
pub use rate::RateGovernor;
