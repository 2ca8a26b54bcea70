//! OpenCage geocoding backend
//!
//! Reverse geocodes through the OpenCage Geocoding API.
//! Free tier rate limit: 1 request per second (see [`crate::rate`]).

use crate::constants::api::OPENCAGE_URL;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{GeocodeBackend, GeocodeResponse};
use serde::Deserialize;
use tracing::debug;

const USER_AGENT: &str = concat!("geo-api-proxy/", env!("CARGO_PKG_VERSION"));

/// OpenCage geocoding backend
#[derive(Debug, Clone)]
pub struct OpenCageBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Error body returned with non-success statuses
#[derive(Debug, Deserialize)]
struct OpenCageErrorBody {
    status: OpenCageStatus,
}

#[derive(Debug, Deserialize)]
struct OpenCageStatus {
    code: u16,
    message: String,
}

impl OpenCageBackend {
    /// Create a backend against the public OpenCage endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(OPENCAGE_URL, api_key)
    }

    /// Create a backend against a specific endpoint
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::Config(
                "An OpenCage API key is required (set upstream.api_key)".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
        })
    }

    /// Build the reverse geocoding URL for a query
    ///
    /// Annotations are never needed and are suppressed.
    fn query_url(&self, coords: Coordinates, language: &str) -> String {
        let query = format!("{},{}", coords.lat, coords.lng);
        format!(
            "{}?q={}&key={}&language={}&no_annotations=1",
            self.base_url,
            urlencoding::encode(&query),
            urlencoding::encode(&self.api_key),
            urlencoding::encode(language)
        )
    }
}

impl GeocodeBackend for OpenCageBackend {
    fn name(&self) -> &'static str {
        "opencage"
    }

    async fn reverse_geocode(&self, coords: Coordinates, language: &str) -> Result<GeocodeResponse> {
        let url = self.query_url(coords, language);
        debug!("OpenCage query {},{} [{}]", coords.lat, coords.lng, language);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("OpenCage request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.json::<OpenCageErrorBody>().await {
                Ok(body) => format!("{} ({})", body.status.message, body.status.code),
                Err(_) => status.to_string(),
            };
            return Err(Error::Upstream(format!("OpenCage returned status: {}", detail)));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse OpenCage response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_api_key() {
        assert!(matches!(OpenCageBackend::new(""), Err(Error::Config(_))));
        assert!(matches!(OpenCageBackend::new("   "), Err(Error::Config(_))));
    }

    #[test]
    fn test_query_url() {
        let backend = OpenCageBackend::new("abc123").unwrap();
        let url = backend.query_url(Coordinates::new(50.11092, 8.68213), "de,en");

        assert_eq!(
            url,
            "https://api.opencagedata.com/geocode/v1/json?q=50.11092%2C8.68213&key=abc123&language=de%2Cen&no_annotations=1"
        );
    }

    #[test]
    fn test_custom_base_url() {
        let backend = OpenCageBackend::with_base_url("http://localhost:9000/json", "k").unwrap();
        let url = backend.query_url(Coordinates::new(-1.5, 2.0), "en");
        assert!(url.starts_with("http://localhost:9000/json?q=-1.5%2C2&"));
    }

    #[test]
    fn test_backend_creation() {
        let backend = OpenCageBackend::new("key").unwrap();
        assert_eq!(backend.name(), "opencage");
        assert!(format!("{:?}", backend).contains("OpenCageBackend"));
    }
}
