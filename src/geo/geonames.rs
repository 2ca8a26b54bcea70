//! Legacy GeoNames client
//!
//! The proxy still talks to GeoNames for two things: resolving the country
//! of the queried point (to pick the upstream language) and the APIs that are
//! forwarded unchanged. The client's `User-Agent` is passed through.

use crate::constants::api::{COUNTRY_CODE_API, GEONAMES_URL};
use crate::error::{Error, Result};
use reqwest::header::USER_AGENT;

/// Client for the legacy GeoNames web service
#[derive(Debug, Clone)]
pub struct GeoNamesClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeoNamesClient {
    /// Create a client for the public GeoNames service
    pub fn new() -> Self {
        Self::with_base_url(GEONAMES_URL)
    }

    /// Create a client for a specific base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Format a legacy API URL carrying the original query string
    pub fn query_url(&self, api: &str, query: &str) -> String {
        format!("{}/{}?{}", self.base_url, api, query)
    }

    /// Lowercase country code of the queried point
    ///
    /// GeoNames answers with a bare code; an empty string means the point
    /// has no country (e.g. open sea).
    pub async fn country_code(&self, query: &str, user_agent: Option<&str>) -> Result<String> {
        let body = self.fetch(COUNTRY_CODE_API, query, user_agent).await?;
        Ok(body.trim().to_lowercase())
    }

    /// Forward a legacy API call and return its body unchanged
    pub async fn passthrough(&self, api: &str, query: &str, user_agent: Option<&str>) -> Result<String> {
        self.fetch(api, query, user_agent).await
    }

    async fn fetch(&self, api: &str, query: &str, user_agent: Option<&str>) -> Result<String> {
        let url = self.query_url(api, query);

        let mut request = self.client.get(&url);
        if let Some(agent) = user_agent {
            request = request.header(USER_AGENT, agent);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Legacy(format!("GeoNames request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Legacy(format!(
                "GeoNames returned status: {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Error::Legacy(format!("Failed to read GeoNames response: {}", e)))
    }
}

impl Default for GeoNamesClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_url() {
        let client = GeoNamesClient::new();
        assert_eq!(
            client.query_url("timezone", "lat=47.01&lng=10.2&username=demo"),
            "http://api.geonames.org/timezone?lat=47.01&lng=10.2&username=demo"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = GeoNamesClient::with_base_url("http://localhost:8080/");
        assert_eq!(
            client.query_url("countryCode", "lat=1&lng=2"),
            "http://localhost:8080/countryCode?lat=1&lng=2"
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_is_legacy_error() {
        // Port 9 (discard) is closed on test machines
        let client = GeoNamesClient::with_base_url("http://127.0.0.1:9");
        let result = client.country_code("lat=1&lng=2", None).await;
        assert!(matches!(result, Err(Error::Legacy(_))));
    }
}
