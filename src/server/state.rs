//! Server shared state
//!
//! Holds the assembler behind the request gate plus the read-only settings
//! every request needs.

use crate::assembler::GeoDataAssembler;
use crate::cache::store::StateStore;
use crate::cache::ResultCache;
use crate::config::{Config, LanguageConfig};
use crate::error::Result;
use crate::geo::geonames::GeoNamesClient;
use crate::geo::GeocodeBackend;
use crate::rate::RateGovernor;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

/// Shared state for the HTTP server
pub struct AppState<G> {
    /// Cache lookup, upstream call and cache store run under this lock. It
    /// stays held for the rate-limit delay after a response is sent.
    pub assembler: Arc<Mutex<GeoDataAssembler<G>>>,

    /// Upstream rate governor
    pub governor: RateGovernor,

    /// Legacy provider for country lookups and passthrough
    pub legacy: GeoNamesClient,

    /// Country to language mapping
    pub language: LanguageConfig,

    /// Decimal places applied to query coordinates
    pub coordinate_precision: u32,
}

impl<G: GeocodeBackend> AppState<G> {
    /// Create new application state
    ///
    /// Fails for configurations without a usable default (see
    /// [`Config::validate`]).
    pub fn new(config: &Config, backend: G, store: Box<dyn StateStore>) -> Result<Self> {
        config.validate()?;

        let cache = ResultCache::new(store, config.cache.slot_name.clone());
        let assembler = GeoDataAssembler::new(backend, cache, config.overrides.clone());

        Ok(Self {
            assembler: Arc::new(Mutex::new(assembler)),
            governor: RateGovernor::new(config.rate_limit.requests_per_sec)?,
            legacy: GeoNamesClient::with_base_url(config.legacy.url.clone()),
            language: config.language.clone(),
            coordinate_precision: config.rate_limit.coordinate_precision,
        })
    }

    /// Language to request from the upstream for a legacy query
    ///
    /// Resolves the country through the legacy provider. If that fails the
    /// default language is used.
    pub async fn preferred_language(&self, query: &str, user_agent: Option<&str>) -> String {
        let country = match self.legacy.country_code(query, user_agent).await {
            Ok(country) => country,
            Err(e) => {
                warn!("Country lookup failed, using default language: {}", e);
                String::new()
            }
        };

        self.language.language_for(&country).to_string()
    }
}
