//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/geo-api-proxy/config.toml

pub mod defaults;
pub mod overrides;

use crate::constants::api::{GEONAMES_URL, OPENCAGE_URL};
use crate::constants::cache::CACHE_SLOT_NAME;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub use overrides::CountryOverrideConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream (OpenCage) provider settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Legacy (GeoNames) provider settings
    #[serde(default)]
    pub legacy: LegacyConfig,

    /// Request rate and coordinate rounding
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Result cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Language selection per country
    #[serde(default)]
    pub language: LanguageConfig,

    /// Place normalizer overrides
    #[serde(default)]
    pub overrides: CountryOverrideConfig,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Upstream geocoder settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// OpenCage endpoint
    #[serde(default = "default_upstream_url")]
    pub url: String,

    /// OpenCage API key
    #[serde(default)]
    pub api_key: String,
}

/// Legacy provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyConfig {
    /// GeoNames base URL
    #[serde(default = "default_legacy_url")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Ceiling for upstream requests per second
    #[serde(default = "default_requests_per_sec")]
    pub requests_per_sec: f64,

    /// Decimal places applied to query coordinates before any lookup
    #[serde(default = "default_coordinate_precision")]
    pub coordinate_precision: u32,
}

/// Result cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory for the state file (empty: system temp directory)
    #[serde(default)]
    pub state_dir: String,

    /// Name of the cache slot
    #[serde(default = "default_slot_name")]
    pub slot_name: String,
}

/// Language requested from the upstream provider, by country
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Language used for countries without a mapping
    #[serde(default = "default_language")]
    pub default: String,

    /// Lowercase country code to language
    #[serde(default = "default_language_countries")]
    pub countries: HashMap<String, String>,
}

// Default value functions for serde
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_upstream_url() -> String {
    OPENCAGE_URL.to_string()
}
fn default_legacy_url() -> String {
    GEONAMES_URL.to_string()
}
fn default_requests_per_sec() -> f64 {
    DEFAULT_REQUESTS_PER_SEC
}
fn default_coordinate_precision() -> u32 {
    DEFAULT_COORDINATE_PRECISION
}
fn default_slot_name() -> String {
    CACHE_SLOT_NAME.to_string()
}
fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}
fn default_language_countries() -> HashMap<String, String> {
    DEFAULT_LANGUAGE_MAPPING
        .iter()
        .map(|(country, language)| (country.to_string(), language.to_string()))
        .collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_upstream_url(),
            api_key: String::new(),
        }
    }
}

impl Default for LegacyConfig {
    fn default() -> Self {
        Self {
            url: default_legacy_url(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_sec: default_requests_per_sec(),
            coordinate_precision: default_coordinate_precision(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            state_dir: String::new(),
            slot_name: default_slot_name(),
        }
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            default: default_language(),
            countries: default_language_countries(),
        }
    }
}

impl LanguageConfig {
    /// Language for a lowercase country code, falling back to the default
    pub fn language_for(&self, country_code: &str) -> &str {
        self.countries
            .get(country_code)
            .map(String::as_str)
            .unwrap_or(&self.default)
    }
}

impl CacheConfig {
    /// Directory holding the cache state file
    pub fn state_dir(&self) -> PathBuf {
        if self.state_dir.is_empty() {
            std::env::temp_dir()
        } else {
            PathBuf::from(&self.state_dir)
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Check the settings that have no usable fallback
    ///
    /// A missing API key is checked by the upstream backend itself.
    pub fn validate(&self) -> Result<()> {
        let rate = self.rate_limit.requests_per_sec;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(Error::Config(format!(
                "requests_per_sec must be positive, got {}",
                rate
            )));
        }
        if self.rate_limit.coordinate_precision > MAX_COORDINATE_PRECISION {
            return Err(Error::Config(format!(
                "coordinate_precision must be at most {}, got {}",
                MAX_COORDINATE_PRECISION, self.rate_limit.coordinate_precision
            )));
        }
        if self.language.default.trim().is_empty() {
            return Err(Error::Config(
                "language.default must not be empty".to_string(),
            ));
        }
        if self.cache.slot_name.trim().is_empty() {
            return Err(Error::Config("cache.slot_name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["upstream", "url"] => Some(self.upstream.url.clone()),
            ["upstream", "api_key"] => Some(self.upstream.api_key.clone()),

            ["legacy", "url"] => Some(self.legacy.url.clone()),

            ["rate_limit", "requests_per_sec"] => {
                Some(self.rate_limit.requests_per_sec.to_string())
            }
            ["rate_limit", "coordinate_precision"] => {
                Some(self.rate_limit.coordinate_precision.to_string())
            }

            ["cache", "state_dir"] => Some(self.cache.state_dir.clone()),
            ["cache", "slot_name"] => Some(self.cache.slot_name.clone()),

            ["language", "default"] => Some(self.language.default.clone()),
            ["language", "countries", country] => self.language.countries.get(*country).cloned(),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            ["upstream", "url"] => {
                self.upstream.url = value.to_string();
            }
            ["upstream", "api_key"] => {
                self.upstream.api_key = value.to_string();
            }

            ["legacy", "url"] => {
                self.legacy.url = value.to_string();
            }

            ["rate_limit", "requests_per_sec"] => {
                self.rate_limit.requests_per_sec = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid rate value: {}", value))
                })?;
            }
            ["rate_limit", "coordinate_precision"] => {
                self.rate_limit.coordinate_precision = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid precision value: {}", value))
                })?;
            }

            ["cache", "state_dir"] => {
                self.cache.state_dir = value.to_string();
            }
            ["cache", "slot_name"] => {
                self.cache.slot_name = value.to_string();
            }

            ["language", "default"] => {
                self.language.default = value.to_string();
            }
            ["language", "countries", country] => {
                self.language
                    .countries
                    .insert(country.to_lowercase(), value.to_string());
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "server.host",
            "server.port",
            "upstream.url",
            "upstream.api_key",
            "legacy.url",
            "rate_limit.requests_per_sec",
            "rate_limit.coordinate_precision",
            "cache.state_dir",
            "cache.slot_name",
            "language.default",
            "language.countries.<cc>",
        ]
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
