//! Error types for geo-api-proxy

use thiserror::Error;

/// Main error type for geo-api-proxy operations
#[derive(Error, Debug)]
pub enum Error {
    /// The upstream geocoding provider failed or answered with an unexpected shape
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The legacy provider could not be reached for a passthrough call
    #[error("Legacy API error: {0}")]
    Legacy(String),

    /// The cache backing store is unreadable or corrupt
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Unknown API: {0}")]
    UnknownApi(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for geo-api-proxy operations
pub type Result<T> = std::result::Result<T, Error>;
