//! HTTP API routes
//!
//! The legacy client addresses an API by the last path segment, e.g.
//! `/findNearbyPlaceName?lat=..&lng=..&username=..`. Country, timezone and
//! elevation lookups are forwarded to GeoNames untouched; the reverse
//! geocoding APIs are answered from the upstream provider.

use crate::constants::legacy::{
    DEBUG, FIND_NEARBY_PLACE_NAME, FIND_NEARBY_POSTAL_CODES, NON_XML_APIS, PASSTHROUGH_APIS,
    XML_CONTENT_TYPE,
};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::format::{debug_json, place_name_xml, postal_code_xml};
use crate::geo::GeocodeBackend;
use crate::server::state::AppState;

use axum::{
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::OwnedMutexGuard;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

/// Create the API router
pub fn create_router<G: GeocodeBackend + 'static>(state: Arc<AppState<G>>) -> Router {
    Router::new()
        .route("/*path", get(legacy_handler::<G>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Reverse geocoding APIs answered by the proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxiedApi {
    FindNearbyPlaceName,
    FindNearbyPostalCodes,
    Debug,
}

impl std::str::FromStr for ProxiedApi {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            FIND_NEARBY_PLACE_NAME => Ok(Self::FindNearbyPlaceName),
            FIND_NEARBY_POSTAL_CODES => Ok(Self::FindNearbyPostalCodes),
            DEBUG => Ok(Self::Debug),
            _ => Err(Error::UnknownApi(s.to_string())),
        }
    }
}

/// Query parameters the proxy reads itself
///
/// Everything else (username, radius, ...) is only forwarded.
#[derive(Debug, Default)]
pub struct LegacyParams {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

impl LegacyParams {
    /// Read `lat` and `lng` from a raw query string
    ///
    /// A repeated key keeps its last value.
    pub fn from_query(query: &str) -> Result<Self> {
        let mut params = Self::default();

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let slot = match key {
                "lat" => &mut params.lat,
                "lng" => &mut params.lng,
                _ => continue,
            };

            let plus_decoded = value.replace('+', " ");
            let decoded = urlencoding::decode(&plus_decoded).map_err(|_| {
                Error::InvalidCoordinates(format!("Malformed '{}' value: {}", key, value))
            })?;
            *slot = Some(decoded.into_owned());
        }

        Ok(params)
    }

    /// Parse and validate the query coordinates
    pub fn coordinates(&self) -> Result<Coordinates> {
        let lat = parse_component("lat", self.lat.as_deref())?;
        let lng = parse_component("lng", self.lng.as_deref())?;
        let coords = Coordinates::new(lat, lng);
        coords.validate()?;
        Ok(coords)
    }
}

fn parse_component(name: &str, value: Option<&str>) -> Result<f64> {
    let value = value.ok_or_else(|| {
        Error::InvalidCoordinates(format!("Missing '{}' parameter", name))
    })?;
    value.trim().parse().map_err(|_| {
        Error::InvalidCoordinates(format!("Invalid '{}' value: {}", name, value))
    })
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "INVALID_COORDINATES" => StatusCode::BAD_REQUEST,
            "UNKNOWN_API" => StatusCode::NOT_FOUND,
            "UPSTREAM_ERROR" | "LEGACY_ERROR" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::UnknownApi(_) => "UNKNOWN_API",
            Error::Upstream(_) => "UPSTREAM_ERROR",
            Error::Legacy(_) => "LEGACY_ERROR",
            Error::Storage(_) => "STORAGE_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Content type for an API's response body
pub fn content_type(api: &str) -> &'static str {
    if api == DEBUG {
        "application/json"
    } else if NON_XML_APIS.contains(&api) {
        "text/plain;charset=UTF-8"
    } else {
        XML_CONTENT_TYPE
    }
}

/// Legacy API endpoint
///
/// GET /{...}/{api}?{query}
async fn legacy_handler<G: GeocodeBackend + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> std::result::Result<Response, ApiError> {
    let api = path.rsplit('/').next().unwrap_or_default();
    let query = query.unwrap_or_default();
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());

    handle(&state, api, &query, user_agent)
        .await
        .map(|body| ([(header::CONTENT_TYPE, content_type(api))], body).into_response())
        .map_err(|e| {
            warn!("{} request failed: {}", api, e);
            ApiError::from(e)
        })
}

async fn handle<G: GeocodeBackend + 'static>(
    state: &AppState<G>,
    api: &str,
    query: &str,
    user_agent: Option<&str>,
) -> Result<String> {
    let received = Instant::now();

    if PASSTHROUGH_APIS.contains(&api) {
        return state.legacy.passthrough(api, query, user_agent).await;
    }

    let proxied: ProxiedApi = api.parse()?;
    let coords = LegacyParams::from_query(query)?
        .coordinates()?
        .rounded(state.coordinate_precision);
    let lang = state.preferred_language(query, user_agent).await;

    let gate = state.assembler.clone().lock_owned().await;
    let started = Instant::now();
    let resolution = gate.resolve(coords, &lang).await?;

    let body = match proxied {
        ProxiedApi::FindNearbyPlaceName => place_name_xml(&resolution.place),
        ProxiedApi::FindNearbyPostalCodes => postal_code_xml(&resolution.place),
        ProxiedApi::Debug => debug_json(&resolution, received.elapsed().as_secs_f64())?,
    };

    let delay = state.governor.delay(started, resolution.cache_hit);
    release_after(gate, delay);

    Ok(body)
}

/// Release the request gate once `delay` has passed
///
/// The response goes out immediately; only the next request waits.
fn release_after<T: Send + 'static>(gate: OwnedMutexGuard<T>, delay: Duration) {
    if delay.is_zero() {
        return;
    }

    debug!("Rate limiting: holding next request for {:?}", delay);
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        drop(gate);
    });
}
