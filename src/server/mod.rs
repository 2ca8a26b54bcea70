//! HTTP server for geo-api-proxy
//!
//! Serves the legacy GeoNames API surface.

pub mod routes;
pub mod state;

use crate::cache::store::FileStateStore;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::opencage::OpenCageBackend;
use crate::geo::GeocodeBackend;
use routes::create_router;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Build the production state: OpenCage upstream, file-backed cache
pub fn build_state(config: &Config) -> Result<AppState<OpenCageBackend>> {
    let backend = OpenCageBackend::with_base_url(
        config.upstream.url.clone(),
        config.upstream.api_key.clone(),
    )?;
    let store = FileStateStore::new(config.cache.state_dir());
    info!("Cache state file: {}", store.path_for(&config.cache.slot_name).display());

    AppState::new(config, backend, Box::new(store))
}

/// Start the HTTP server
///
/// # Arguments
/// * `config` - Server configuration
///
/// # Returns
/// Never returns unless the server shuts down
pub async fn run(config: Config) -> Result<()> {
    let addr = config.server_addr();
    run_on(&addr, config).await
}

/// Start the HTTP server with a specific address
pub async fn run_on(addr: &str, config: Config) -> Result<()> {
    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| Error::Server(format!("Invalid server address: {}", e)))?;

    let state = Arc::new(build_state(&config)?);
    serve(addr, state).await
}

/// Serve a prepared state on an address
pub async fn serve<G: GeocodeBackend + 'static>(addr: SocketAddr, state: Arc<AppState<G>>) -> Result<()> {
    let app = create_router(state);

    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr).await.map_err(|e| {
        Error::Server(format!("Failed to bind to {}: {}", addr, e))
    })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Server(format!("Server error: {}", e)))?;

    Ok(())
}
