//! JSON HTTP API over the loaded prediction resources.
//!
//! Provides three GET endpoints:
//! - `/predict` — run one demand prediction
//! - `/temperature` — temperature suggestion for a date, with provenance
//! - `/history` — recent consumption points for trend display

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::runtime::AppResources;

/// Builds the axum router with all API routes.
///
/// State is the process-wide resource bundle — immutable after load, so it
/// is shared across handlers without locks.
pub fn router(state: Arc<AppResources>) -> Router {
    Router::new()
        .route("/predict", get(handlers::get_predict))
        .route("/temperature", get(handlers::get_temperature))
        .route("/history", get(handlers::get_history))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppResources>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
