//! HTTP adapter over the prescription engine.
//!
//! Routes:
//! - `POST /prescribe`: prescription input document in, prescription out
//! - `GET /appliances`: the appliance table
//! - `GET /products`: the product table keyed by kit size

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::catalog::Catalog;
use crate::config::DefaultsConfig;

pub use types::ErrorResponse;

/// Immutable state shared across all request handlers.
///
/// Built once at startup and wrapped in `Arc`; nothing is mutated after.
pub struct AppState {
    pub catalog: Catalog,
    /// Coverage target and reference kit applied when a request omits them.
    pub defaults: DefaultsConfig,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/prescribe", post(handlers::prescribe))
        .route("/appliances", get(handlers::list_appliances))
        .route("/products", get(handlers::list_products))
        .with_state(state)
}

/// Binds to `addr` and serves the API until the server stops.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
