// SPDX-FileCopyrightText: 2026 Itinera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use itinera_core::{CompletionProvider, ItineraError, ItineraryStore};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers;

/// State for the health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

/// Shared state for axum request handlers.
///
/// Built once at startup; every request sees the same provider and store.
#[derive(Clone)]
pub struct GatewayState {
    pub provider: Arc<dyn CompletionProvider>,
    pub store: Arc<dyn ItineraryStore>,
    pub health: HealthState,
}

impl GatewayState {
    pub fn new(provider: Arc<dyn CompletionProvider>, store: Arc<dyn ItineraryStore>) -> Self {
        Self {
            provider,
            store,
            health: HealthState {
                start_time: std::time::Instant::now(),
            },
        }
    }
}

/// Listener address.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Build the full route table:
/// - POST /api/generate
/// - GET /api/history
/// - POST /api/itineraries
/// - PUT /api/itineraries/{id}/favorite
/// - POST /api/save
/// - GET /health
pub fn build_router(state: GatewayState) -> Router {
    let api_routes = Router::new()
        .route("/api/generate", post(handlers::post_generate))
        .route("/api/history", get(handlers::get_history))
        .route("/api/itineraries", post(handlers::post_itinerary))
        .route("/api/itineraries/{id}/favorite", put(handlers::put_favorite))
        .route("/api/save", post(handlers::post_save));

    Router::new()
        .route("/health", get(handlers::get_health))
        .merge(api_routes)
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind to the configured host:port and serve until `shutdown` is cancelled.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), ItineraError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| ItineraError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    info!("Gateway server listening on {addr}");
    serve(listener, state, shutdown).await
}

/// Serve on an already-bound listener until `shutdown` is cancelled.
pub async fn serve(
    listener: TcpListener,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), ItineraError> {
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| ItineraError::Internal(format!("gateway server error: {e}")))?;

    info!("Gateway server stopped");
    Ok(())
}
