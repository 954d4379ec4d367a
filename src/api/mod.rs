//! Polarwatch REST API
//!
//! HTTP API layer for Polarwatch, built with Axum. Every endpoint reads the
//! sampler's latest snapshot; none of them mutate it.
//!
//! # Endpoints
//!
//! ## Views
//! - `GET /api/v1/snapshot` - History window and latest reading
//! - `GET /api/v1/dashboard` - Every derived view at once
//! - `GET /api/v1/latest` - Latest temperature text for both locations
//! - `GET /api/v1/latest/:location` - Latest temperature text for one location
//! - `GET /api/v1/comparison` - Which location is warmer
//! - `GET /api/v1/table` - History as rows
//! - `GET /api/v1/chart` - Chart series
//!
//! ## Export
//! - `GET /api/v1/export?format=csv|json|ndjson` - Download the window
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /api/v1/ws` - Real-time streaming connection
//!
//! # Example
//!
//! ```rust,ignore
//! use polarwatch::api::{serve, AppState};
//! use polarwatch::config::Config;
//! use polarwatch::sampler::Sampler;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let sampler = Sampler::new(&config.sampler).spawn(config.sampler.interval());
//!
//!     let state = AppState::new(sampler.feed(), config.api.clone());
//!     serve(state, &config.api).await?;
//!
//!     sampler.shutdown();
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;
use crate::websocket::{websocket_handler, WsEvent};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let api_routes = Router::new()
        // View routes
        .route("/snapshot", get(routes::readings::get_snapshot))
        .route("/dashboard", get(routes::readings::get_dashboard))
        .route("/latest", get(routes::readings::get_latest))
        .route("/latest/:location", get(routes::readings::get_location_latest))
        .route("/comparison", get(routes::readings::get_comparison))
        .route("/table", get(routes::readings::get_table))
        .route("/chart", get(routes::readings::get_chart))
        // Export routes
        .route("/export", get(routes::export::export_data))
        // WebSocket route
        .route("/ws", get(websocket_handler));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS for the configured origins, or any origin when none are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET])
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let hub = Arc::clone(&state.ws_hub);
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Polarwatch API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            hub.broadcast(&WsEvent::system("Server shutting down")).await;
        })
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Polarwatch API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
