//! # renalc HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /compute` - Compute a filtration estimate (optionally save it)
//! - `GET /stages` - KDIGO staging table
//! - `GET /history` - Parsed history rows as JSON
//! - `GET /history/export` - Raw history CSV download
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `RENALC_CORS_ORIGINS`: Comma-separated list of allowed origins, or
//!   "*" for all (default: localhost only)

mod handlers;
mod types;

// Re-export handlers and types for integration tests (via `renalc::api::*`)
#[allow(unused_imports)]
pub use handlers::{
    compute_handler, export_handler, health_handler, history_handler, stages_handler,
};
#[allow(unused_imports)]
pub use types::{
    ComputeRequest, ComputeResponse, HealthResponse, HistoryResponse, ResultJson, StageJson,
    StagesResponse,
};

use crate::history::HistoryStore;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use renalc_core::RenalError;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state.
///
/// The history file is the only shared mutable resource in the system;
/// the lock enforces the append-only single-writer discipline when
/// concurrent callers save results.
#[derive(Clone)]
pub struct AppState {
    /// The history store behind a reader/writer lock.
    pub history: Arc<RwLock<HistoryStore>>,
}

impl AppState {
    /// Create new app state over a history store.
    #[must_use]
    pub fn new(history: HistoryStore) -> Self {
        Self {
            history: Arc::new(RwLock::new(history)),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from environment configuration.
///
/// Reads `RENALC_CORS_ORIGINS`:
/// - If "*": allows all origins (development mode - use with caution!)
/// - If not set: defaults to localhost only (restrictive default)
/// - Otherwise: parses comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("RENALC_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins (RENALC_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in RENALC_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => {
            tracing::info!("CORS: No RENALC_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let localhost_origins = vec![
        "http://localhost:3000".parse::<HeaderValue>().ok(),
        "http://localhost:8080".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:3000".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:8080".parse::<HeaderValue>().ok(),
    ];
    let origins: Vec<HeaderValue> = localhost_origins.into_iter().flatten().collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer();

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/compute", post(handlers::compute_handler))
        .route("/stages", get(handlers::stages_handler))
        .route("/history", get(handlers::history_handler))
        .route("/history/export", get(handlers::export_handler))
        .layer(axum::extract::DefaultBodyLimit::max(64 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(addr: &str, history: HistoryStore) -> Result<(), RenalError> {
    let state = AppState::new(history);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| RenalError::Io(format!("bind {}: {}", addr, e)))?;

    tracing::info!("renalc HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| RenalError::Io(format!("server error: {}", e)))
}
