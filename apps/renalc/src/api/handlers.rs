//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{ComputeRequest, ComputeResponse, HealthResponse, HistoryResponse, StagesResponse},
};
use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use renalc_core::{ALL_STAGES, compute};
use serde::Deserialize;

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// COMPUTE HANDLER
// =============================================================================

/// Compute a filtration estimate; optionally append it to the history.
pub async fn compute_handler(
    State(state): State<AppState>,
    Json(request): Json<ComputeRequest>,
) -> impl IntoResponse {
    // Parse the string selectors before touching the engine.
    let input = match request.to_input() {
        Ok(input) => input,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ComputeResponse::error(e.to_string())));
        }
    };

    let result = match compute(&input) {
        Ok(result) => result,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ComputeResponse::error(e.to_string())));
        }
    };

    let mut saved = false;
    if request.save {
        // Single-writer discipline: the write lock serializes appends.
        let history = state.history.write().await;
        if let Err(e) = history.append(&result) {
            tracing::error!("history append failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ComputeResponse::error(format!("save failed: {e}"))),
            );
        }
        saved = true;
    }

    (StatusCode::OK, Json(ComputeResponse::success(&result, saved)))
}

// =============================================================================
// STAGES HANDLER
// =============================================================================

/// Get the KDIGO staging table.
pub async fn stages_handler() -> impl IntoResponse {
    let response = StagesResponse {
        stages: ALL_STAGES.iter().map(|s| (*s).into()).collect(),
    };
    (StatusCode::OK, Json(response))
}

// =============================================================================
// HISTORY HANDLERS
// =============================================================================

/// Query parameters for `GET /history`.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Keep only the most recent N rows.
    pub limit: Option<usize>,
}

/// Get parsed history rows.
pub async fn history_handler(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> impl IntoResponse {
    let history = state.history.read().await;
    match history.read_rows(query.limit) {
        Ok(rows) => (
            StatusCode::OK,
            Json(HistoryResponse {
                count: rows.len(),
                rows,
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// Download the raw history CSV verbatim.
pub async fn export_handler(State(state): State<AppState>) -> impl IntoResponse {
    let history = state.history.read().await;
    if !history.exists() {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "no history recorded yet" })),
        )
            .into_response();
    }

    match history.raw_bytes() {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"kidney_history.csv\"",
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
