//! GET /health — probes the configured model endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};

use llm_service::health_service::HealthStatus;

use crate::{core::app_state::AppState, core::http::response_envelope::ApiResponse};

/// Handler: GET /health
///
/// Always returns 200 with per-endpoint snapshots; individual probes
/// report `ok=false` instead of failing the route.
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    match state.profiles.health_all().await {
        Ok(statuses) => {
            ApiResponse::success(statuses).into_response_with_status(StatusCode::OK)
        }
        Err(e) => ApiResponse::<Vec<HealthStatus>>::error("HEALTH_PROBE", e.to_string())
            .into_response_with_status(StatusCode::OK),
    }
}
