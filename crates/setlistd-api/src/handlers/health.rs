//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use setlistd_service::dto::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ServerStatus {
    pub message: &'static str,
    pub status: &'static str,
}

/// Server banner
///
/// GET /
pub async fn index() -> Json<ServerStatus> {
    Json(ServerStatus {
        message: "Setlistd API Server",
        status: "running",
    })
}

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with dependency health
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let db_healthy = setlistd_db::ping(state.pool()).await;

    let status = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(ReadinessResponse::ready(db_healthy)))
}
