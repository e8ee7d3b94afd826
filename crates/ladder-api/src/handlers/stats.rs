//! Stats and health endpoints

use axum::{extract::State, Json};

use crate::{models::*, AppState};

/// `GET /stats`
#[utoipa::path(
    get,
    path = "/stats",
    responses(
        (status = 200, description = "Current population size", body = StatsResponse)
    ),
    tag = "stats"
)]
pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        total_users: state.engine.size().await,
    })
}

/// `GET /health`
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
