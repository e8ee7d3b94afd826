//! Leaderboard endpoint

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{models::*, AppState};

/// `GET /leaderboard?limit=n`
///
/// A missing or non-numeric `limit` falls back to the default row count;
/// numeric values are clamped by the engine, so this endpoint never fails
/// on bad input.
#[utoipa::path(
    get,
    path = "/leaderboard",
    params(
        ("limit" = Option<String>, Query, description = "Row limit, clamped to 1-1000 (default: 100; non-numeric values use the default)")
    ),
    responses(
        (status = 200, description = "Top leaderboard rows, rating descending, dense competition ranks", body = Vec<LeaderboardRow>)
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Json<Vec<LeaderboardRow>> {
    // 0 is below the valid range, so the engine substitutes its default.
    let limit = params
        .limit
        .as_deref()
        .and_then(|raw| raw.parse::<i64>().ok())
        .unwrap_or(0);

    let rows = state.engine.top_n(limit).await;
    Json(rows.into_iter().map(Into::into).collect())
}
