//! Username prefix search endpoint

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::{models::*, AppState};

/// `GET /search?username=q`
///
/// Case-insensitive prefix match over usernames. Every row carries the
/// global rank the user held in the same snapshot that produced the
/// match, so a response is internally consistent even while the
/// simulator is churning ratings underneath it.
#[utoipa::path(
    get,
    path = "/search",
    params(
        ("username" = String, Query, description = "Username prefix to match, case-insensitively")
    ),
    responses(
        (status = 200, description = "Matches with live global ranks, rating descending (at most 50)", body = Vec<SearchResult>),
        (status = 400, description = "username parameter missing or empty", body = ErrorResponse)
    ),
    tag = "search"
)]
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchResult>>, (StatusCode, Json<ErrorResponse>)> {
    let query = match params.username.as_deref() {
        Some(q) if !q.is_empty() => q,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "missing_parameter".to_string(),
                    message: "username query parameter required".to_string(),
                }),
            ))
        }
    };

    let matches = state.engine.prefix_search(query).await;
    Ok(Json(matches.into_iter().map(Into::into).collect()))
}
