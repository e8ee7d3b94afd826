//! Ladder REST API
//!
//! HTTP/JSON query surface over the ranking engine: the leaderboard,
//! prefix search, and stats endpoints, plus a health probe and Swagger
//! UI. Handlers are stateless; the only shared state is one engine
//! reference cloned into each request.

use std::sync::Arc;

use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use ladder_core::Leaderboard;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod handlers;
pub mod models;
pub mod shutdown;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Leaderboard>,
}

/// Create the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let swagger = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .route("/leaderboard", get(handlers::leaderboard::get_leaderboard))
        .route("/search", get(handlers::search::search_users))
        .route("/stats", get(handlers::stats::get_stats))
        .route("/health", get(handlers::stats::health_check))
        .merge(swagger)
        .fallback(fallback)
        .with_state(state)
        .layer(cors_layer())
}

/// Permissive read-only CORS: any origin, `GET`/`OPTIONS`, `Content-Type`.
///
/// The browser client is served from a different origin and calls the
/// three read endpoints directly. The layer answers every `OPTIONS`
/// request itself with an empty 200 carrying the grants, and stamps the
/// origin grant on every other response.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Unknown paths get a bare 404; the CORS layer still handles `OPTIONS`.
async fn fallback() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// OpenAPI specification
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::leaderboard::get_leaderboard,
        handlers::search::search_users,
        handlers::stats::get_stats,
        handlers::stats::health_check,
    ),
    components(schemas(
        models::LeaderboardRow,
        models::SearchResult,
        models::StatsResponse,
        models::HealthResponse,
        models::ErrorResponse,
    )),
    tags(
        (name = "leaderboard", description = "Top-N leaderboard with dense competition ranking"),
        (name = "search", description = "Username prefix search with live global ranks"),
        (name = "stats", description = "Population statistics"),
        (name = "health", description = "Health checks"),
    ),
    info(
        title = "Ladder API",
        version = "0.1.0",
        description = "REST API for the ladder concurrent leaderboard service",
    )
)]
struct ApiDoc;
