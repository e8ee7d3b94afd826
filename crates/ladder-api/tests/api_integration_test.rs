//! Integration tests for the ladder REST API
//!
//! Tests the HTTP endpoints by creating a real router over an in-memory
//! engine, then sending requests via tower::ServiceExt.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use ladder_api::{create_router, AppState};
use ladder_core::{EngineConfig, Leaderboard};

/// Router over an empty engine.
fn empty_app() -> (axum::Router, Arc<Leaderboard>) {
    let engine = Arc::new(Leaderboard::new(EngineConfig::default()));
    let app = create_router(AppState {
        engine: engine.clone(),
    });
    (app, engine)
}

/// Router over the six-user tie fixture.
async fn tie_fixture_app() -> axum::Router {
    let (app, engine) = empty_app();
    for (name, rating) in [
        ("a", 5000),
        ("b", 5000),
        ("c", 5000),
        ("d", 4900),
        ("e", 4800),
        ("f", 4800),
    ] {
        engine.upsert(name, rating).await.unwrap();
    }
    app
}

/// Router over a population large enough to exercise the 1000-row cap.
async fn large_app() -> axum::Router {
    let (app, engine) = empty_app();
    for i in 0..1200u32 {
        engine
            .upsert(&format!("user_{i}"), 100 + i % 4901)
            .await
            .unwrap();
    }
    app
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

// ---------------------------------------------------------------
// Health and stats
// ---------------------------------------------------------------

#[tokio::test]
async fn test_health_check() {
    let (app, _) = empty_app();
    let (status, json) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_stats_counts_users() {
    let app = tie_fixture_app().await;
    let (status, json) = get(app, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_users"], 6);
}

#[tokio::test]
async fn test_stats_empty_engine() {
    let (app, _) = empty_app();
    let (status, json) = get(app, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_users"], 0);
}

// ---------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------

#[tokio::test]
async fn test_leaderboard_ties_and_skips() {
    let app = tie_fixture_app().await;
    let (status, json) = get(app, "/leaderboard?limit=6").await;
    assert_eq!(status, StatusCode::OK);

    let expected = [
        (1, "a", 5000),
        (1, "b", 5000),
        (1, "c", 5000),
        (4, "d", 4900),
        (5, "e", 4800),
        (5, "f", 4800),
    ];
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), expected.len());
    for (row, (rank, username, rating)) in rows.iter().zip(expected) {
        assert_eq!(row["rank"], rank);
        assert_eq!(row["username"], username);
        assert_eq!(row["rating"], rating);
    }
}

#[tokio::test]
async fn test_leaderboard_default_limit_when_absent() {
    let app = large_app().await;
    let (status, json) = get(app, "/leaderboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 100);
}

#[tokio::test]
async fn test_leaderboard_malformed_limit_uses_default() {
    let app = large_app().await;
    let (status, json) = get(app, "/leaderboard?limit=abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 100);
}

#[tokio::test]
async fn test_leaderboard_zero_limit_uses_default() {
    let app = large_app().await;
    let (status, json) = get(app, "/leaderboard?limit=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 100);
}

#[tokio::test]
async fn test_leaderboard_huge_limit_clamped_to_cap() {
    let app = large_app().await;
    let (status, json) = get(app, "/leaderboard?limit=5000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 1000);
}

#[tokio::test]
async fn test_leaderboard_small_limit_honored() {
    let app = large_app().await;
    let (status, json) = get(app, "/leaderboard?limit=7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_leaderboard_empty_engine_returns_empty_array() {
    let (app, _) = empty_app();
    let (status, json) = get(app, "/leaderboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------
// Search
// ---------------------------------------------------------------

#[tokio::test]
async fn test_search_missing_param_is_400() {
    let app = tie_fixture_app().await;
    let (status, json) = get(app, "/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "missing_parameter");
}

#[tokio::test]
async fn test_search_empty_param_is_400() {
    let app = tie_fixture_app().await;
    let (status, _) = get(app, "/search?username=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_prefix_with_snapshot_ranks() {
    let (app, engine) = empty_app();
    engine.upsert("alice", 4800).await.unwrap();
    engine.upsert("alina", 4200).await.unwrap();
    engine.upsert("bob", 4800).await.unwrap();

    let (status, json) = get(app, "/search?username=AL").await;
    assert_eq!(status, StatusCode::OK);

    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["username"], "alice");
    assert_eq!(rows[0]["rating"], 4800);
    assert_eq!(rows[0]["global_rank"], 1);
    assert_eq!(rows[1]["username"], "alina");
    assert_eq!(rows[1]["rating"], 4200);
    assert_eq!(rows[1]["global_rank"], 3);
}

#[tokio::test]
async fn test_search_no_matches_is_empty_200() {
    let app = tie_fixture_app().await;
    let (status, json) = get(app, "/search?username=zzz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_search_caps_results_at_fifty() {
    let (app, engine) = empty_app();
    for i in 0..60u32 {
        engine
            .upsert(&format!("player_{i:02}"), 100 + i)
            .await
            .unwrap();
    }
    let (status, json) = get(app, "/search?username=player").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 50);
}

// ---------------------------------------------------------------
// CORS and routing surface
// ---------------------------------------------------------------

#[tokio::test]
async fn test_options_returns_empty_200_with_grants() {
    for uri in ["/leaderboard", "/search", "/stats"] {
        let (app, _) = empty_app();
        let resp = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri(uri)
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK, "OPTIONS {uri}");
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
        let methods = resp
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert!(methods.contains("GET"), "got {methods}");

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }
}

#[tokio::test]
async fn test_get_responses_carry_origin_grant() {
    let (app, _) = empty_app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/stats")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let (app, _) = empty_app();
    let (status, _) = get(app, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
