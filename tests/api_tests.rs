//! Integration tests for the dramaboard HTTP surface
//!
//! Tests cover:
//! - Health endpoint
//! - Discover API (paging, origin validation, sample catalog)
//! - Drama detail API and page
//! - Interaction endpoints (score, rating, seen, favorite, reset, bulk clears)
//! - Community stats aggregation over the API
//! - Saved-list pages (favorites, watched, best) with search narrowing
//! - Sitemap and static assets
//!
//! All tests run against the real router over an in-memory database with the
//! built-in sample catalog (no TMDB key).

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method

use dramaboard::db::{self, users};
use dramaboard::services::TmdbClient;
use dramaboard::{build_router, AppState};

/// Test helper: router over a fresh in-memory database, sample-catalog mode
async fn setup_app() -> axum::Router {
    let pool = db::connect_memory()
        .await
        .expect("Should create in-memory database");
    let guest = users::ensure_guest_user(&pool)
        .await
        .expect("Should create guest user");
    let catalog = TmdbClient::new(None).expect("Should build catalog client");
    let state = AppState::new(
        pool,
        catalog,
        guest.guid,
        "http://localhost:5740".to_string(),
    );
    build_router(state)
}

/// Test helper: request without a body
fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: request with a JSON body
fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: extract text body from response
async fn extract_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Should be UTF-8")
}

// =============================================================================
// Health Endpoint
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app().await;

    let response = app.oneshot(test_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "dramaboard");
    assert!(body["version"].is_string());
    assert_eq!(body["sample_mode"], true);
}

// =============================================================================
// Discover API
// =============================================================================

#[tokio::test]
async fn test_discover_returns_sample_page() {
    let app = setup_app().await;

    let response = app
        .oneshot(test_request("GET", "/api/dramas?page=1&origin=KR"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let dramas = body["dramas"].as_array().unwrap();
    assert_eq!(dramas.len(), 4);
    assert_eq!(dramas[0]["name"], "Crash Landing on You");
    // Board cards carry the truncated two-person cast
    assert_eq!(dramas[0]["characters"].as_array().unwrap().len(), 2);
    assert_eq!(dramas[0]["watch_providers"][0], "Netflix");
}

#[tokio::test]
async fn test_discover_past_last_page_is_empty() {
    let app = setup_app().await;

    let response = app
        .oneshot(test_request("GET", "/api/dramas?page=2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["dramas"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_discover_rejects_zero_page() {
    let app = setup_app().await;

    let response = app
        .oneshot(test_request("GET", "/api/dramas?page=0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_discover_rejects_unknown_origin() {
    let app = setup_app().await;

    let response = app
        .oneshot(test_request("GET", "/api/dramas?origin=US"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_drama_detail_api() {
    let app = setup_app().await;

    let response = app
        .oneshot(test_request("GET", "/api/dramas/94796"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["name"], "Crash Landing on You");
    assert_eq!(body["number_of_seasons"], 1);
    assert_eq!(body["number_of_episodes"], 16);
    assert_eq!(body["origin_country"][0], "KR");
}

#[tokio::test]
async fn test_drama_detail_api_unknown_id() {
    let app = setup_app().await;

    let response = app
        .oneshot(test_request("GET", "/api/dramas/555"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

// =============================================================================
// Pages
// =============================================================================

#[tokio::test]
async fn test_board_page_renders() {
    let app = setup_app().await;

    let response = app.oneshot(test_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains(r#"id="board-grid""#));
    assert!(html.contains(r#"id="scroll-sentinel""#));
    assert!(html.contains("/static/board.js"));
    assert!(html.contains("Powered by TMDB"));
}

#[tokio::test]
async fn test_detail_page_renders() {
    let app = setup_app().await;

    let response = app
        .oneshot(test_request("GET", "/drama/94796"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Crash Landing on You"));
    assert!(html.contains("Series Cast"));
    assert!(html.contains(r#"data-id="94796""#));
    assert!(html.contains("/static/detail.js"));
}

#[tokio::test]
async fn test_detail_page_unknown_id_is_404() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(test_request("GET", "/drama/999999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Not found"));

    // Non-numeric ids get the same HTML 404, not an extractor rejection
    let response = app
        .oneshot(test_request("GET", "/drama/goblin"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Stats API
// =============================================================================

#[tokio::test]
async fn test_stats_default_to_empty() {
    let app = setup_app().await;

    let response = app
        .oneshot(test_request("GET", "/api/stats?ids=94796,67915"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let stats = body["stats"].as_array().unwrap();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0]["tmdb_id"], 94796);
    assert_eq!(stats[0]["avg_score"], 0.0);
    assert_eq!(stats[0]["has_seen"], false);
    assert_eq!(stats[1]["tmdb_id"], 67915);
}

#[tokio::test]
async fn test_stats_reject_malformed_ids() {
    let app = setup_app().await;

    let response = app
        .oneshot(test_request("GET", "/api/stats?ids=1,abc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Interactions
// =============================================================================

#[tokio::test]
async fn test_score_updates_stats() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/dramas/94796/score",
            json!({"score": 8}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Rescoring the same title replaces the row instead of adding one
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/dramas/94796/score",
            json!({"score": 3}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(test_request("GET", "/api/stats?ids=94796"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    let stats = &body["stats"][0];
    assert_eq!(stats["score"], 3);
    assert_eq!(stats["avg_score"], 3.0);
    assert_eq!(stats["total_ratings"], 1);
}

#[tokio::test]
async fn test_score_out_of_range_is_rejected() {
    let app = setup_app().await;

    for score in [0, 11, -3] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/dramas/94796/score",
                json!({"score": score}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "score {score}");
    }
}

#[tokio::test]
async fn test_rating_submission_sets_score_and_seen() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/dramas/67915/rating",
            json!({"score": 9, "has_seen": true}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(test_request("GET", "/api/stats?ids=67915"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    let stats = &body["stats"][0];
    assert_eq!(stats["score"], 9);
    assert_eq!(stats["has_seen"], true);
    assert_eq!(stats["seen_count"], 1);
}

#[tokio::test]
async fn test_seen_toggle_flips_state() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(test_request("POST", "/api/dramas/94796/seen"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["has_seen"], true);

    let response = app
        .oneshot(test_request("POST", "/api/dramas/94796/seen"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["has_seen"], false);
}

#[tokio::test]
async fn test_reset_clears_all_dimensions() {
    let app = setup_app().await;

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/dramas/94796/rating",
            json!({"score": 7, "has_seen": true}),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(test_request("POST", "/api/dramas/94796/favorite"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(test_request("DELETE", "/api/dramas/94796/rating"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(test_request("GET", "/api/stats?ids=94796"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    let stats = &body["stats"][0];
    assert_eq!(stats["score"], Value::Null);
    assert_eq!(stats["has_seen"], false);
    assert_eq!(stats["is_favorite"], false);
    assert_eq!(stats["seen_count"], 0);
}

// =============================================================================
// Saved-list pages
// =============================================================================

#[tokio::test]
async fn test_favorites_flow() {
    let app = setup_app().await;

    // Empty list renders the page's own empty state
    let response = app
        .clone()
        .oneshot(test_request("GET", "/favorites"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("No favorites yet"));

    let response = app
        .clone()
        .oneshot(test_request("POST", "/api/dramas/94796/favorite"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["is_favorite"], true);

    let response = app
        .clone()
        .oneshot(test_request("GET", "/favorites"))
        .await
        .unwrap();
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Crash Landing on You"));
    assert!(html.contains(r#"data-endpoint="/api/favorites""#));

    // Case-insensitive search narrowing
    let response = app
        .clone()
        .oneshot(test_request("GET", "/favorites?q=CRASH"))
        .await
        .unwrap();
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Crash Landing on You"));

    let response = app
        .clone()
        .oneshot(test_request("GET", "/favorites?q=zzz"))
        .await
        .unwrap();
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("No dramas match your search."));

    // Clear-all reports the row count and empties the page
    let response = app
        .clone()
        .oneshot(test_request("DELETE", "/api/favorites"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["cleared"], 1);

    let response = app
        .oneshot(test_request("GET", "/favorites"))
        .await
        .unwrap();
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("No favorites yet"));
}

#[tokio::test]
async fn test_watched_page_follows_seen_flag() {
    let app = setup_app().await;

    app.clone()
        .oneshot(test_request("POST", "/api/dramas/110309/seen"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(test_request("GET", "/watched"))
        .await
        .unwrap();
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Alice in Borderland"));

    let response = app
        .oneshot(test_request("DELETE", "/api/watched"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["cleared"], 1);
}

#[tokio::test]
async fn test_best_page_ranks_top_scores() {
    let app = setup_app().await;

    for (id, score) in [(94796, 9), (67915, 8), (82505, 5)] {
        app.clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/dramas/{id}/score"),
                json!({"score": score}),
            ))
            .await
            .unwrap();
    }

    let response = app.oneshot(test_request("GET", "/best")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Crash Landing on You"));
    assert!(html.contains("Goblin"));
    // Score 5 sits below the top-rated threshold
    assert!(!html.contains("The Untamed"));
    assert!(html.contains("rank-1"));
    // Highest score listed first
    let first = html.find("Crash Landing on You").unwrap();
    let second = html.find("Goblin").unwrap();
    assert!(first < second);
}

// =============================================================================
// Sitemap and static assets
// =============================================================================

#[tokio::test]
async fn test_sitemap_lists_pages() {
    let app = setup_app().await;

    let response = app
        .oneshot(test_request("GET", "/sitemap.xml"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("application/xml"));

    let xml = extract_text(response.into_body()).await;
    assert!(xml.contains("<loc>http://localhost:5740/</loc>"));
    assert!(xml.contains("<loc>http://localhost:5740/best</loc>"));
}

#[tokio::test]
async fn test_static_assets_served_with_content_type() {
    let app = setup_app().await;

    for (uri, expected) in [
        ("/static/app.css", "text/css"),
        ("/static/board.js", "application/javascript"),
        ("/static/detail.js", "application/javascript"),
        ("/static/lists.js", "application/javascript"),
    ] {
        let response = app.clone().oneshot(test_request("GET", uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type.to_str().unwrap(), expected, "{uri}");
    }
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = setup_app().await;

    let response = app
        .oneshot(test_request("GET", "/no-such-page"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
