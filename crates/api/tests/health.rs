//! Integration tests for the health checks and the shared middleware stack.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, body_text, get, get_with_header};
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Health endpoints
// ---------------------------------------------------------------------------

#[tokio::test]
async fn liveness_answers_without_database() {
    let app = common::build_test_app(common::unreachable_pool());
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK, go!");
}

#[tokio::test]
async fn liveness_answers_head_requests() {
    let app = common::build_test_app(common::unreachable_pool());
    let request = Request::builder()
        .method(Method::HEAD)
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.is_empty());
}

#[tokio::test]
async fn readiness_is_503_when_database_is_unreachable() {
    let app = common::build_test_app(common::unreachable_pool());
    let response = get(app, "/health/ready").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["database"], "unreachable");
    assert!(json["version"].is_string());
}

#[sqlx::test(migrations = false)]
async fn readiness_is_ok_with_database(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health/ready").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["database"], "ok");
}

#[tokio::test]
async fn health_routes_are_not_nested_under_api_prefix() {
    let app = common::build_test_app(common::unreachable_pool());
    let response = get(app, "/api/v1/health").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app(common::unreachable_pool());
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Request id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn request_id_is_generated_when_absent() {
    let app = common::build_test_app(common::unreachable_pool());
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");

    // A UUID: 36 chars with hyphens.
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn client_request_id_is_echoed() {
    let app = common::build_test_app(common::unreachable_pool());
    let response = get_with_header(app, "/health", "x-request-id", "trace-me-123").await;

    assert_eq!(response.headers()["x-request-id"], "trace-me-123");
}

// ---------------------------------------------------------------------------
// CORS
// ---------------------------------------------------------------------------

async fn preflight(origin: &str) -> axum::http::Response<Body> {
    let app = common::build_test_app(common::unreachable_pool());
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/videos/1")
        .header("origin", origin)
        .header("access-control-request-method", "PATCH")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

#[tokio::test]
async fn preflight_from_configured_origin_allows_credentials() {
    let response = preflight("http://localhost:5173").await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:5173"
    );
    assert_eq!(headers["access-control-allow-credentials"], "true");
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(methods.contains("PATCH"), "{methods}");
}

#[tokio::test]
async fn preflight_from_unknown_origin_is_not_allowed() {
    let response = preflight("http://evil.test").await;

    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
