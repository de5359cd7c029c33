use std::fs;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use budget_allocation::api::RouterOptions;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{app, app_with, post_raw, send};

#[tokio::test]
async fn health_reports_ok() {
    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .expect("request should build");
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let (status, body) = post_raw("/api/forecast-budget", "{\"year\": ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .expect("error message")
            .contains("invalid JSON")
    );

    let (status, _) = post_raw("/api/historical-budget", "[2023]").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_api_path_is_not_found_without_static_dir() {
    let request = Request::builder()
        .uri("/index.html")
        .body(Body::empty())
        .expect("request should build");
    let response = app().oneshot(request).await.expect("router is infallible");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn static_dir_serves_front_end_assets() {
    let dir = std::env::temp_dir().join(format!("budget-static-test-{}", Uuid::now_v7()));
    fs::create_dir_all(&dir).expect("temp dir should exist");
    fs::write(dir.join("index.html"), "<h1>budget</h1>").expect("asset should be written");

    let router = app_with(RouterOptions {
        static_dir: Some(dir.clone()),
        cors_allow_any: false,
    });
    let request = Request::builder()
        .uri("/index.html")
        .body(Body::empty())
        .expect("request should build");
    let response = router.oneshot(request).await.expect("router is infallible");
    assert_eq!(response.status(), StatusCode::OK);

    let _ = fs::remove_file(dir.join("index.html"));
    let _ = fs::remove_dir(&dir);
}

#[tokio::test]
async fn permissive_cors_allows_any_origin() {
    let router = app_with(RouterOptions {
        static_dir: None,
        cors_allow_any: true,
    });
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/forecast-budget")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .expect("request should build");
    let response = router.oneshot(request).await.expect("router is infallible");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
