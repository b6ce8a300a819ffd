// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Greeting, health and CORS tests

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use logo_caption_node::inference::ModelManager;
use tower::ServiceExt; // for `oneshot`

use crate::common::{app_with, get_request, read_json, test_app};

#[tokio::test]
async fn test_root_returns_hello_world() {
    let response = test_app("a lion").oneshot(get_request("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, serde_json::json!({ "message": "Hello World" }));
}

#[tokio::test]
async fn test_hello_name() {
    let response = test_app("a lion")
        .oneshot(get_request("/hello/Aigles"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["message"], "Hello Aigles");
}

#[tokio::test]
async fn test_health_reports_models() {
    let response = test_app("a lion").oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], logo_caption_node::version::VERSION);
    let features = body["features"].as_array().unwrap();
    assert_eq!(features.len(), logo_caption_node::version::FEATURES.len());
    assert!(features.iter().any(|f| f == "team-logo-descriptions"));
    let models = body["models"].as_array().unwrap();
    assert_eq!(models.len(), 2);
    assert!(models.iter().all(|m| m["available"] == true));
    assert_eq!(models[0]["name"], "stub-captioner");
}

#[tokio::test]
async fn test_health_without_models() {
    let response = app_with(ModelManager::default())
        .oneshot(get_request("/health"))
        .await
        .unwrap();
    let body = read_json(response).await;
    assert!(body["models"]
        .as_array()
        .unwrap()
        .iter()
        .all(|m| m["available"] == false));
}

#[tokio::test]
async fn test_cors_allows_configured_origin_with_credentials() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/caption")
        .header(header::ORIGIN, "http://127.0.0.1:8000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = test_app("a lion").oneshot(request).await.unwrap();
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://127.0.0.1:8000"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_cors_ignores_unknown_origin() {
    let request = Request::builder()
        .uri("/")
        .header(header::ORIGIN, "http://evil.test")
        .body(Body::empty())
        .unwrap();

    let response = test_app("a lion").oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = test_app("a lion")
        .oneshot(get_request("/nope"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
