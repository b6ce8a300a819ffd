// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /caption tests

use axum::http::StatusCode;
use logo_caption_node::inference::ModelManager;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use crate::common::{
    app_with, json_request, multipart_request, png_bytes, read_json, spawn_image_server, test_app,
    FailingCaptioner, Part,
};

#[tokio::test]
async fn test_caption_upload_uses_garden_prompt() {
    let png = png_bytes(16, 16);
    let request = multipart_request("/caption", &[Part::File("file", "garden.png", &png)]);

    let response = test_app("roses and tulips").oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        serde_json::json!({ "caption": "garden of roses and tulips" })
    );
}

#[tokio::test]
async fn test_caption_upload_any_file_field_name() {
    let png = png_bytes(16, 16);
    let request = multipart_request("/caption", &[Part::File("image", "garden.png", &png)]);

    let response = test_app("roses").oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["caption"], "garden of roses");
}

#[tokio::test]
async fn test_caption_unparseable_image_is_500() {
    let request = multipart_request(
        "/caption",
        &[Part::File("file", "notes.txt", b"this is not an image at all")],
    );

    let response = test_app("roses").oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = read_json(response).await;
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Error generating caption: "), "{}", detail);
    assert!(detail.contains("cannot identify image file"), "{}", detail);
}

#[tokio::test]
async fn test_caption_model_failure_is_500() {
    let app = app_with(ModelManager::from_models(Some(Arc::new(FailingCaptioner)), None));
    let png = png_bytes(8, 8);
    let request = multipart_request("/caption", &[Part::File("file", "a.png", &png)]);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await;
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("inference backend exploded"));
}

#[tokio::test]
async fn test_caption_without_model_is_500() {
    let png = png_bytes(8, 8);
    let request = multipart_request("/caption", &[Part::File("file", "a.png", &png)]);

    let response = app_with(ModelManager::default()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        read_json(response).await["detail"],
        "Error generating caption: caption model is not loaded"
    );
}

#[tokio::test]
async fn test_caption_missing_file_is_400() {
    let request = multipart_request("/caption", &[Part::Text("note", "no file here")]);

    let response = test_app("roses").oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_json(response).await["detail"]
        .as_str()
        .unwrap()
        .contains("file"));
}

#[tokio::test]
async fn test_caption_url_unreachable_is_400() {
    let request = json_request(
        "/caption",
        serde_json::json!({ "image_url": "http://127.0.0.1:9/logo.png" }),
    );

    let response = test_app("roses").oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Error fetching image: "));
}

#[tokio::test]
async fn test_caption_url_is_captioned_without_prompt() {
    let base = spawn_image_server().await;
    let request = json_request(
        "/caption",
        serde_json::json!({ "image_url": format!("{}/logo.png", base) }),
    );

    let response = test_app("roses").oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, serde_json::json!({ "caption": "roses" }));
}

#[tokio::test]
async fn test_caption_url_not_found_is_400() {
    let base = spawn_image_server().await;
    let url = format!("{}/missing.png", base);
    let request = json_request("/caption", serde_json::json!({ "image_url": url.clone() }));

    let response = test_app("roses").oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    let detail = body["detail"].as_str().unwrap();
    assert!(
        detail.starts_with("Error fetching image: 404 error for url:"),
        "{}",
        detail
    );
    assert!(detail.ends_with(&url), "{}", detail);
}

#[tokio::test]
async fn test_caption_url_missing_field_is_400() {
    let request = json_request("/caption", serde_json::json!({ "url": "http://x.test" }));

    let response = test_app("roses").oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
