// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /team-logo-description and /team-logo-descriptions tests

use axum::http::StatusCode;
use tower::ServiceExt; // for `oneshot`

use crate::common::{multipart_request, png_bytes, read_json, test_app, Part};

const DEFAULT_KEY_ELEMENTS: &str = "un emblème puissant";

fn assert_valid(description: &str, key: &str, team: &str) {
    assert!(
        description.contains(key) || description.contains(team),
        "description mentions neither key elements nor team: {}",
        description
    );
}

async fn descriptions(caption_body: &str, team: &str, count: Option<&str>) -> Vec<String> {
    let png = png_bytes(16, 16);
    let mut parts = vec![Part::Text("team_name", team), Part::File("file", "logo.png", &png)];
    if let Some(count) = count {
        parts.push(Part::Text("num_suggestions", count));
    }

    let response = test_app(caption_body)
        .oneshot(multipart_request("/team-logo-descriptions", &parts))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    body["descriptions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_descriptions_default_count() {
    let result = descriptions("a golden eagle", "Les Aigles", None).await;
    assert_eq!(result.len(), 3);
    for d in &result {
        assert_valid(d, "a golden eagle", "Les Aigles");
    }
}

#[tokio::test]
async fn test_descriptions_requested_counts() {
    for (raw, expected) in [("0", 0), ("1", 1), ("13", 13), ("25", 25)] {
        let result = descriptions("a golden eagle", "Les Aigles", Some(raw)).await;
        assert_eq!(result.len(), expected);
        for d in &result {
            assert_valid(d, "a golden eagle", "Les Aigles");
        }
    }
}

#[tokio::test]
async fn test_descriptions_short_caption_uses_default_phrase() {
    // The caption reduces to "[UNK]" once the prompt is stripped
    let result = descriptions("[UNK]", "Les Aigles", Some("6")).await;
    assert_eq!(result.len(), 6);
    for d in &result {
        assert!(d.contains(DEFAULT_KEY_ELEMENTS), "{}", d);
    }
}

#[tokio::test]
async fn test_descriptions_negative_count_is_400() {
    let png = png_bytes(16, 16);
    let request = multipart_request(
        "/team-logo-descriptions",
        &[
            Part::Text("team_name", "Les Aigles"),
            Part::File("file", "logo.png", &png),
            Part::Text("num_suggestions", "-1"),
        ],
    );

    let response = test_app("a golden eagle").oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_json(response).await["detail"]
        .as_str()
        .unwrap()
        .contains("num_suggestions"));
}

#[tokio::test]
async fn test_descriptions_non_integer_count_is_400() {
    let png = png_bytes(16, 16);
    let request = multipart_request(
        "/team-logo-descriptions",
        &[
            Part::Text("team_name", "Les Aigles"),
            Part::File("file", "logo.png", &png),
            Part::Text("num_suggestions", "three"),
        ],
    );

    let response = test_app("a golden eagle").oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_descriptions_missing_team_name_is_400() {
    let png = png_bytes(16, 16);
    let request = multipart_request(
        "/team-logo-descriptions",
        &[Part::File("file", "logo.png", &png)],
    );

    let response = test_app("a golden eagle").oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_descriptions_bad_image_is_500() {
    let request = multipart_request(
        "/team-logo-descriptions",
        &[
            Part::Text("team_name", "Les Aigles"),
            Part::File("file", "logo.png", b"garbage"),
        ],
    );

    let response = test_app("a golden eagle").oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(read_json(response).await["detail"]
        .as_str()
        .unwrap()
        .starts_with("Error generating team logo descriptions: "));
}

#[tokio::test]
async fn test_single_description() {
    let png = png_bytes(16, 16);
    let request = multipart_request(
        "/team-logo-description",
        &[
            Part::Text("team_name", "Les Aigles"),
            Part::File("file", "logo.png", &png),
        ],
    );

    let response = test_app("a golden eagle").oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    let description = body["description"].as_str().unwrap();
    assert_valid(description, "a golden eagle", "Les Aigles");
}

#[tokio::test]
async fn test_single_description_ignores_num_suggestions() {
    let png = png_bytes(16, 16);
    let request = multipart_request(
        "/team-logo-description",
        &[
            Part::Text("team_name", "Les Aigles"),
            Part::File("file", "logo.png", &png),
            Part::Text("num_suggestions", "garbage"),
        ],
    );

    let response = test_app("a golden eagle").oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(read_json(response).await["description"].is_string());
}

#[tokio::test]
async fn test_concurrent_requests_share_models() {
    let app = test_app("a golden eagle");
    let png = png_bytes(16, 16);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let app = app.clone();
            let count = (i % 4 + 1).to_string();
            let request = multipart_request(
                "/team-logo-descriptions",
                &[
                    Part::Text("team_name", "Les Aigles"),
                    Part::File("file", "logo.png", &png),
                    Part::Text("num_suggestions", &count),
                ],
            );
            tokio::spawn(async move {
                let response = app.oneshot(request).await.unwrap();
                (i % 4 + 1, response.status(), read_json(response).await)
            })
        })
        .collect();

    for result in futures::future::join_all(handles).await {
        let (expected, status, body) = result.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["descriptions"].as_array().unwrap().len(), expected);
    }
}
