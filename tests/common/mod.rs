// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared helpers for endpoint tests: stub models, app construction and
//! hand-built multipart bodies.
#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response};
use axum::Router;
use image::{DynamicImage, ImageBuffer, Rgb};
use logo_caption_node::api::{create_app, AppState};
use logo_caption_node::inference::{ImageCaptioner, ModelManager, TextGenerator};
use logo_caption_node::service::CaptionService;
use std::io::Cursor;
use std::sync::Arc;

pub const BOUNDARY: &str = "----logo-caption-test-boundary";

/// Captioner that appends a fixed body to whatever prompt it was given
pub struct StubCaptioner {
    pub body: String,
}

impl StubCaptioner {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
        }
    }
}

impl ImageCaptioner for StubCaptioner {
    fn caption(
        &self,
        _image: &DynamicImage,
        prompt: Option<&str>,
        _max_length: usize,
    ) -> anyhow::Result<String> {
        Ok(match prompt {
            Some(p) => format!("{} {}", p, self.body).trim().to_string(),
            None => self.body.clone(),
        })
    }

    fn model_name(&self) -> &str {
        "stub-captioner"
    }
}

/// Captioner whose inference always fails
pub struct FailingCaptioner;

impl ImageCaptioner for FailingCaptioner {
    fn caption(
        &self,
        _image: &DynamicImage,
        _prompt: Option<&str>,
        _max_length: usize,
    ) -> anyhow::Result<String> {
        anyhow::bail!("inference backend exploded")
    }

    fn model_name(&self) -> &str {
        "failing-captioner"
    }
}

/// Generator that echoes its input with a prefix
pub struct StubGenerator;

impl TextGenerator for StubGenerator {
    fn generate(&self, input: &str, _max_length: usize) -> anyhow::Result<String> {
        Ok(format!("processed: {}", input))
    }

    fn model_name(&self) -> &str {
        "stub-generator"
    }
}

pub fn app_with(models: ModelManager) -> Router {
    let service = CaptionService::with_models(models);
    create_app(AppState::new(
        service,
        vec!["http://127.0.0.1:8000".to_string()],
    ))
}

/// App whose captioner describes every image as `caption_body`
pub fn test_app(caption_body: &str) -> Router {
    app_with(ModelManager::from_models(
        Some(Arc::new(StubCaptioner::new(caption_body))),
        Some(Arc::new(StubGenerator)),
    ))
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 128]));
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buffer, image::ImageFormat::Png)
        .expect("encode test png");
    buffer.into_inner()
}

/// One part of a multipart body
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Serve `/logo.png` (a PNG) and `/missing.png` (404) on an ephemeral port
///
/// Returns the base URL, e.g. `http://127.0.0.1:41234`.
pub async fn spawn_image_server() -> String {
    use axum::http::StatusCode;
    use axum::routing::get;

    let png = png_bytes(16, 16);
    let app = Router::new()
        .route(
            "/logo.png",
            get(move || {
                let png = png.clone();
                async move { ([(header::CONTENT_TYPE, "image/png")], png) }
            }),
        )
        .route("/missing.png", get(|| async { StatusCode::NOT_FOUND }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
