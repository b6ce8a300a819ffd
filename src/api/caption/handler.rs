// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Caption endpoint handler

use axum::{extract::State, Json};

use super::request::ImageSource;
use super::response::CaptionResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// POST /caption - Caption an image
///
/// Multipart uploads are captioned with the configured prompt; a JSON
/// `image_url` body is fetched and captioned without one.
pub async fn caption_handler(
    State(state): State<AppState>,
    source: ImageSource,
) -> Result<Json<CaptionResponse>, ApiError> {
    let caption = match source {
        ImageSource::Upload(bytes) => state.service.caption_image(bytes).await?,
        ImageSource::Url(url) => state.service.caption_image_url(&url).await?,
    };

    Ok(Json(CaptionResponse { caption }))
}
