// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Caption request types and extraction

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use axum_extra::extract::Multipart;
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::upload::UploadForm;

/// JSON body for captioning a remote image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionUrlRequest {
    /// URL of the image to caption
    pub image_url: String,
}

impl CaptionUrlRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.image_url.trim().is_empty() {
            return Err(ApiError::ValidationError {
                field: "image_url".to_string(),
                message: "image_url must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Where the image to caption comes from
#[derive(Debug)]
pub enum ImageSource {
    /// Multipart upload
    Upload(Vec<u8>),
    /// JSON `{ "image_url": ... }`
    Url(String),
}

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim_start().starts_with("application/json"))
        .unwrap_or(false)
}

#[async_trait]
impl<S> FromRequest<S> for ImageSource
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(body) = Json::<CaptionUrlRequest>::from_request(req, state).await?;
            body.validate()?;
            return Ok(ImageSource::Url(body.image_url));
        }

        let multipart = Multipart::from_request(req, state).await?;
        let mut form = UploadForm::read(multipart).await?;
        Ok(ImageSource::Upload(form.require_file()?))
    }
}
