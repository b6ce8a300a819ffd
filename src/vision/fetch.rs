// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Remote image retrieval for URL-based captioning

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use super::image_utils::MAX_IMAGE_SIZE;

/// Failure to obtain the image bytes behind a URL
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{status} error for url: {url}")]
    Status { status: u16, url: String },

    #[error("image at {url} exceeds {max} bytes")]
    TooLarge { url: String, max: usize },
}

/// Download an image and return its raw bytes
///
/// Transport failures, non-2xx responses and bodies over
/// `MAX_IMAGE_SIZE` are all reported as `FetchError`; decoding is left to
/// the caller.
pub async fn fetch_image(client: &Client, url: &str) -> Result<Vec<u8>, FetchError> {
    fetch_image_with_limit(client, url, MAX_IMAGE_SIZE).await
}

/// `fetch_image` with an explicit body cap
pub async fn fetch_image_with_limit(
    client: &Client,
    url: &str,
    max_bytes: usize,
) -> Result<Vec<u8>, FetchError> {
    debug!("Fetching image from {}", url);

    let too_large = || FetchError::TooLarge {
        url: url.to_string(),
        max: max_bytes,
    };

    let mut response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    // Declared length first, then enforce the cap while streaming
    if let Some(length) = response.content_length() {
        if length > max_bytes as u64 {
            return Err(too_large());
        }
    }

    let mut bytes = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if bytes.len() + chunk.len() > max_bytes {
            return Err(too_large());
        }
        bytes.extend_from_slice(&chunk);
    }
    debug!("Fetched {} bytes from {}", bytes.len(), url);

    Ok(bytes)
}
