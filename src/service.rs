// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Captioning, text processing and team logo description operations
//!
//! Handlers call into `CaptionService`; model calls run on the blocking
//! pool so a slow inference never stalls the async runtime.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DEFAULT_CAPTION_PROMPT;
use crate::descriptions::{
    extract_key_elements, validate_count, DescriptionEngine, LOGO_CAPTION_MAX_LENGTH, LOGO_PROMPT,
};
use crate::inference::{
    ImageCaptioner, ModelManager, TextGenerator, DEFAULT_CAPTION_MAX_LENGTH,
    DEFAULT_TEXT_MAX_LENGTH,
};
use crate::vision::{decode_image_bytes, fetch_image, FetchError};

const CAPTION_CONTEXT: &str = "Error generating caption";
const DESCRIPTIONS_CONTEXT: &str = "Error generating team logo descriptions";
const TEXT_CONTEXT: &str = "Error processing text";

/// Failure of a service operation
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The image URL could not be fetched
    #[error("Error fetching image: {0}")]
    InputFetch(#[from] FetchError),

    /// Caller supplied an invalid argument
    #[error("{0}")]
    InvalidArgument(String),

    /// The model needed by the operation is not loaded
    #[error("{context}: {kind} model is not loaded")]
    ModelUnavailable {
        context: &'static str,
        kind: &'static str,
    },

    /// Decoding, inference or rendering failed
    #[error("{context}: {message}")]
    Processing {
        context: &'static str,
        message: String,
    },
}

impl ServiceError {
    fn processing(context: &'static str, err: anyhow::Error) -> Self {
        ServiceError::Processing {
            context,
            message: format!("{:#}", err),
        }
    }

    /// True for errors caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServiceError::InputFetch(_) | ServiceError::InvalidArgument(_)
        )
    }
}

/// Service operations shared by every handler
#[derive(Clone)]
pub struct CaptionService {
    models: ModelManager,
    engine: DescriptionEngine,
    http_client: Client,
    caption_prompt: String,
}

impl std::fmt::Debug for CaptionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionService")
            .field("models", &self.models)
            .field("caption_prompt", &self.caption_prompt)
            .finish_non_exhaustive()
    }
}

impl CaptionService {
    pub fn new(models: ModelManager, http_client: Client, caption_prompt: impl Into<String>) -> Self {
        Self {
            models,
            engine: DescriptionEngine::new(),
            http_client,
            caption_prompt: caption_prompt.into(),
        }
    }

    /// Service with the default caption prompt and a fresh HTTP client
    pub fn with_models(models: ModelManager) -> Self {
        Self::new(models, Client::new(), DEFAULT_CAPTION_PROMPT)
    }

    pub fn models(&self) -> &ModelManager {
        &self.models
    }

    fn captioner(&self, context: &'static str) -> Result<Arc<dyn ImageCaptioner>, ServiceError> {
        self.models
            .captioner()
            .ok_or(ServiceError::ModelUnavailable {
                context,
                kind: "caption",
            })
    }

    fn text_generator(&self) -> Result<Arc<dyn TextGenerator>, ServiceError> {
        self.models
            .text_generator()
            .ok_or(ServiceError::ModelUnavailable {
                context: TEXT_CONTEXT,
                kind: "text",
            })
    }

    /// Caption an uploaded image, conditioned on the configured prompt
    pub async fn caption_image(&self, bytes: Vec<u8>) -> Result<String, ServiceError> {
        let start = Instant::now();
        let captioner = self.captioner(CAPTION_CONTEXT)?;
        let prompt = Some(self.caption_prompt.clone());

        let caption = run_caption(captioner, bytes, prompt, DEFAULT_CAPTION_MAX_LENGTH)
            .await
            .map_err(|e| ServiceError::processing(CAPTION_CONTEXT, e))?;

        info!(
            "Processing time: {:.2} seconds",
            start.elapsed().as_secs_f64()
        );
        Ok(caption)
    }

    /// Fetch an image by URL and caption it without a prompt
    pub async fn caption_image_url(&self, url: &str) -> Result<String, ServiceError> {
        let start = Instant::now();
        let captioner = self.captioner(CAPTION_CONTEXT)?;

        let bytes = fetch_image(&self.http_client, url).await?;
        let caption = run_caption(captioner, bytes, None, DEFAULT_CAPTION_MAX_LENGTH)
            .await
            .map_err(|e| ServiceError::processing(CAPTION_CONTEXT, e))?;

        info!(
            "Processing time: {:.2} seconds",
            start.elapsed().as_secs_f64()
        );
        Ok(caption)
    }

    /// Caption a logo and render `count` team descriptions around it
    pub async fn team_logo_descriptions(
        &self,
        bytes: Vec<u8>,
        team_name: &str,
        count: i64,
    ) -> Result<Vec<String>, ServiceError> {
        let start = Instant::now();
        validate_count(count).map_err(|e| ServiceError::InvalidArgument(e.to_string()))?;
        let captioner = self.captioner(DESCRIPTIONS_CONTEXT)?;

        let basic_caption = run_caption(
            captioner,
            bytes,
            Some(LOGO_PROMPT.to_string()),
            LOGO_CAPTION_MAX_LENGTH,
        )
        .await
        .map_err(|e| ServiceError::processing(DESCRIPTIONS_CONTEXT, e))?;
        info!("basic caption: {}", basic_caption);

        let key_elements = extract_key_elements(&basic_caption, LOGO_PROMPT);
        info!("key elements after cleaning: {}", key_elements);

        let descriptions = self
            .engine
            .generate(&key_elements, team_name, count)
            .map_err(|e| ServiceError::processing(DESCRIPTIONS_CONTEXT, e.into()))?;

        info!(
            "Team logo descriptions processing time: {:.2} seconds",
            start.elapsed().as_secs_f64()
        );
        Ok(descriptions)
    }

    /// Single team description; the first of a one-element set
    pub async fn team_logo_description(
        &self,
        bytes: Vec<u8>,
        team_name: &str,
    ) -> Result<String, ServiceError> {
        let mut descriptions = self.team_logo_descriptions(bytes, team_name, 1).await?;
        descriptions
            .pop()
            .ok_or_else(|| ServiceError::Processing {
                context: DESCRIPTIONS_CONTEXT,
                message: "no description generated".to_string(),
            })
    }

    /// Run the text generator over `input_text`; empty input is valid
    pub async fn process_text(&self, input_text: String) -> Result<String, ServiceError> {
        let start = Instant::now();
        let generator = self.text_generator()?;

        let output = tokio::task::spawn_blocking(move || {
            generator.generate(&input_text, DEFAULT_TEXT_MAX_LENGTH)
        })
        .await
        .context("Text generation task failed")
        .and_then(|result| result)
        .map_err(|e| ServiceError::processing(TEXT_CONTEXT, e))?;

        debug!(
            "Text processing time: {:.2} seconds",
            start.elapsed().as_secs_f64()
        );
        Ok(output)
    }
}

/// Decode `bytes` and caption the image on the blocking pool
async fn run_caption(
    captioner: Arc<dyn ImageCaptioner>,
    bytes: Vec<u8>,
    prompt: Option<String>,
    max_length: usize,
) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || {
        let (image, info) = decode_image_bytes(&bytes)?;
        debug!(
            "Decoded {:?} image {}x{} ({} bytes)",
            info.format, info.width, info.height, info.size_bytes
        );
        captioner.caption(&image, prompt.as_deref(), max_length)
    })
    .await
    .context("Caption task failed")?
}
