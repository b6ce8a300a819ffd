// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! BLIP captioning pipeline
//!
//! Combines the vision encoder and the text decoder of an ONNX export of
//! `Salesforce/blip-image-captioning-large`.

use anyhow::{Context, Result};
use image::DynamicImage;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use super::decoder::BlipTextDecoder;
use super::encoder::BlipVisionEncoder;
use super::preprocessing::preprocess_for_blip;
use crate::config::RuntimeOptions;
use crate::inference::session::find_model_file;
use crate::inference::ImageCaptioner;

/// Model name reported in logs and health output
pub const BLIP_MODEL_NAME: &str = "blip-image-captioning-large";

/// BLIP image captioner
#[derive(Clone)]
pub struct BlipCaptioner {
    encoder: BlipVisionEncoder,
    decoder: BlipTextDecoder,
    model_dir: String,
}

impl std::fmt::Debug for BlipCaptioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlipCaptioner")
            .field("model_dir", &self.model_dir)
            .finish_non_exhaustive()
    }
}

impl BlipCaptioner {
    /// Load BLIP from `model_dir`
    ///
    /// Expected files (directly or under `onnx/`):
    /// - vision_model.onnx (or vision_encoder.onnx)
    /// - text_decoder_model.onnx (or text_decoder.onnx, decoder_model.onnx)
    /// - tokenizer.json
    pub fn new(model_dir: &Path, options: RuntimeOptions) -> Result<Self> {
        if !model_dir.exists() {
            anyhow::bail!("BLIP model directory not found: {}", model_dir.display());
        }

        info!("Loading BLIP captioning model from {}", model_dir.display());

        let encoder_path = find_model_file(
            model_dir,
            &["vision_model.onnx", "vision_encoder.onnx"],
        )?;
        let decoder_path = find_model_file(
            model_dir,
            &["text_decoder_model.onnx", "text_decoder.onnx", "decoder_model.onnx"],
        )?;
        let tokenizer_path = model_dir.join("tokenizer.json");

        let encoder =
            BlipVisionEncoder::new(&encoder_path, options).context("Failed to load BLIP vision encoder")?;
        let decoder = BlipTextDecoder::new(&decoder_path, &tokenizer_path, options)
            .context("Failed to load BLIP text decoder")?;

        info!("✅ BLIP captioning pipeline ready");

        Ok(Self {
            encoder,
            decoder,
            model_dir: model_dir.to_string_lossy().to_string(),
        })
    }
}

impl ImageCaptioner for BlipCaptioner {
    fn caption(
        &self,
        image: &DynamicImage,
        prompt: Option<&str>,
        max_length: usize,
    ) -> Result<String> {
        let start = Instant::now();

        let pixel_values = preprocess_for_blip(image);
        let image_embeds = self
            .encoder
            .encode(&pixel_values)
            .context("Failed to encode image")?;
        debug!("Image embeddings shape: {:?}", image_embeds.shape());

        let caption = self
            .decoder
            .generate(&image_embeds, prompt, max_length)
            .context("Failed to generate caption")?;

        debug!(
            "BLIP caption '{}' in {}ms",
            caption,
            start.elapsed().as_millis()
        );

        Ok(caption)
    }

    fn model_name(&self) -> &str {
        BLIP_MODEL_NAME
    }
}
