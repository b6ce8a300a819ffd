// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! BLIP vision encoder model
//!
//! Extracts image embeddings that condition the BLIP text decoder.

use anyhow::{Context, Result};
use ndarray::{Array3, Array4, Ix3};
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use super::preprocessing::BLIP_INPUT_SIZE;
use crate::config::RuntimeOptions;
use crate::inference::build_session;

/// BLIP vision encoder
#[derive(Clone)]
pub struct BlipVisionEncoder {
    /// ONNX Runtime session (thread-safe)
    session: Arc<Mutex<Session>>,
    /// Model input name
    input_name: String,
}

impl std::fmt::Debug for BlipVisionEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlipVisionEncoder")
            .field("input_name", &self.input_name)
            .finish_non_exhaustive()
    }
}

impl BlipVisionEncoder {
    /// Load the vision encoder from an ONNX file
    pub fn new(model_path: &Path, options: RuntimeOptions) -> Result<Self> {
        if !model_path.exists() {
            anyhow::bail!("BLIP vision model not found: {}", model_path.display());
        }

        info!("Loading BLIP vision encoder from {}", model_path.display());
        let session = build_session(model_path, options)?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .unwrap_or_else(|| "pixel_values".to_string());

        debug!("BLIP vision encoder input: {}", input_name);

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
        })
    }

    /// Encode a preprocessed image tensor `[1, 3, 384, 384]`
    ///
    /// Returns image embeddings of shape `[1, seq_len, hidden]`.
    pub fn encode(&self, pixel_values: &Array4<f32>) -> Result<Array3<f32>> {
        let shape = pixel_values.shape();
        if shape.len() != 4 || shape[0] != 1 || shape[1] != 3 {
            anyhow::bail!("Invalid input shape: {:?}, expected [1, 3, H, W]", shape);
        }
        if shape[2] != BLIP_INPUT_SIZE as usize || shape[3] != BLIP_INPUT_SIZE as usize {
            debug!(
                "Input size {}x{} differs from expected {}x{}",
                shape[2], shape[3], BLIP_INPUT_SIZE, BLIP_INPUT_SIZE
            );
        }

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("BLIP vision session lock poisoned"))?;

        let input_value =
            Value::from_array(pixel_values.to_owned()).context("Failed to create input tensor")?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input_value])
            .context("Vision encoder inference failed")?;

        let output_tensor = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract image embeddings")?;
        debug!("Vision encoder output shape: {:?}", output_tensor.shape());

        let embeddings = output_tensor
            .to_owned()
            .into_dimensionality::<Ix3>()
            .context("Unexpected vision encoder output rank")?;

        Ok(embeddings)
    }
}
