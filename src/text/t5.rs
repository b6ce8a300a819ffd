// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! flan-t5 encoder-decoder text generation over ONNX Runtime

use anyhow::{Context, Result};
use ndarray::{Array2, Array3, Ix3};
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::config::RuntimeOptions;
use crate::inference::session::{argmax, find_model_file};
use crate::inference::{build_session, logits_at_last_position, TextGenerator};

/// Model name reported in logs and health output
pub const T5_MODEL_NAME: &str = "flan-t5-large";

/// T5 starts decoding from the pad token
pub const DECODER_START_TOKEN_ID: u32 = 0;

/// `</s>`
pub const DEFAULT_EOS_TOKEN_ID: u32 = 1;

/// flan-t5 text generator
#[derive(Clone)]
pub struct T5Generator {
    encoder: Arc<Mutex<Session>>,
    decoder: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    eos_token_id: u32,
    model_dir: String,
}

impl std::fmt::Debug for T5Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("T5Generator")
            .field("model_dir", &self.model_dir)
            .field("eos_token_id", &self.eos_token_id)
            .finish_non_exhaustive()
    }
}

impl T5Generator {
    /// Load flan-t5 from `model_dir`
    ///
    /// Expected files (directly or under `onnx/`):
    /// - encoder_model.onnx
    /// - decoder_model.onnx
    /// - tokenizer.json
    pub fn new(model_dir: &Path, options: RuntimeOptions) -> Result<Self> {
        if !model_dir.exists() {
            anyhow::bail!("T5 model directory not found: {}", model_dir.display());
        }

        info!("Loading flan-t5 text model from {}", model_dir.display());

        let encoder_path = find_model_file(model_dir, &["encoder_model.onnx", "encoder.onnx"])?;
        let decoder_path = find_model_file(model_dir, &["decoder_model.onnx", "decoder.onnx"])?;
        let tokenizer_path = model_dir.join("tokenizer.json");
        if !tokenizer_path.exists() {
            anyhow::bail!("T5 tokenizer not found: {}", tokenizer_path.display());
        }

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;
        let eos_token_id = tokenizer.token_to_id("</s>").unwrap_or(DEFAULT_EOS_TOKEN_ID);

        let encoder = build_session(&encoder_path, options).context("Failed to load T5 encoder")?;
        let decoder = build_session(&decoder_path, options).context("Failed to load T5 decoder")?;

        info!("✅ flan-t5 text model ready");

        Ok(Self {
            encoder: Arc::new(Mutex::new(encoder)),
            decoder: Arc::new(Mutex::new(decoder)),
            tokenizer: Arc::new(tokenizer),
            eos_token_id,
            model_dir: model_dir.to_string_lossy().to_string(),
        })
    }

    /// Tokenize the input, `</s>` appended by the tokenizer post-processor
    fn encode_input(&self, input: &str) -> Result<Vec<i64>> {
        let encoding = self
            .tokenizer
            .encode(input, true)
            .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

        let mut ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        if ids.last() != Some(&(self.eos_token_id as i64)) {
            ids.push(self.eos_token_id as i64);
        }
        Ok(ids)
    }

    fn run_encoder(&self, input_ids: &[i64]) -> Result<Array3<f32>> {
        let len = input_ids.len();
        let ids = Array2::from_shape_vec((1, len), input_ids.to_vec())
            .context("Failed to create input_ids array")?;
        let mask = Array2::<i64>::ones((1, len));

        let mut session = self
            .encoder
            .lock()
            .map_err(|_| anyhow::anyhow!("T5 encoder session lock poisoned"))?;

        let outputs = session
            .run(ort::inputs![
                "input_ids" => Value::from_array(ids)?,
                "attention_mask" => Value::from_array(mask)?
            ])
            .context("Encoder inference failed")?;

        let hidden = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract encoder hidden states")?
            .to_owned()
            .into_dimensionality::<Ix3>()
            .context("Unexpected encoder output rank")?;

        Ok(hidden)
    }

    fn decoder_logits(&self, hidden: &Array3<f32>, decoder_ids: &[u32]) -> Result<Vec<f32>> {
        let ids: Vec<i64> = decoder_ids.iter().map(|&id| id as i64).collect();
        let ids = Array2::from_shape_vec((1, ids.len()), ids)
            .context("Failed to create decoder input_ids array")?;
        let encoder_mask = Array2::<i64>::ones((1, hidden.shape()[1]));

        let mut session = self
            .decoder
            .lock()
            .map_err(|_| anyhow::anyhow!("T5 decoder session lock poisoned"))?;

        let outputs = session
            .run(ort::inputs![
                "encoder_attention_mask" => Value::from_array(encoder_mask)?,
                "input_ids" => Value::from_array(ids)?,
                "encoder_hidden_states" => Value::from_array(hidden.to_owned())?
            ])
            .context("Decoder inference failed")?;

        let output_tensor = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract logits tensor")?;

        let logits = logits_at_last_position(&output_tensor)?;
        Ok(logits)
    }
}

impl TextGenerator for T5Generator {
    fn generate(&self, input: &str, max_length: usize) -> Result<String> {
        let start = Instant::now();

        let input_ids = self.encode_input(input)?;
        let hidden = self.run_encoder(&input_ids)?;

        let mut tokens = vec![DECODER_START_TOKEN_ID];
        while tokens.len() < max_length {
            let logits = self.decoder_logits(&hidden, &tokens)?;
            let next_token = argmax(&logits)?;
            tokens.push(next_token);
            if next_token == self.eos_token_id {
                break;
            }
        }

        let text = self
            .tokenizer
            .decode(&tokens, true)
            .map_err(|e| anyhow::anyhow!("Decoding failed: {}", e))?;

        debug!(
            "flan-t5 generated {} tokens in {}ms",
            tokens.len(),
            start.elapsed().as_millis()
        );

        Ok(text.trim().to_string())
    }

    fn model_name(&self) -> &str {
        T5_MODEL_NAME
    }
}
