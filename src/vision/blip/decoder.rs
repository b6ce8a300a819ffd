// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! BLIP text decoder model
//!
//! Generates caption tokens from image embeddings, optionally continuing
//! a text prompt.

use anyhow::{Context, Result};
use ndarray::{Array2, Array3};
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::config::RuntimeOptions;
use crate::inference::session::argmax;
use crate::inference::{build_session, logits_at_last_position};

/// Decoder start token used by BLIP captioning (`[DEC]`)
pub const DEFAULT_BOS_TOKEN_ID: u32 = 30522;

/// End of caption (`[SEP]`)
pub const DEFAULT_SEP_TOKEN_ID: u32 = 102;

/// BLIP text decoder with its tokenizer
#[derive(Clone)]
pub struct BlipTextDecoder {
    /// ONNX Runtime session (thread-safe)
    session: Arc<Mutex<Session>>,
    /// BERT word-piece tokenizer
    tokenizer: Arc<Tokenizer>,
    /// Whether the export expects an explicit encoder attention mask
    takes_encoder_mask: bool,
    bos_token_id: u32,
    sep_token_id: u32,
}

impl std::fmt::Debug for BlipTextDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlipTextDecoder")
            .field("takes_encoder_mask", &self.takes_encoder_mask)
            .field("bos_token_id", &self.bos_token_id)
            .field("sep_token_id", &self.sep_token_id)
            .finish_non_exhaustive()
    }
}

impl BlipTextDecoder {
    /// Load the text decoder and tokenizer
    pub fn new(model_path: &Path, tokenizer_path: &Path, options: RuntimeOptions) -> Result<Self> {
        if !model_path.exists() {
            anyhow::bail!("BLIP text decoder not found: {}", model_path.display());
        }
        if !tokenizer_path.exists() {
            anyhow::bail!("BLIP tokenizer not found: {}", tokenizer_path.display());
        }

        info!("Loading BLIP text decoder from {}", model_path.display());

        let tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;

        let session = build_session(model_path, options)?;

        let input_names: Vec<_> = session.inputs.iter().map(|i| i.name.as_str()).collect();
        debug!("Decoder inputs: {:?}", input_names);
        let takes_encoder_mask = input_names.contains(&"encoder_attention_mask");

        let bos_token_id = tokenizer
            .token_to_id("[DEC]")
            .unwrap_or(DEFAULT_BOS_TOKEN_ID);
        let sep_token_id = tokenizer
            .token_to_id("[SEP]")
            .unwrap_or(DEFAULT_SEP_TOKEN_ID);

        debug!("Special tokens - BOS: {}, SEP: {}", bos_token_id, sep_token_id);

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            takes_encoder_mask,
            bos_token_id,
            sep_token_id,
        })
    }

    /// Initial decoder tokens: `[DEC]` followed by the prompt word pieces
    pub fn prompt_tokens(&self, prompt: Option<&str>) -> Result<Vec<u32>> {
        let mut tokens = vec![self.bos_token_id];

        if let Some(prompt_text) = prompt.filter(|p| !p.trim().is_empty()) {
            let encoding = self
                .tokenizer
                .encode(prompt_text, false)
                .map_err(|e| anyhow::anyhow!("Failed to encode prompt: {}", e))?;

            tokens.extend(
                encoding
                    .get_ids()
                    .iter()
                    .copied()
                    .filter(|&id| id != self.sep_token_id),
            );
            debug!("Prompt '{}' tokenized to {} tokens", prompt_text, tokens.len() - 1);
        }

        Ok(tokens)
    }

    /// Greedy generation until `[SEP]` or `max_length` total tokens
    pub fn generate(
        &self,
        image_embeds: &Array3<f32>,
        prompt: Option<&str>,
        max_length: usize,
    ) -> Result<String> {
        let mut tokens = self.prompt_tokens(prompt)?;

        while tokens.len() < max_length {
            let logits = self.forward(image_embeds, &tokens)?;
            let next_token = argmax(&logits)?;
            if next_token == self.sep_token_id {
                break;
            }
            tokens.push(next_token);
        }

        debug!("Generation complete: {} total tokens", tokens.len());

        let text = self
            .tokenizer
            .decode(&tokens, true)
            .map_err(|e| anyhow::anyhow!("Decoding failed: {}", e))?;

        Ok(text.trim().to_string())
    }

    /// Run a single forward pass and return the next-token logits
    fn forward(&self, image_embeds: &Array3<f32>, input_ids: &[u32]) -> Result<Vec<f32>> {
        let seq_len = input_ids.len();
        let ids: Vec<i64> = input_ids.iter().map(|&id| id as i64).collect();
        let input_ids_array =
            Array2::from_shape_vec((1, seq_len), ids).context("Failed to create input_ids array")?;
        let attention_mask = Array2::<i64>::ones((1, seq_len));
        let encoder_mask = Array2::<i64>::ones((1, image_embeds.shape()[1]));

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("BLIP decoder session lock poisoned"))?;

        let input_ids_value =
            Value::from_array(input_ids_array).context("Failed to create input_ids tensor")?;
        let attention_mask_value =
            Value::from_array(attention_mask).context("Failed to create attention mask tensor")?;
        let encoder_value = Value::from_array(image_embeds.to_owned())
            .context("Failed to create encoder hidden states tensor")?;

        let outputs = if self.takes_encoder_mask {
            let encoder_mask_value = Value::from_array(encoder_mask)
                .context("Failed to create encoder attention mask tensor")?;
            session
                .run(ort::inputs![
                    "input_ids" => input_ids_value,
                    "attention_mask" => attention_mask_value,
                    "encoder_hidden_states" => encoder_value,
                    "encoder_attention_mask" => encoder_mask_value
                ])
                .context("Text decoder inference failed")?
        } else {
            session
                .run(ort::inputs![
                    "input_ids" => input_ids_value,
                    "attention_mask" => attention_mask_value,
                    "encoder_hidden_states" => encoder_value
                ])
                .context("Text decoder inference failed")?
        };

        let output_tensor = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract logits tensor")?;

        let logits = logits_at_last_position(&output_tensor)?;
        Ok(logits)
    }
}
