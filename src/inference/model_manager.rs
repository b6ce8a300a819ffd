// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Model manager for the captioning and text generation models

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use super::{ImageCaptioner, TextGenerator};
use crate::config::{RuntimeOptions, ServiceConfig};
use crate::text::T5Generator;
use crate::vision::blip::BlipCaptioner;

/// Configuration for loading models
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Path to the BLIP model directory (optional)
    pub caption_model_dir: Option<PathBuf>,
    /// Path to the flan-t5 model directory (optional)
    pub text_model_dir: Option<PathBuf>,
    /// ONNX Runtime execution settings
    pub runtime: RuntimeOptions,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            caption_model_dir: Some(PathBuf::from("./models/blip-image-captioning-large-onnx")),
            text_model_dir: Some(PathBuf::from("./models/flan-t5-large-onnx")),
            runtime: RuntimeOptions::default(),
        }
    }
}

impl From<&ServiceConfig> for ModelConfig {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            caption_model_dir: Some(config.caption_model_dir.clone()),
            text_model_dir: Some(config.text_model_dir.clone()),
            runtime: config.runtime_options(),
        }
    }
}

/// Information about a model slot
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    /// Model name
    pub name: String,
    /// Model kind (caption, text)
    pub kind: String,
    /// Whether the model is available
    pub available: bool,
}

/// Holds the process-wide captioner and text generator
///
/// Models are loaded once at startup and never mutated afterwards. A
/// model that fails to load is logged and left empty.
#[derive(Clone, Default)]
pub struct ModelManager {
    captioner: Option<Arc<dyn ImageCaptioner>>,
    text_generator: Option<Arc<dyn TextGenerator>>,
}

impl std::fmt::Debug for ModelManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelManager")
            .field("has_captioner", &self.has_captioner())
            .field("has_text_generator", &self.has_text_generator())
            .finish()
    }
}

impl ModelManager {
    /// Load every configured model
    ///
    /// Loading runs on the blocking pool since ONNX session creation is CPU bound.
    pub async fn new(config: ModelConfig) -> anyhow::Result<Self> {
        let runtime = config.runtime;

        let captioner: Option<Arc<dyn ImageCaptioner>> = match config.caption_model_dir {
            Some(dir) => {
                let dir_display = dir.display().to_string();
                match tokio::task::spawn_blocking(move || BlipCaptioner::new(&dir, runtime)).await? {
                    Ok(model) => {
                        tracing::info!("✅ BLIP caption model loaded from {}", dir_display);
                        Some(Arc::new(model))
                    }
                    Err(e) => {
                        tracing::warn!("⚠️ Failed to load caption model from {}: {:#}", dir_display, e);
                        None
                    }
                }
            }
            None => None,
        };

        let text_generator: Option<Arc<dyn TextGenerator>> = match config.text_model_dir {
            Some(dir) => {
                let dir_display = dir.display().to_string();
                match tokio::task::spawn_blocking(move || T5Generator::new(&dir, runtime)).await? {
                    Ok(model) => {
                        tracing::info!("✅ flan-t5 text model loaded from {}", dir_display);
                        Some(Arc::new(model))
                    }
                    Err(e) => {
                        tracing::warn!("⚠️ Failed to load text model from {}: {:#}", dir_display, e);
                        None
                    }
                }
            }
            None => None,
        };

        Ok(Self {
            captioner,
            text_generator,
        })
    }

    /// Build a manager from already constructed models
    pub fn from_models(
        captioner: Option<Arc<dyn ImageCaptioner>>,
        text_generator: Option<Arc<dyn TextGenerator>>,
    ) -> Self {
        Self {
            captioner,
            text_generator,
        }
    }

    pub fn captioner(&self) -> Option<Arc<dyn ImageCaptioner>> {
        self.captioner.clone()
    }

    pub fn text_generator(&self) -> Option<Arc<dyn TextGenerator>> {
        self.text_generator.clone()
    }

    pub fn has_captioner(&self) -> bool {
        self.captioner.is_some()
    }

    pub fn has_text_generator(&self) -> bool {
        self.text_generator.is_some()
    }

    /// List both model slots
    pub fn list_models(&self) -> Vec<ModelInfo> {
        vec![
            ModelInfo {
                name: self
                    .captioner
                    .as_ref()
                    .map(|m| m.model_name().to_string())
                    .unwrap_or_else(|| crate::vision::blip::BLIP_MODEL_NAME.to_string()),
                kind: "caption".to_string(),
                available: self.captioner.is_some(),
            },
            ModelInfo {
                name: self
                    .text_generator
                    .as_ref()
                    .map(|m| m.model_name().to_string())
                    .unwrap_or_else(|| crate::text::T5_MODEL_NAME.to_string()),
                kind: "text".to_string(),
                available: self.text_generator.is_some(),
            },
        ]
    }
}
