// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Model seams for captioning and text generation
//!
//! Both models are loaded once at startup and shared read-only across
//! requests. Calls are synchronous; the HTTP layer runs them on the
//! blocking thread pool.

pub mod model_manager;
pub mod session;

use image::DynamicImage;

pub use model_manager::{ModelConfig, ModelInfo, ModelManager};
pub use session::{build_session, logits_at_last_position};

/// Default total token budget for a caption (prompt included)
pub const DEFAULT_CAPTION_MAX_LENGTH: usize = 20;

/// Default token budget for generated text
pub const DEFAULT_TEXT_MAX_LENGTH: usize = 20;

/// Generates a natural-language caption for an image
pub trait ImageCaptioner: Send + Sync {
    /// Caption `image`, optionally conditioned on `prompt`.
    ///
    /// Conditioned captions start with the prompt text. `max_length`
    /// bounds the total token count, prompt included.
    fn caption(
        &self,
        image: &DynamicImage,
        prompt: Option<&str>,
        max_length: usize,
    ) -> anyhow::Result<String>;

    /// Model identifier used in logs and health output
    fn model_name(&self) -> &str;
}

/// Generates text from input text
pub trait TextGenerator: Send + Sync {
    /// Generate a response for `input`. Empty input is valid.
    fn generate(&self, input: &str, max_length: usize) -> anyhow::Result<String>;

    /// Model identifier used in logs and health output
    fn model_name(&self) -> &str;
}
