// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration
//!
//! Every setting can be passed as a flag or through the environment.
//! `main` loads a `.env` file before parsing.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default conditioning prompt for uploaded image captions
pub const DEFAULT_CAPTION_PROMPT: &str = "garden of";

/// Runtime configuration for the caption node
#[derive(Parser, Debug, Clone)]
#[command(name = "logo-caption-node")]
#[command(about = "HTTP service for image captioning, text generation and team logo descriptions", long_about = None)]
pub struct ServiceConfig {
    /// Address to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Directory holding the BLIP ONNX export (vision + text decoder + tokenizer.json)
    #[arg(
        long,
        env = "CAPTION_MODEL_DIR",
        default_value = "./models/blip-image-captioning-large-onnx"
    )]
    pub caption_model_dir: PathBuf,

    /// Directory holding the flan-t5 ONNX export (encoder + decoder + tokenizer.json)
    #[arg(long, env = "TEXT_MODEL_DIR", default_value = "./models/flan-t5-large-onnx")]
    pub text_model_dir: PathBuf,

    /// Comma-separated list of origins allowed by CORS
    #[arg(
        long,
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://127.0.0.1:8000"
    )]
    pub cors_allowed_origins: Vec<String>,

    /// Prompt used to condition captions of uploaded images
    #[arg(long, env = "CAPTION_PROMPT", default_value = DEFAULT_CAPTION_PROMPT)]
    pub caption_prompt: String,

    /// Try the CUDA execution provider before falling back to CPU
    #[arg(long, env = "USE_CUDA", default_value_t = false)]
    pub use_cuda: bool,

    /// ONNX Runtime intra-op thread count
    #[arg(long, env = "INTRA_THREADS", default_value_t = 4)]
    pub intra_threads: usize,
}

impl ServiceConfig {
    /// Socket address built from host and port
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port)
            .parse::<SocketAddr>()
            .map_err(|e| anyhow::anyhow!("Invalid bind address {}:{}: {}", self.host, self.port, e))?;
        Ok(addr)
    }

    /// Runtime options shared by every ONNX session
    pub fn runtime_options(&self) -> RuntimeOptions {
        RuntimeOptions {
            use_cuda: self.use_cuda,
            intra_threads: self.intra_threads,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            caption_model_dir: PathBuf::from("./models/blip-image-captioning-large-onnx"),
            text_model_dir: PathBuf::from("./models/flan-t5-large-onnx"),
            cors_allowed_origins: vec!["http://127.0.0.1:8000".to_string()],
            caption_prompt: DEFAULT_CAPTION_PROMPT.to_string(),
            use_cuda: false,
            intra_threads: 4,
        }
    }
}

/// Execution settings for ONNX Runtime sessions
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    pub use_cuda: bool,
    pub intra_threads: usize,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            use_cuda: false,
            intra_threads: 4,
        }
    }
}
