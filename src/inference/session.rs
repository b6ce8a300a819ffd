// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ONNX Runtime session helpers shared by the caption and text models

use anyhow::{Context, Result};
use ndarray::{ArrayViewD, IxDyn};
use ort::execution_providers::{CPUExecutionProvider, CUDAExecutionProvider};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::RuntimeOptions;

/// Build an ONNX Runtime session for `model_path`
///
/// With `use_cuda` set, CUDA is tried first and the CPU provider is used
/// when CUDA cannot be initialised.
pub fn build_session(model_path: &Path, options: RuntimeOptions) -> Result<Session> {
    if !model_path.exists() {
        anyhow::bail!("ONNX model file not found: {}", model_path.display());
    }

    if options.use_cuda {
        info!("   Attempting CUDA execution provider for {}", model_path.display());
        let cuda_result = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CUDAExecutionProvider::default().build()])
            .context("Failed to set CUDA execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(options.intra_threads)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path);

        match cuda_result {
            Ok(session) => {
                info!("✅ CUDA execution provider initialized");
                return Ok(session);
            }
            Err(e) => {
                warn!("⚠️  CUDA execution provider failed: {}", e);
                warn!("   Falling back to CPU execution provider");
            }
        }
    }

    Session::builder()
        .context("Failed to create session builder")?
        .with_execution_providers([CPUExecutionProvider::default().build()])
        .context("Failed to set CPU execution provider")?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .context("Failed to set optimization level")?
        .with_intra_threads(options.intra_threads)
        .context("Failed to set intra threads")?
        .commit_from_file(model_path)
        .context(format!(
            "Failed to load ONNX model from {}",
            model_path.display()
        ))
}

/// Find a model file by trying multiple possible names
pub fn find_model_file(dir: &Path, names: &[&str]) -> Result<PathBuf> {
    for name in names {
        let path = dir.join(name);
        if path.exists() {
            return Ok(path);
        }
        let nested = dir.join("onnx").join(name);
        if nested.exists() {
            return Ok(nested);
        }
    }
    anyhow::bail!(
        "Model file not found in {}. Tried: {:?}",
        dir.display(),
        names
    );
}

/// Extract the logits of the last sequence position
///
/// Accepts `[batch, seq_len, vocab]` or `[seq_len, vocab]` decoder output.
pub fn logits_at_last_position(output: &ArrayViewD<'_, f32>) -> Result<Vec<f32>> {
    let shape = output.shape();
    let logits = match shape.len() {
        3 => {
            let last_pos = shape[1].checked_sub(1).context("Decoder output has no positions")?;
            (0..shape[2])
                .map(|v| output[IxDyn(&[0, last_pos, v])])
                .collect()
        }
        2 => {
            let last_pos = shape[0].checked_sub(1).context("Decoder output has no positions")?;
            (0..shape[1]).map(|v| output[IxDyn(&[last_pos, v])]).collect()
        }
        _ => anyhow::bail!("Unexpected decoder output shape: {:?}", shape),
    };
    Ok(logits)
}

/// Greedy decoding: index of the highest logit
pub fn argmax(logits: &[f32]) -> Result<u32> {
    let (max_idx, _) = logits
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .ok_or_else(|| anyhow::anyhow!("Empty logits vector"))?;
    Ok(max_idx as u32)
}
