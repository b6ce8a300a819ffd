// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! BLIP integration for image captioning
//!
//! Components:
//! - `encoder` - Vision encoder for image feature extraction
//! - `decoder` - Text decoder for caption generation
//! - `model` - Combined BLIP pipeline
//! - `preprocessing` - Image preprocessing for encoder input

pub mod decoder;
pub mod encoder;
pub mod model;
pub mod preprocessing;

pub use decoder::BlipTextDecoder;
pub use encoder::BlipVisionEncoder;
pub use model::{BlipCaptioner, BLIP_MODEL_NAME};
