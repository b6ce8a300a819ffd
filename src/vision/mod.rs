// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing module
//!
//! This module provides:
//! - Image loading from uploads and URLs
//! - Image captioning via BLIP

pub mod blip;
pub mod fetch;
pub mod image_utils;

pub use fetch::{fetch_image, FetchError};
pub use image_utils::{decode_image_bytes, detect_format, ImageError, ImageInfo};
