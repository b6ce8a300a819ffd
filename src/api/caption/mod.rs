// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Caption API endpoint module
//!
//! Provides POST /caption for captioning an uploaded or remote image.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::caption_handler;
pub use request::{CaptionUrlRequest, ImageSource};
pub use response::CaptionResponse;
