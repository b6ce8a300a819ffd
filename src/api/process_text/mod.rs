// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text processing API endpoint module
//!
//! Provides POST /process-text for flan-t5 text generation.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::process_text_handler;
pub use request::ProcessTextRequest;
pub use response::ProcessTextResponse;
