// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text generation backed by flan-t5

pub mod t5;

pub use t5::{T5Generator, T5_MODEL_NAME};
