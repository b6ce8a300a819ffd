// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text processing response types

use serde::{Deserialize, Serialize};

/// Response from text processing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessTextResponse {
    /// Generated text
    pub output: String,
}
