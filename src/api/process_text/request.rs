// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text processing request types

use serde::{Deserialize, Serialize};

/// Request for text processing; an empty `input_text` is accepted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessTextRequest {
    pub input_text: String,
}
