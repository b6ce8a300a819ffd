// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Caption response types

use serde::{Deserialize, Serialize};

/// Response from image captioning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptionResponse {
    /// Generated caption
    pub caption: String,
}
