// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Team logo description response types

use serde::{Deserialize, Serialize};

/// Response carrying a single description
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamLogoDescriptionResponse {
    pub description: String,
}

/// Response carrying `num_suggestions` descriptions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamLogoDescriptionsResponse {
    pub descriptions: Vec<String>,
}
