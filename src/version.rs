// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the logo caption node

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-team-logo-descriptions-2025-10-19";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2025-10-19";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "blip-captioning",
    "caption-by-url",
    "caption-by-upload",
    "flan-t5-text-generation",
    "team-logo-descriptions",
];

/// Get the full version string
pub fn get_version_string() -> String {
    format!("{} ({})", VERSION, BUILD_DATE)
}
