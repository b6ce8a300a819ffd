// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Team logo description API endpoint module
//!
//! Provides POST /team-logo-description and POST /team-logo-descriptions.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{team_logo_description_handler, team_logo_descriptions_handler};
pub use request::{TeamLogoForm, TeamLogoSuggestionsForm};
pub use response::{TeamLogoDescriptionResponse, TeamLogoDescriptionsResponse};
