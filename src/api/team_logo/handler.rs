// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Team logo description endpoint handlers

use axum::{extract::State, Json};

use super::request::{TeamLogoForm, TeamLogoSuggestionsForm};
use super::response::{TeamLogoDescriptionResponse, TeamLogoDescriptionsResponse};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// POST /team-logo-description - One description for a team logo
pub async fn team_logo_description_handler(
    State(state): State<AppState>,
    form: TeamLogoForm,
) -> Result<Json<TeamLogoDescriptionResponse>, ApiError> {
    let description = state
        .service
        .team_logo_description(form.image, &form.team_name)
        .await?;

    Ok(Json(TeamLogoDescriptionResponse { description }))
}

/// POST /team-logo-descriptions - `num_suggestions` descriptions (default 3)
pub async fn team_logo_descriptions_handler(
    State(state): State<AppState>,
    form: TeamLogoSuggestionsForm,
) -> Result<Json<TeamLogoDescriptionsResponse>, ApiError> {
    tracing::info!(
        "Generating {} descriptions for team {:?}",
        form.num_suggestions,
        form.team_name
    );

    let descriptions = state
        .service
        .team_logo_descriptions(form.image, &form.team_name, form.num_suggestions)
        .await?;

    Ok(Json(TeamLogoDescriptionsResponse { descriptions }))
}
