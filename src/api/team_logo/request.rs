// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Team logo form parsing and validation

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum_extra::extract::Multipart;

use crate::api::errors::ApiError;
use crate::api::upload::UploadForm;
use crate::descriptions::DEFAULT_NUM_SUGGESTIONS;

pub const TEAM_NAME_FIELD: &str = "team_name";
pub const NUM_SUGGESTIONS_FIELD: &str = "num_suggestions";

/// Multipart form for POST /team-logo-description
///
/// Fields other than `team_name` and the file are ignored.
#[derive(Debug)]
pub struct TeamLogoForm {
    pub team_name: String,
    pub image: Vec<u8>,
}

impl TeamLogoForm {
    pub fn from_upload(form: &mut UploadForm) -> Result<Self, ApiError> {
        let team_name = form.require_text(TEAM_NAME_FIELD)?;
        let image = form.require_file()?;

        Ok(Self { team_name, image })
    }
}

/// Multipart form for POST /team-logo-descriptions
#[derive(Debug)]
pub struct TeamLogoSuggestionsForm {
    pub team_name: String,
    pub image: Vec<u8>,
    pub num_suggestions: i64,
}

impl TeamLogoSuggestionsForm {
    pub fn from_upload(form: &mut UploadForm) -> Result<Self, ApiError> {
        let TeamLogoForm { team_name, image } = TeamLogoForm::from_upload(form)?;
        let num_suggestions = form.int_or(NUM_SUGGESTIONS_FIELD, DEFAULT_NUM_SUGGESTIONS)?;

        Ok(Self {
            team_name,
            image,
            num_suggestions,
        })
    }
}

async fn read_upload<S>(req: Request, state: &S) -> Result<UploadForm, ApiError>
where
    S: Send + Sync,
{
    let multipart = Multipart::from_request(req, state).await?;
    UploadForm::read(multipart).await
}

#[async_trait]
impl<S> FromRequest<S> for TeamLogoForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut form = read_upload(req, state).await?;
        Self::from_upload(&mut form)
    }
}

#[async_trait]
impl<S> FromRequest<S> for TeamLogoSuggestionsForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut form = read_upload(req, state).await?;
        Self::from_upload(&mut form)
    }
}
