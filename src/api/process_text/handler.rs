// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text processing endpoint handler

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};

use super::request::ProcessTextRequest;
use super::response::ProcessTextResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// POST /process-text - Run flan-t5 over `input_text`
pub async fn process_text_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProcessTextRequest>, JsonRejection>,
) -> Result<Json<ProcessTextResponse>, ApiError> {
    let Json(request) = payload?;
    let output = state.service.process_text(request.input_text).await?;

    Ok(Json(ProcessTextResponse { output }))
}
