// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::http_server::AppState;
use crate::inference::ModelInfo;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub features: Vec<String>,
    pub models: Vec<ModelInfo>,
}

/// GET / - liveness greeting
pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello World".to_string(),
    })
}

/// GET /hello/:name
pub async fn hello_handler(Path(name): Path<String>) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: format!("Hello {}", name),
    })
}

/// GET /health - version and model availability
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::version::VERSION.to_string(),
        features: crate::version::FEATURES
            .iter()
            .map(|f| f.to_string())
            .collect(),
        models: state.service.models().list_models(),
    })
}
