// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::caption::caption_handler;
use super::handlers::{health_handler, hello_handler, root_handler};
use super::process_text::process_text_handler;
use super::team_logo::{team_logo_description_handler, team_logo_descriptions_handler};
use crate::config::ServiceConfig;
use crate::inference::ModelManager;
use crate::service::CaptionService;
use crate::vision::image_utils::MAX_IMAGE_SIZE;

/// Request body cap: the image limit plus room for the other form fields
const MAX_BODY_SIZE: usize = MAX_IMAGE_SIZE + 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CaptionService>,
    pub cors_allowed_origins: Vec<String>,
}

impl AppState {
    pub fn new(service: CaptionService, cors_allowed_origins: Vec<String>) -> Self {
        Self {
            service: Arc::new(service),
            cors_allowed_origins,
        }
    }
}

/// CORS for the configured origins, credentials allowed
///
/// Methods and headers mirror the preflight request, which is what a
/// wildcard means once credentials are enabled.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Build the router with every endpoint and the shared middleware
pub fn create_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.cors_allowed_origins);

    Router::new()
        .route("/", get(root_handler))
        .route("/hello/:name", get(hello_handler))
        .route("/health", get(health_handler))
        .route("/caption", post(caption_handler))
        .route("/process-text", post(process_text_handler))
        .route("/team-logo-description", post(team_logo_description_handler))
        .route("/team-logo-descriptions", post(team_logo_descriptions_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve the API until Ctrl+C
pub async fn start_server(config: &ServiceConfig, models: ModelManager) -> anyhow::Result<()> {
    let http_client = reqwest::Client::builder()
        .user_agent(format!("logo-caption-node/{}", crate::version::VERSION_NUMBER))
        .build()?;
    let service = CaptionService::new(models, http_client, config.caption_prompt.clone());
    let state = AppState::new(service, config.cors_allowed_origins.clone());
    let app = create_app(state);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
