// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod descriptions;
pub mod inference;
pub mod service;
pub mod text;
pub mod version;
pub mod vision;

pub use api::{create_app, start_server, AppState};
pub use config::ServiceConfig;
pub use descriptions::{DescriptionEngine, DescriptionError};
pub use inference::{ImageCaptioner, ModelConfig, ModelManager, TextGenerator};
pub use service::{CaptionService, ServiceError};
