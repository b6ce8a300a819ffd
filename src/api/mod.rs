// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod caption;
pub mod errors;
pub mod handlers;
pub mod http_server;
pub mod process_text;
pub mod team_logo;
pub mod upload;

pub use caption::{caption_handler, CaptionResponse, CaptionUrlRequest, ImageSource};
pub use errors::{ApiError, ErrorResponse};
pub use handlers::{HealthResponse, MessageResponse};
pub use http_server::{build_cors_layer, create_app, start_server, AppState};
pub use process_text::{process_text_handler, ProcessTextRequest, ProcessTextResponse};
pub use team_logo::{
    team_logo_description_handler, team_logo_descriptions_handler, TeamLogoDescriptionResponse,
    TeamLogoDescriptionsResponse, TeamLogoForm, TeamLogoSuggestionsForm,
};
pub use upload::UploadForm;
