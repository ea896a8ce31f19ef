/// API request handlers
use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::api::types::ApiResponse;
use crate::api::types::HealthResponse;
use crate::bot::MoodBot;

pub mod conversations;
pub mod messages;
pub mod projection;

pub use conversations::*;
pub use messages::*;
pub use projection::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub bot: Arc<MoodBot>,
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        tone_provider: state.bot.tone().provider().to_string(),
        conversations: state.bot.store().len(),
    }))
}
