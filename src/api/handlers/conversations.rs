/// Conversation state handlers
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use super::AppState;
use crate::api::types::ApiResponse;
use crate::api::types::ConversationListResponse;
use crate::api::types::SeriesResponse;
use crate::conversation::ConversationState;
use crate::errors::MoodMapError;
use crate::projector::render_series;

/// List conversation ids (GET /api/conversations)
pub async fn list_conversations(
    State(state): State<AppState>,
) -> Json<ApiResponse<ConversationListResponse>> {
    info!("GET /api/conversations");
    Json(ApiResponse::success(ConversationListResponse {
        conversations: state.bot.store().conversation_ids(),
    }))
}

/// Get a conversation's state (GET /api/conversations/:id)
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse<ConversationState>>) {
    info!("GET /api/conversations/{}", id);

    match state.bot.store().snapshot(&id).await {
        Some(conversation) => (StatusCode::OK, Json(ApiResponse::success(conversation))),
        None => not_found(&id),
    }
}

/// Forget a conversation (DELETE /api/conversations/:id)
pub async fn delete_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse<String>>) {
    info!("DELETE /api/conversations/{}", id);

    if state.bot.store().remove(&id) {
        (StatusCode::OK, Json(ApiResponse::success(id)))
    } else {
        not_found(&id)
    }
}

/// Rendered series and scatter chart URL (GET /api/conversations/:id/series)
pub async fn get_series(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse<SeriesResponse>>) {
    info!("GET /api/conversations/{}/series", id);

    let Some(handle) = state.bot.store().get(&id) else {
        return not_found(&id);
    };
    let conversation = handle.lock().await;
    let response = SeriesResponse {
        conversation_id: id.clone(),
        series: render_series(&conversation.space),
        chart_url: state.bot.charts().scatter_url(&conversation.space).to_string(),
    };
    (StatusCode::OK, Json(ApiResponse::success(response)))
}

fn not_found<T>(id: &str) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error(
            MoodMapError::ConversationNotFound(id.to_string()).to_string(),
        )),
    )
}
