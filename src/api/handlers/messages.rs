/// Chat message handlers
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use tracing::info;

use super::projection::rejected;
use super::AppState;
use crate::api::types::ApiResponse;
use crate::bot::BotReply;
use crate::bot::IncomingMessage;

/// Deliver a chat message to the bot (POST /api/messages)
pub async fn post_message(
    State(state): State<AppState>,
    payload: Result<Json<IncomingMessage>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse<BotReply>>) {
    let start_time = std::time::Instant::now();
    let message = match payload {
        Ok(Json(message)) => message,
        Err(rejection) => return rejected(&rejection),
    };
    info!(
        "POST /api/messages conversation={} user={}",
        message.conversation_id, message.user_id
    );

    match state.bot.handle_message(&message).await {
        Ok(reply) => {
            info!(
                "POST /api/messages - {}ms",
                start_time.elapsed().as_millis()
            );
            (StatusCode::OK, Json(ApiResponse::success(reply)))
        }
        Err(e) => {
            error!("Failed to handle message: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Failed to handle message: {e}"))),
            )
        }
    }
}
