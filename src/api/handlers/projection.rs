/// Stateless projection handler
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;
use tracing::warn;

use super::AppState;
use crate::api::types::ApiResponse;
use crate::api::types::ProjectRequest;
use crate::api::types::ProjectResponse;
use crate::models::EmotionChannels;

/// Project scores as the first reading of a new user (POST /api/project)
pub async fn project_scores(
    State(state): State<AppState>,
    payload: Result<Json<ProjectRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse<ProjectResponse>>) {
    info!("POST /api/project");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejected(&rejection),
    };

    let projector = state.bot.projector();
    let channels =
        projector.update_emotion(&EmotionChannels::default(), &request.scores, true);
    (
        StatusCode::OK,
        Json(ApiResponse::success(ProjectResponse {
            point: projector.project(&channels),
        })),
    )
}

/// Wrap a body rejection in the response envelope
pub(crate) fn rejected<T>(rejection: &JsonRejection) -> (StatusCode, Json<ApiResponse<T>>) {
    warn!("Rejected request body: {}", rejection.body_text());
    (
        rejection.status(),
        Json(ApiResponse::error(format!(
            "Invalid request body: {}",
            rejection.body_text()
        ))),
    )
}
