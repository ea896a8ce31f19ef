//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create RESTful API router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Chat transport
        .route("/messages", post(handlers::post_message))
        // Conversation state
        .route("/conversations", get(handlers::list_conversations))
        .route(
            "/conversations/:id",
            get(handlers::get_conversation).delete(handlers::delete_conversation),
        )
        .route("/conversations/:id/series", get(handlers::get_series))
        // Stateless projection
        .route("/project", post(handlers::project_scores))
        .with_state(state)
}
