//! API request and response types

use serde::Deserialize;
use serde::Serialize;

use crate::models::EmotionScores;
use crate::models::MoodPoint;

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub tone_provider: String,
    pub conversations: usize,
}

/// Conversation ids
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversationListResponse {
    pub conversations: Vec<String>,
}

/// Rendered series of a conversation
#[derive(Debug, Serialize, Deserialize)]
pub struct SeriesResponse {
    pub conversation_id: String,
    pub series: String,
    pub chart_url: String,
}

/// Projection request
#[derive(Debug, Deserialize)]
pub struct ProjectRequest {
    #[serde(default)]
    pub scores: EmotionScores,
}

/// Point of a fresh user for the given scores
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub point: MoodPoint,
}
