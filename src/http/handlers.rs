use super::socket;
use super::state::AppState;
use crate::completion::{generate_quiz, Quiz};
use crate::error::RelayResult;
use axum::{
    extract::{ws::WebSocketUpgrade, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

pub const WELCOME: &str = "Welcome to the Youtube Quizzer API!";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct QuizQuery {
    /// Video URL or id (defaults to the configured quiz video)
    pub video: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
/// Tutoring WebSocket when upgraded, welcome text otherwise
pub async fn root(State(state): State<AppState>, upgrade: Option<WebSocketUpgrade>) -> Response {
    match upgrade {
        Some(ws) => ws
            .on_upgrade(move |stream| socket::serve_connection(stream, state))
            .into_response(),
        None => (StatusCode::OK, WELCOME).into_response(),
    }
}

/// GET /quiz?video=<ref>
/// Generate a multiple-choice quiz from a video transcript
pub async fn get_quiz(
    State(state): State<AppState>,
    Query(query): Query<QuizQuery>,
) -> impl IntoResponse {
    let video = query
        .video
        .unwrap_or_else(|| state.default_quiz_video.clone());

    info!("Generating quiz for {}", video);

    match build_quiz(&state, &video).await {
        Ok(quiz) => (StatusCode::OK, Json(quiz)).into_response(),
        Err(e) => {
            error!("Failed to generate quiz: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    message: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn build_quiz(state: &AppState, video: &str) -> RelayResult<Quiz> {
    let segments = state.fetcher.fetch(video).await?;
    let transcript = state.condenser.condense(&segments)?;
    generate_quiz(state.provider.as_ref(), &state.quiz, &transcript).await
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
