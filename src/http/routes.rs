use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Welcome text, or the tutoring WebSocket on upgrade
        .route("/", get(handlers::root))
        // Health check
        .route("/health", get(handlers::health_check))
        // Quiz generation
        .route("/quiz", get(handlers::get_quiz))
        // Browser clients are served from another origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
