use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Call flow webhooks
        .route("/voice", post(handlers::entry))
        .route("/voice/menu", post(handlers::menu))
        .route("/voice/transcription", post(handlers::transcription))
        .route("/voice/:department", post(handlers::department_intro))
        .route("/voice/:department/:step", post(handlers::collect_step))
        // Session queries
        .route("/calls/:call_sid", get(handlers::get_call))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
