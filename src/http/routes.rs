use super::state::AppState;
use super::{handlers, ws};
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Participant relay connections
        .route("/ws", get(ws::chatroom_ws))
        // Operational queries
        .route("/participants", get(handlers::list_participants))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
