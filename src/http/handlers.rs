use super::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct ParticipantInfo {
    pub name: String,
    pub session_id: Uuid,
    pub connected_at: DateTime<Utc>,
}

/// GET /participants
/// List currently registered participants
pub async fn list_participants(State(state): State<AppState>) -> impl IntoResponse {
    let participants: Vec<ParticipantInfo> = state
        .registry
        .snapshot()
        .await
        .into_iter()
        .map(|(name, entry)| ParticipantInfo {
            name,
            session_id: entry.session_id,
            connected_at: entry.connected_at,
        })
        .collect();

    (StatusCode::OK, Json(participants))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
