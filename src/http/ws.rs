use super::state::AppState;
use crate::relay::RelaySession;
use axum::{
    extract::{Query, State, WebSocketUpgrade},
    response::IntoResponse,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WsParams {
    /// Room-scoped identity; not validated, not unique.
    pub name: Option<String>,
}

/// GET /ws?name=<participant>
/// Upgrade to a WebSocket and run the relay session for this participant
pub async fn chatroom_ws(
    State(state): State<AppState>,
    Query(params): Query<WsParams>,
    upgrade: WebSocketUpgrade,
) -> impl IntoResponse {
    let name = params.name.unwrap_or_else(|| "Guest".to_string());

    upgrade.on_upgrade(move |socket| {
        RelaySession::new(
            name,
            state.registry.clone(),
            state.bus.clone(),
            state.engine.clone(),
            state.room_channel.clone(),
        )
        .run(socket)
    })
}
