use std::sync::Arc;

use crate::bus::RoomBus;
use crate::config::{Config, EngineConfig};
use crate::registry::ParticipantRegistry;

/// Shared application state for HTTP handlers and relay sessions.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ParticipantRegistry>,
    pub bus: Arc<RoomBus>,
    pub engine: Arc<EngineConfig>,
    /// Broadcast channel name for the (single) room in scope.
    pub room_channel: String,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            registry: Arc::new(ParticipantRegistry::new()),
            bus: Arc::new(RoomBus::new(config.room.buffer)),
            engine: Arc::new(config.engine.clone()),
            room_channel: config.room.channel.clone(),
        }
    }
}
