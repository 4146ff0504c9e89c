pub mod tracker;

pub use tracker::MessageTracker;

use serde::{Deserialize, Serialize};

/// Normalized transcript event fanned out to every participant in the room.
///
/// Serialized unchanged as the JSON text frame delivered to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEvent {
    /// Participant the speech belongs to.
    pub user: String,
    /// Transcribed text (never empty).
    pub message: String,
    /// Stable across interim revisions of one utterance.
    pub message_id: u64,
    #[serde(rename = "final")]
    pub is_final: bool,
}
