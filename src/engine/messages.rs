use serde::{Deserialize, Serialize};

/// `message_type` value the engine uses to mark a final transcript; any
/// other value (or none) marks an interim revision.
pub const FINAL_TRANSCRIPT: &str = "FinalTranscript";

/// Framed audio chunk sent upstream.
#[derive(Debug, Serialize, Deserialize)]
pub struct AudioFrame {
    /// Base64-encoded audio bytes
    pub audio_data: String,
}

/// Raw message shape received from the engine.
///
/// The engine also sends session bookkeeping messages (handshake, close
/// notices) without text; those decode with `text: None` and are skipped.
#[derive(Debug, Deserialize)]
pub struct EngineMessage {
    #[serde(default)]
    pub message_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl EngineMessage {
    /// Convert into an event, dropping messages without text.
    pub fn into_event(self) -> Option<RawTranscriptEvent> {
        match self.text {
            Some(text) if !text.is_empty() => Some(RawTranscriptEvent {
                text,
                message_type: self.message_type,
            }),
            _ => None,
        }
    }
}

/// A transcription result carrying non-empty text.
#[derive(Debug, Clone)]
pub struct RawTranscriptEvent {
    pub text: String,
    pub message_type: Option<String>,
}

impl RawTranscriptEvent {
    pub fn is_final(&self) -> bool {
        self.message_type.as_deref() == Some(FINAL_TRANSCRIPT)
    }
}
