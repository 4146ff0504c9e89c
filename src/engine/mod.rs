//! Client for the remote real-time transcription engine.
//!
//! One duplex WebSocket connection per participant. Outbound frames carry
//! base64-encoded audio; inbound frames carry interim and final transcript
//! revisions which are decoded into [`RawTranscriptEvent`]s.

pub mod client;
pub mod messages;

pub use client::{AudioSender, EngineClient};
pub use messages::{AudioFrame, EngineMessage, RawTranscriptEvent};
