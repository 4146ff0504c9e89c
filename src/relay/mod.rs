//! Per-connection relay orchestration.
//!
//! A [`RelaySession`] owns one client connection and runs three concurrent
//! activities for its lifetime: forwarding client audio to the transcription
//! engine, normalizing engine transcripts onto the room bus, and forwarding
//! room broadcasts back to the client.

pub mod session;

pub use session::RelaySession;
