pub mod bus;
pub mod config;
pub mod engine;
pub mod http;
pub mod registry;
pub mod relay;
pub mod transcript;

pub use bus::RoomBus;
pub use config::Config;
pub use engine::{AudioSender, EngineClient, RawTranscriptEvent};
pub use http::{create_router, AppState};
pub use registry::{ParticipantEntry, ParticipantRegistry};
pub use relay::RelaySession;
pub use transcript::{MessageTracker, TranscriptEvent};
