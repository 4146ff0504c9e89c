use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub engine: EngineConfig,
    pub room: RoomConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Connection parameters for the remote transcription engine.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// WebSocket endpoint, including any query parameters the engine expects
    /// (e.g. the audio sample rate).
    pub url: String,
    /// Static credential sent as the `Authorization` header.
    pub api_key: String,
    pub ping_interval_secs: u64,
    pub pong_timeout_secs: u64,
    /// Delay applied between consecutive audio frames sent upstream.
    pub send_pacing_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoomConfig {
    /// Broadcast channel name shared by every participant.
    pub channel: String,
    /// Buffered events per subscriber before the oldest are dropped.
    pub buffer: usize,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            // VOICEROOM__ENGINE__API_KEY=... overrides engine.api_key, so the
            // credential never has to live in the config file.
            .add_source(config::Environment::with_prefix("VOICEROOM").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
