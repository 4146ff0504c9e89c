use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use base64::Engine as _;
use futures::stream::SplitStream;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{interval, Instant, Interval, MissedTickBehavior};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::AUTHORIZATION;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use super::messages::{AudioFrame, EngineMessage, RawTranscriptEvent};
use crate::config::EngineConfig;

type EngineStream = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// One duplex connection to the remote transcription engine.
///
/// Outbound frames go through a dedicated writer task fed by a channel, so
/// the audio path and the keepalive timer never contend on the sink. The
/// writer exits when the last [`AudioSender`] and the client itself are
/// dropped, which closes the connection.
pub struct EngineClient {
    stream: EngineStream,
    out_tx: mpsc::Sender<Message>,
    ping: Interval,
    pong_deadline: Duration,
    last_pong: Instant,
    pacing: Duration,
    participant: String,
}

impl EngineClient {
    /// Open the upstream connection and consume the session handshake.
    pub async fn connect(config: &EngineConfig, participant: &str) -> Result<Self> {
        let mut request = config
            .url
            .as_str()
            .into_client_request()
            .context("invalid engine URL")?;
        request.headers_mut().insert(
            AUTHORIZATION,
            HeaderValue::from_str(&config.api_key).context("invalid engine API key")?,
        );

        info!(participant, url = %config.url, "connecting to transcription engine");

        let (ws, _) = connect_async(request)
            .await
            .context("failed to connect to transcription engine")?;
        let (mut sink, mut stream) = ws.split();

        // The engine opens every session with a handshake message; consume
        // and discard it before normal operation begins.
        match stream.next().await {
            Some(Ok(msg)) => debug!(participant, ?msg, "engine session handshake"),
            Some(Err(e)) => return Err(e).context("engine connection failed during handshake"),
            None => bail!("engine closed the connection before the session handshake"),
        }

        let (out_tx, mut out_rx) = mpsc::channel::<Message>(64);
        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                if sink.send(msg).await.is_err() {
                    break;
                }
            }
        });

        let mut ping = interval(Duration::from_secs(config.ping_interval_secs));
        ping.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; skip it.
        ping.tick().await;

        info!(participant, "transcription engine session established");

        Ok(Self {
            stream,
            out_tx,
            ping,
            pong_deadline: Duration::from_secs(config.pong_timeout_secs),
            last_pong: Instant::now(),
            pacing: Duration::from_millis(config.send_pacing_ms),
            participant: participant.to_string(),
        })
    }

    /// Clonable handle for the audio-forward path.
    pub fn audio_sender(&self) -> AudioSender {
        AudioSender {
            out_tx: self.out_tx.clone(),
            pacing: self.pacing,
        }
    }

    /// Next transcript event carrying non-empty text.
    ///
    /// Returns `Ok(None)` when the engine closes the connection in an
    /// orderly way; transport errors, malformed messages and keepalive
    /// timeouts are fatal to the session.
    pub async fn next_event(&mut self) -> Result<Option<RawTranscriptEvent>> {
        loop {
            tokio::select! {
                msg = self.stream.next() => match msg {
                    None => return Ok(None),
                    Some(Err(e)) => return Err(e).context("engine connection failed"),
                    Some(Ok(Message::Text(payload))) => {
                        let decoded: EngineMessage = serde_json::from_str(&payload)
                            .context("malformed engine message")?;
                        if let Some(event) = decoded.into_event() {
                            return Ok(Some(event));
                        }
                    }
                    Some(Ok(Message::Pong(_))) => {
                        self.last_pong = Instant::now();
                    }
                    Some(Ok(Message::Close(frame))) => {
                        debug!(participant = %self.participant, ?frame, "engine closed the session");
                        return Ok(None);
                    }
                    // Pings are answered by the protocol layer; the engine
                    // is not expected to send binary frames.
                    Some(Ok(other)) => {
                        warn!(participant = %self.participant, ?other, "unexpected engine frame");
                    }
                },
                _ = self.ping.tick() => {
                    if self.last_pong.elapsed() > self.pong_deadline {
                        bail!(
                            "engine keepalive timed out after {:?} without a pong",
                            self.pong_deadline
                        );
                    }
                    if self.out_tx.send(Message::Ping(Vec::new())).await.is_err() {
                        bail!("engine connection closed while sending keepalive");
                    }
                }
            }
        }
    }
}

/// Sender half of an engine session, used by the audio-forward path.
#[derive(Clone)]
pub struct AudioSender {
    out_tx: mpsc::Sender<Message>,
    pacing: Duration,
}

impl AudioSender {
    /// Frame one raw audio chunk and queue it for the engine.
    ///
    /// Applies the configured inter-send pacing delay so a fast client
    /// cannot flood the upstream link. Rate limiting, not correctness.
    pub async fn send(&self, chunk: &[u8]) -> Result<()> {
        let frame = AudioFrame {
            audio_data: base64::engine::general_purpose::STANDARD.encode(chunk),
        };
        let payload = serde_json::to_string(&frame).context("failed to encode audio frame")?;

        self.out_tx
            .send(Message::Text(payload))
            .await
            .map_err(|_| anyhow!("engine connection closed"))?;

        tokio::time::sleep(self.pacing).await;
        Ok(())
    }
}
