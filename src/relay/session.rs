use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::ws::{Message, WebSocket};
use futures::stream::SplitStream;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

use crate::bus::RoomBus;
use crate::config::EngineConfig;
use crate::engine::{AudioSender, EngineClient};
use crate::registry::{ParticipantEntry, ParticipantRegistry};
use crate::transcript::{MessageTracker, TranscriptEvent};

/// Orchestrates one participant's full duplex relay for the duration of
/// their connection.
pub struct RelaySession {
    name: String,
    registry: Arc<ParticipantRegistry>,
    bus: Arc<RoomBus>,
    engine: Arc<EngineConfig>,
    channel: String,
}

impl RelaySession {
    pub fn new(
        name: String,
        registry: Arc<ParticipantRegistry>,
        bus: Arc<RoomBus>,
        engine: Arc<EngineConfig>,
        channel: String,
    ) -> Self {
        Self {
            name,
            registry,
            bus,
            engine,
            channel,
        }
    }

    /// Drive the session until the client disconnects or the upstream link
    /// fails. Errors never escape: they are logged with the participant's
    /// name and end this session only.
    pub async fn run(self, socket: WebSocket) {
        let entry = ParticipantEntry::new();
        let session_id = entry.session_id;
        if let Some(replaced) = self.registry.register(&self.name, entry).await {
            // Known gap: names are not unique, and the replaced connection
            // keeps running without a registry entry.
            warn!(
                participant = %self.name,
                replaced_session = %replaced.session_id,
                "name already registered; replacing the earlier entry"
            );
        }
        info!(participant = %self.name, %session_id, "participant connected");

        let (client_tx, client_rx) = socket.split();

        // Single writer for the client connection, fed by a channel.
        let (out_tx, mut out_rx) = mpsc::channel::<TranscriptEvent>(64);
        let writer_name = self.name.clone();
        let writer = tokio::spawn(async move {
            let mut client_tx = client_tx;
            while let Some(event) = out_rx.recv().await {
                let payload = match serde_json::to_string(&event) {
                    Ok(payload) => payload,
                    Err(e) => {
                        error!(participant = %writer_name, error = %e, "failed to serialize transcript event");
                        continue;
                    }
                };
                if client_tx.send(Message::Text(payload)).await.is_err() {
                    break;
                }
            }
        });

        // Broadcast-receive path, scoped to the connection lifetime.
        let broadcasts = tokio::spawn(forward_broadcasts(
            self.bus.subscribe(&self.channel).await,
            out_tx.clone(),
            self.name.clone(),
        ));

        // Audio-forward and transcript-receive paths; any upstream failure
        // is caught here and ends this session only.
        if let Err(e) = self.relay_upstream(client_rx).await {
            error!(participant = %self.name, error = %e, "relay session failed");
        }

        broadcasts.abort();
        drop(out_tx);
        let _ = writer.await;

        if self.registry.remove_if(&self.name, session_id).await {
            info!(participant = %self.name, "participant disconnected");
        } else {
            // A reconnect under the same name already replaced this entry.
            debug!(participant = %self.name, %session_id, "registry entry no longer ours");
        }
    }

    /// Connect the engine and race the audio-forward and transcript-receive
    /// paths: whichever finishes first cancels the other. The audio path
    /// ends at client end-of-stream, after which no more transcripts will
    /// arrive; the transcript path ends when the engine closes or fails.
    async fn relay_upstream(&self, client_rx: SplitStream<WebSocket>) -> Result<()> {
        let mut engine = EngineClient::connect(&self.engine, &self.name).await?;
        let audio = engine.audio_sender();

        tokio::select! {
            res = forward_audio(client_rx, audio, &self.name) => {
                res.context("audio-forward path failed")?;
                debug!(participant = %self.name, "client audio stream ended");
            }
            res = self.receive_transcripts(&mut engine) => {
                res.context("transcript-receive path failed")?;
            }
        }

        Ok(())
    }

    /// Normalize engine events through the message tracker and publish them
    /// to the room channel.
    async fn receive_transcripts(&self, engine: &mut EngineClient) -> Result<()> {
        let mut tracker = MessageTracker::new();

        while let Some(raw) = engine.next_event().await? {
            let is_final = raw.is_final();
            let event = TranscriptEvent {
                user: self.name.clone(),
                message: raw.text,
                message_id: tracker.observe(is_final),
                is_final,
            };

            let delivered = self.bus.publish(&self.channel, event).await;
            debug!(participant = %self.name, delivered, is_final, "published transcript event");
        }

        info!(participant = %self.name, "engine closed the transcript stream");
        Ok(())
    }
}

/// Read binary audio frames from the client and forward them upstream.
///
/// Client disconnects (close frame, read error, end-of-stream) are normal
/// termination; only a failed upstream send is an error.
async fn forward_audio(
    mut client_rx: SplitStream<WebSocket>,
    audio: AudioSender,
    participant: &str,
) -> Result<()> {
    while let Some(frame) = client_rx.next().await {
        match frame {
            Ok(Message::Binary(chunk)) => audio.send(&chunk).await?,
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(Message::Text(payload)) => {
                warn!(participant, payload = %payload, "ignoring unexpected text frame from client");
            }
            Ok(_) => {}
        }
    }
    Ok(())
}

/// Forward room broadcasts to this session's client until the connection
/// closes or the channel is torn down.
async fn forward_broadcasts(
    mut events: broadcast::Receiver<TranscriptEvent>,
    out_tx: mpsc::Sender<TranscriptEvent>,
    participant: String,
) {
    loop {
        match events.recv().await {
            Ok(event) => {
                if out_tx.send(event).await.is_err() {
                    break;
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(participant = %participant, skipped, "slow subscriber; dropped oldest room events");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
