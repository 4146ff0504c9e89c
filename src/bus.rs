//! In-process publish/subscribe bus for room-wide transcript fan-out.

use std::collections::HashMap;

use tokio::sync::{broadcast, RwLock};

use crate::transcript::TranscriptEvent;

/// Named fan-out topics backed by one broadcast channel per room.
///
/// Delivery is at-least-once to every subscriber active at publish time, in
/// publish order per subscriber; there is no replay for late subscribers.
/// Backpressure policy: a subscriber that falls more than `capacity` events
/// behind loses the oldest ones (`RecvError::Lagged` on its receiver) while
/// publishers never block.
pub struct RoomBus {
    channels: RwLock<HashMap<String, broadcast::Sender<TranscriptEvent>>>,
    capacity: usize,
}

impl RoomBus {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    /// Deliver `event` to every active subscriber of `channel`.
    ///
    /// Returns the number of subscribers it was handed to; publishing to a
    /// channel nobody listens on is not an error.
    pub async fn publish(&self, channel: &str, event: TranscriptEvent) -> usize {
        self.sender(channel).await.send(event).unwrap_or(0)
    }

    /// Start receiving events published to `channel` from this point on.
    pub async fn subscribe(&self, channel: &str) -> broadcast::Receiver<TranscriptEvent> {
        self.sender(channel).await.subscribe()
    }

    async fn sender(&self, channel: &str) -> broadcast::Sender<TranscriptEvent> {
        {
            let channels = self.channels.read().await;
            if let Some(tx) = channels.get(channel) {
                return tx.clone();
            }
        }

        let mut channels = self.channels.write().await;
        channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }
}
