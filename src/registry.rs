//! Process-wide map from participant name to live session state.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

/// State tracked for one registered participant connection.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantEntry {
    /// Distinguishes this connection from an earlier or later one made
    /// under the same name.
    pub session_id: Uuid,
    pub connected_at: DateTime<Utc>,
}

impl ParticipantEntry {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            connected_at: Utc::now(),
        }
    }
}

impl Default for ParticipantEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of connected participants.
///
/// Names are room-scoped identities with no uniqueness enforcement: a later
/// registration under the same name replaces the earlier entry and the
/// earlier connection keeps running unrouted. Teardown uses [`remove_if`]
/// with the session id so a replaced connection cannot clobber the entry of
/// the one that replaced it.
///
/// [`remove_if`]: ParticipantRegistry::remove_if
pub struct ParticipantRegistry {
    inner: RwLock<HashMap<String, ParticipantEntry>>,
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Register `name`, returning the entry it replaced, if any.
    pub async fn register(&self, name: &str, entry: ParticipantEntry) -> Option<ParticipantEntry> {
        let mut inner = self.inner.write().await;
        inner.insert(name.to_string(), entry)
    }

    pub async fn lookup(&self, name: &str) -> Option<ParticipantEntry> {
        let inner = self.inner.read().await;
        inner.get(name).cloned()
    }

    /// Remove `name` only if the registry still holds this session's entry.
    ///
    /// Returns whether an entry was removed.
    pub async fn remove_if(&self, name: &str, session_id: Uuid) -> bool {
        let mut inner = self.inner.write().await;
        match inner.get(name) {
            Some(entry) if entry.session_id == session_id => {
                inner.remove(name);
                true
            }
            _ => false,
        }
    }

    /// Snapshot of all registered participants, sorted by name.
    pub async fn snapshot(&self) -> Vec<(String, ParticipantEntry)> {
        let inner = self.inner.read().await;
        let mut entries: Vec<_> = inner
            .iter()
            .map(|(name, entry)| (name.clone(), entry.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

impl Default for ParticipantRegistry {
    fn default() -> Self {
        Self::new()
    }
}
