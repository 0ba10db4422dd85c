use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::call::{CallSession, PendingRecording};

/// Mutation applied to a session under the store's write lock.
pub type SessionUpdate = Box<dyn FnOnce(&mut CallSession) + Send>;

/// Keyed store for call sessions and pending recordings.
///
/// Handlers only see this trait; tests and production both use the in-memory
/// implementation. Read-modify-write goes through [`SessionStore::update`] so
/// a duplicate webhook retry for the same call serializes on the store
/// instead of racing.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Replace any existing session for the call with a fresh empty one.
    async fn reset(&self, call_sid: &str) -> CallSession;

    async fn get(&self, call_sid: &str) -> Option<CallSession>;

    /// Load the session (creating an empty one if absent), apply the update,
    /// stamp `updated_at`, and return the resulting snapshot.
    async fn update(&self, call_sid: &str, update: SessionUpdate) -> CallSession;

    /// Associate a recording identifier with the call and field its
    /// transcription belongs to. A stale pending entry for the same call and
    /// field is replaced; recordings are never in flight concurrently for
    /// one field.
    async fn register_recording(&self, recording_sid: &str, pending: PendingRecording);

    /// Take the pending entry for a recording identifier. Returns `None` for
    /// unknown or already-consumed identifiers.
    async fn consume_recording(&self, recording_sid: &str) -> Option<PendingRecording>;

    /// Drop sessions and pending recordings idle longer than `ttl`.
    /// Returns the number of entries evicted.
    async fn evict_idle(&self, ttl: Duration) -> usize;
}

#[derive(Default)]
struct StoreInner {
    sessions: HashMap<String, CallSession>,
    pending: HashMap<String, PendingRecording>,
}

/// Process-local store, one `RwLock` over both maps.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemoryStore {
    async fn reset(&self, call_sid: &str) -> CallSession {
        let session = CallSession::new();
        let mut inner = self.inner.write().await;
        inner.sessions.insert(call_sid.to_string(), session.clone());
        session
    }

    async fn get(&self, call_sid: &str) -> Option<CallSession> {
        let inner = self.inner.read().await;
        inner.sessions.get(call_sid).cloned()
    }

    async fn update(&self, call_sid: &str, update: SessionUpdate) -> CallSession {
        let mut inner = self.inner.write().await;
        let session = inner
            .sessions
            .entry(call_sid.to_string())
            .or_insert_with(CallSession::new);
        update(session);
        session.touch();
        session.clone()
    }

    async fn register_recording(&self, recording_sid: &str, pending: PendingRecording) {
        let mut inner = self.inner.write().await;
        inner
            .pending
            .retain(|_, p| !(p.call_sid == pending.call_sid && p.field == pending.field));
        inner.pending.insert(recording_sid.to_string(), pending);
    }

    async fn consume_recording(&self, recording_sid: &str) -> Option<PendingRecording> {
        let mut inner = self.inner.write().await;
        inner.pending.remove(recording_sid)
    }

    async fn evict_idle(&self, ttl: Duration) -> usize {
        let cutoff = Utc::now()
            - chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::hours(4));

        let mut inner = self.inner.write().await;
        let before = inner.sessions.len() + inner.pending.len();
        inner.sessions.retain(|_, s| s.updated_at > cutoff);
        inner.pending.retain(|_, p| p.created_at > cutoff);
        let evicted = before - (inner.sessions.len() + inner.pending.len());

        if evicted > 0 {
            info!("Evicted {} idle session entries", evicted);
        } else {
            debug!("Eviction sweep found nothing idle");
        }

        evicted
    }
}
