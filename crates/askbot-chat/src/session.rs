use crate::error::{ChatError, Result};
use crate::exchange::Conversation;
use askbot_core::{SessionId, Timestamp, Transcript};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One chat session: an id plus its private [`Conversation`].
///
/// Clones share the same conversation. Nothing is global, so two sessions
/// never see each other's transcript.
#[derive(Clone, Debug)]
pub struct Session {
    id: SessionId,
    created_at: Timestamp,
    conversation: Arc<Mutex<Conversation>>,
    // unix millis of the last use
    last_active: Arc<AtomicI64>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_id(SessionId::new())
    }

    pub fn with_id(id: SessionId) -> Self {
        let created_at = Timestamp::now();
        Self {
            id,
            created_at,
            conversation: Arc::new(Mutex::new(Conversation::new())),
            last_active: Arc::new(AtomicI64::new(created_at.unix_millis())),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Claims the conversation for one exchange, or reports
    /// [`ChatError::Busy`] if another exchange holds it.
    pub fn try_begin(&self) -> Result<OwnedMutexGuard<Conversation>> {
        let guard = self
            .conversation
            .clone()
            .try_lock_owned()
            .map_err(|_| ChatError::Busy(self.id))?;
        self.touch();
        Ok(guard)
    }

    /// Records use of the session now.
    pub fn touch(&self) {
        self.last_active
            .store(Timestamp::now().unix_millis(), Ordering::Relaxed);
    }

    /// Time since the session was last used.
    pub fn idle_for(&self) -> Duration {
        let elapsed = Timestamp::now().unix_millis() - self.last_active.load(Ordering::Relaxed);
        Duration::from_millis(elapsed.max(0) as u64)
    }

    /// True while an exchange holds the conversation.
    pub fn is_busy(&self) -> bool {
        self.conversation.try_lock().is_err()
    }

    /// Waits for any in-flight exchange, then returns a copy of the transcript.
    pub async fn transcript(&self) -> Transcript {
        self.touch();
        self.conversation.lock().await.transcript().clone()
    }

    pub async fn clear(&self) {
        self.touch();
        self.conversation.lock().await.clear();
    }

    pub async fn turn_count(&self) -> usize {
        self.conversation.lock().await.transcript().len()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
