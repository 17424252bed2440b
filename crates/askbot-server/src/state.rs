use askbot_chat::{AnswerGateway, Session};
use askbot_core::SessionId;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{Result, ServerError};

/// Shared handler state: one gateway, one [`Session`] per browser.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<AnswerGateway>,
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl AppState {
    pub fn new(gateway: AnswerGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn create_session(&self) -> Session {
        let session = Session::new();
        self.sessions
            .write()
            .await
            .insert(*session.id(), session.clone());
        info!(session_id = %session.id(), "session created");
        session
    }

    /// Looks up `session_id`, creating a session under that id if the
    /// server has never seen it (e.g. after a restart).
    pub async fn get_or_create_session(&self, session_id: Option<SessionId>) -> Session {
        match session_id {
            Some(id) => {
                if let Some(session) = self.sessions.read().await.get(&id) {
                    session.touch();
                    return session.clone();
                }

                let mut sessions = self.sessions.write().await;
                sessions
                    .entry(id)
                    .or_insert_with(|| {
                        info!(session_id = %id, "session created");
                        Session::with_id(id)
                    })
                    .clone()
            }
            None => self.create_session().await,
        }
    }

    pub async fn get_session(&self, session_id: &SessionId) -> Option<Session> {
        self.sessions.read().await.get(session_id).cloned()
    }

    pub async fn require_session(&self, session_id: &SessionId) -> Result<Session> {
        self.get_session(session_id)
            .await
            .ok_or_else(|| ServerError::not_found(format!("session {}", session_id)))
    }

    pub async fn remove_session(&self, session_id: &SessionId) -> Option<Session> {
        let removed = self.sessions.write().await.remove(session_id);
        if removed.is_some() {
            info!(session_id = %session_id, "session ended");
        }
        removed
    }

    /// Drops every session unused for at least `max_idle`. Sessions with an
    /// exchange in flight are kept. Returns how many were dropped.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|id, session| {
            let keep = session.is_busy() || session.idle_for() < max_idle;
            if !keep {
                debug!(session_id = %id, "evicting idle session");
            }
            keep
        });

        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "idle sessions evicted");
        }
        evicted
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
