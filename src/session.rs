//! In-memory session store: one isolated conversation per session id.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::SessionError;
use crate::planner::{Conversation, EngineOptions};

/// Conversations keyed by session id. Cheap to clone; clones share state.
#[derive(Clone, Default)]
pub struct SessionStore {
    options: EngineOptions,
    sessions: Arc<RwLock<HashMap<Uuid, Conversation>>>,
}

impl SessionStore {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Start a new conversation. Returns its id and greeting.
    pub async fn create(&self) -> (Uuid, String) {
        let id = Uuid::new_v4();
        let convo = Conversation::new(self.options);
        let greeting = convo
            .log()
            .first()
            .map(|entry| entry.message.clone())
            .unwrap_or_default();
        let mut sessions = self.sessions.write().await;
        sessions.insert(id, convo);
        tracing::info!(session_id = %id, active = sessions.len(), "Session created");
        (id, greeting)
    }

    /// Run `f` against a session's conversation under the write lock.
    pub async fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Conversation) -> T,
    ) -> Result<T, SessionError> {
        let mut sessions = self.sessions.write().await;
        let convo = sessions.get_mut(&id).ok_or(SessionError::NotFound { id })?;
        Ok(f(convo))
    }

    /// Clone of a session's conversation.
    pub async fn snapshot(&self, id: Uuid) -> Result<Conversation, SessionError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound { id })
    }

    /// Drop a session and its conversation.
    pub async fn remove(&self, id: Uuid) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&id).ok_or(SessionError::NotFound { id })?;
        tracing::info!(session_id = %id, active = sessions.len(), "Session removed");
        Ok(())
    }
}
