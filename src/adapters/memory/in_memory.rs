//! In-memory implementation of the MemoryGateway port.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{append_turn, relevant_hits, SessionRecord};
use crate::domain::assessment::{MemoryHit, StoredExperience};
use crate::domain::foundation::{ExperienceId, UserId};
use crate::ports::{MemoryError, MemoryGateway};

/// Process-local session store, keyed by user.
#[derive(Debug, Default)]
pub struct InMemoryMemoryStore {
    sessions: RwLock<HashMap<String, Vec<SessionRecord>>>,
}

impl InMemoryMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions stored for a user.
    pub async fn session_count(&self, user_id: &UserId) -> usize {
        self.sessions
            .read()
            .await
            .get(user_id.as_str())
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl MemoryGateway for InMemoryMemoryStore {
    async fn retrieve(
        &self,
        user_id: &UserId,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<MemoryHit>, MemoryError> {
        let sessions = self.sessions.read().await;
        let hits = sessions
            .get(user_id.as_str())
            .map(|sessions| relevant_hits(sessions, query, top_k))
            .unwrap_or_default();
        Ok(hits)
    }

    async fn store(&self, experience: StoredExperience) -> Result<ExperienceId, MemoryError> {
        let mut sessions = self.sessions.write().await;
        let user_sessions = sessions
            .entry(experience.user_id.as_str().to_string())
            .or_default();
        Ok(append_turn(user_sessions, experience))
    }
}
