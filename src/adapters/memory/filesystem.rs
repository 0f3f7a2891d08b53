//! Filesystem implementation of the MemoryGateway port.
//!
//! One JSON file per user under `{base_dir}/memory/`, written atomically via
//! a temporary file and rename.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::{append_turn, relevant_hits, SessionRecord};
use crate::domain::assessment::{MemoryHit, StoredExperience};
use crate::domain::foundation::{ExperienceId, UserId};
use crate::ports::{MemoryError, MemoryGateway};

/// File-backed session store.
pub struct FsMemoryStore {
    base_dir: PathBuf,
}

impl FsMemoryStore {
    /// Creates a store rooted at the given directory.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    fn file_path(&self, user_id: &UserId) -> PathBuf {
        self.base_dir
            .join("memory")
            .join(format!("{}.json", user_id.as_str()))
    }

    async fn load_sessions(&self, user_id: &UserId) -> Result<Vec<SessionRecord>, MemoryError> {
        let path = self.file_path(user_id);
        match fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| MemoryError::corrupt_record(format!("{}: {e}", path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(MemoryError::storage(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    async fn save_sessions(
        &self,
        user_id: &UserId,
        sessions: &[SessionRecord],
    ) -> Result<(), MemoryError> {
        let path = self.file_path(user_id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| MemoryError::storage(format!("failed to create directory: {e}")))?;
        }

        let content = serde_json::to_string_pretty(sessions)
            .map_err(|e| MemoryError::storage(format!("failed to encode sessions: {e}")))?;

        // Atomic on the same filesystem: write to a temp file, then rename.
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content)
            .await
            .map_err(|e| MemoryError::storage(format!("failed to write temporary file: {e}")))?;
        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| MemoryError::storage(format!("failed to rename file: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl MemoryGateway for FsMemoryStore {
    async fn retrieve(
        &self,
        user_id: &UserId,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<MemoryHit>, MemoryError> {
        let sessions = self.load_sessions(user_id).await?;
        Ok(relevant_hits(&sessions, query, top_k))
    }

    async fn store(&self, experience: StoredExperience) -> Result<ExperienceId, MemoryError> {
        let user_id = experience.user_id.clone();
        let mut sessions = self.load_sessions(&user_id).await?;
        let experience_id = append_turn(&mut sessions, experience);
        self.save_sessions(&user_id, &sessions).await?;
        Ok(experience_id)
    }
}
