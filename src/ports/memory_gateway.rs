//! Memory Gateway Port - prior-interaction retrieval and experience storage.
//!
//! The coordinator is the only caller and the single degradation point: a
//! retrieval error becomes an empty hit list, a storage error becomes a
//! missing experience id. Neither is ever surfaced to the end caller.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::assessment::{MemoryHit, StoredExperience};
use crate::domain::foundation::{ExperienceId, UserId};

/// Port for long-term memory access.
#[async_trait]
pub trait MemoryGateway: Send + Sync {
    /// Retrieves up to `top_k` prior interactions relevant to `query`,
    /// most-recent-relevant first. May return an empty list.
    async fn retrieve(
        &self,
        user_id: &UserId,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<MemoryHit>, MemoryError>;

    /// Appends one processed experience to the user's current session and
    /// returns its id.
    async fn store(&self, experience: StoredExperience) -> Result<ExperienceId, MemoryError>;
}

/// Memory gateway errors.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// The backing store could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// A stored record could not be decoded.
    #[error("corrupt record: {0}")]
    CorruptRecord(String),
}

impl MemoryError {
    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        MemoryError::Storage(message.into())
    }

    /// Creates a corrupt record error.
    pub fn corrupt_record(message: impl Into<String>) -> Self {
        MemoryError::CorruptRecord(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_their_context() {
        assert_eq!(
            MemoryError::storage("disk full").to_string(),
            "storage error: disk full"
        );
        assert_eq!(
            MemoryError::corrupt_record("bad json").to_string(),
            "corrupt record: bad json"
        );
    }
}
