//! Memory store configuration.

use serde::Deserialize;
use std::path::PathBuf;

use super::ValidationError;

/// Which memory gateway implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryBackend {
    /// Process-local store (default; history dies with the process).
    #[default]
    Memory,
    /// JSON files under `data_dir`.
    Filesystem,
}

/// Configuration for the memory store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoryConfig {
    /// Backend to use.
    #[serde(default)]
    pub backend: MemoryBackend,

    /// Data directory, required for the filesystem backend.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl MemoryConfig {
    /// Validates the section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == MemoryBackend::Filesystem && self.data_dir.is_none() {
            return Err(ValidationError::MissingDataDir);
        }
        Ok(())
    }
}
