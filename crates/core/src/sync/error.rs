//! Error types for the sync module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running the external synchronizer.
///
/// Probing and extraction problems never show up here; they degrade to using
/// the video itself as the reference.
#[derive(Debug, Error)]
pub enum SyncError {
    /// alass binary not found.
    #[error("alass not found at path: {path}")]
    SynchronizerNotFound { path: PathBuf },

    /// alass could not be started.
    #[error("Failed to start alass: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// Waiting for alass or reading its output failed.
    #[error("Failed to wait for alass: {0}")]
    WaitFailed(#[source] std::io::Error),
}

impl SyncError {
    /// Maps a spawn error, turning `NotFound` into [`SyncError::SynchronizerNotFound`].
    pub fn spawn_failed(path: PathBuf, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            Self::SynchronizerNotFound { path }
        } else {
            Self::SpawnFailed(error)
        }
    }
}
