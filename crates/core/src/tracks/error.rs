//! Error types for the tracks module.
//!
//! These never reach callers of the prober or extractor. They exist so the
//! reason a probe or extraction came back empty can be logged precisely.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while probing or extracting subtitle tracks.
#[derive(Debug, Error)]
pub enum TrackError {
    /// Video file not found.
    #[error("Video file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// External tool binary not found.
    #[error("{tool} not found at path: {path}")]
    ToolNotFound { tool: &'static str, path: PathBuf },

    /// External tool exited unsuccessfully.
    #[error("{tool} exited with code {code:?}")]
    ToolFailed {
        tool: &'static str,
        code: Option<i32>,
        stderr: Option<String>,
    },

    /// External tool ran past its deadline.
    #[error("{tool} timed out after {timeout_secs} seconds")]
    Timeout {
        tool: &'static str,
        timeout_secs: u64,
    },

    /// Failed to parse ffprobe output.
    #[error("Failed to parse ffprobe output: {reason}")]
    ParseError { reason: String },

    /// Extraction reported success but produced no file.
    #[error("Extracted subtitle not found at: {path}")]
    OutputMissing { path: PathBuf },

    /// I/O error while running the tool.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrackError {
    /// Creates a tool failure from captured stderr, dropping it when empty.
    pub fn tool_failed(tool: &'static str, code: Option<i32>, stderr: &[u8]) -> Self {
        let stderr = String::from_utf8_lossy(stderr).trim().to_string();
        Self::ToolFailed {
            tool,
            code,
            stderr: if stderr.is_empty() { None } else { Some(stderr) },
        }
    }

    /// Maps a spawn error, turning `NotFound` into [`TrackError::ToolNotFound`].
    pub fn spawn_failed(tool: &'static str, path: PathBuf, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            Self::ToolNotFound { tool, path }
        } else {
            Self::Io(error)
        }
    }
}
