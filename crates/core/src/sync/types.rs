//! Types for the sync module.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use tokio::process::Child;
use tracing::{info, warn};

use super::cleanup::ArtifactCleaner;
use super::error::SyncError;
use crate::tracks::TrackDescriptor;

/// A request to synchronize one subtitle file against a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    /// Video the reference is taken from.
    pub video_path: PathBuf,
    /// Subtitle file to be retimed.
    pub subtitle_path: PathBuf,
    /// Where alass writes the retimed subtitle.
    pub output_path: PathBuf,
    /// Arguments passed through to alass for this run only.
    pub extra_args: Vec<String>,
}

impl SyncRequest {
    pub fn new(
        video_path: impl Into<PathBuf>,
        subtitle_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            video_path: video_path.into(),
            subtitle_path: subtitle_path.into(),
            output_path: output_path.into(),
            extra_args: Vec::new(),
        }
    }

    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }
}

/// The timing reference handed to alass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceFile {
    /// A subtitle track extracted into the temp directory.
    Extracted {
        path: PathBuf,
        track: TrackDescriptor,
    },
    /// The video itself; alass works out the timing from its audio.
    Video(PathBuf),
}

impl ReferenceFile {
    pub fn path(&self) -> &Path {
        match self {
            Self::Extracted { path, .. } => path,
            Self::Video(path) => path,
        }
    }

    pub fn is_extracted(&self) -> bool {
        matches!(self, Self::Extracted { .. })
    }

    /// The temporary file backing this reference, if one was created.
    pub fn extracted_path(&self) -> Option<&Path> {
        match self {
            Self::Extracted { path, .. } => Some(path),
            Self::Video(_) => None,
        }
    }
}

/// A running alass process and what it was started with.
///
/// The caller owns the process: it decides when to wait on it, read its
/// output, or kill it.
#[derive(Debug)]
pub struct SyncJob {
    pub reference: ReferenceFile,
    pub subtitle_path: PathBuf,
    pub output_path: PathBuf,
    /// Full alass argument list used for the run.
    pub args: Vec<OsString>,
    pub process: Child,
}

impl SyncJob {
    /// Waits for alass, collects its output and disposes of the extracted
    /// reference unless `keep_extracted` is set.
    ///
    /// The reference is disposed of even when waiting fails.
    pub async fn wait(
        self,
        cleaner: &ArtifactCleaner,
        keep_extracted: bool,
    ) -> Result<SyncOutcome, SyncError> {
        let output = self.process.wait_with_output().await;
        finish_run(
            &self.reference,
            &self.output_path,
            output,
            cleaner,
            keep_extracted,
        )
        .await
    }
}

async fn finish_run(
    reference: &ReferenceFile,
    output_path: &Path,
    output: std::io::Result<Output>,
    cleaner: &ArtifactCleaner,
    keep_extracted: bool,
) -> Result<SyncOutcome, SyncError> {
    let artifact_removed = match reference.extracted_path() {
        Some(path) if !keep_extracted => cleaner.cleanup(path).await,
        _ => false,
    };

    let output = output.map_err(SyncError::WaitFailed)?;
    let output_produced = tokio::fs::metadata(output_path).await.is_ok();

    let outcome = SyncOutcome {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        output_produced,
        artifact_removed,
    };

    if outcome.succeeded() {
        info!("Synchronized subtitle written to {}", output_path.display());
    } else {
        warn!(
            "No synchronized output produced at {} (alass exit code {:?})",
            output_path.display(),
            outcome.status.code()
        );
    }

    Ok(outcome)
}

/// Result of a finished alass run.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    /// Whether the output file exists after the run.
    pub output_produced: bool,
    /// Whether the extracted reference was deleted.
    pub artifact_removed: bool,
}

impl SyncOutcome {
    pub fn succeeded(&self) -> bool {
        self.status.success() && self.output_produced
    }
}
