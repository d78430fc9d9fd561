//! Naming and disposal of extracted reference subtitles.

use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Marker every extracted reference subtitle carries in its file name.
pub const EXTRACTED_TRACK_MARKER: &str = "_extracted_track_";

/// Builds `{temp_dir}/{video_stem}_extracted_track_{stream_index}.srt`.
///
/// The extension is provisional: the extractor rewrites it to match the codec.
pub fn extracted_track_path(temp_dir: &Path, video_path: &Path, stream_index: u32) -> PathBuf {
    let stem = video_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "video".to_string());

    temp_dir.join(format!(
        "{}{}{}.srt",
        stem, EXTRACTED_TRACK_MARKER, stream_index
    ))
}

/// Deletes extracted reference subtitles and nothing else.
///
/// A path is only removed when it lies under the cleaner's temp directory
/// and its file name carries [`EXTRACTED_TRACK_MARKER`].
#[derive(Debug, Clone)]
pub struct ArtifactCleaner {
    temp_dir: PathBuf,
}

impl Default for ArtifactCleaner {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}

impl ArtifactCleaner {
    /// Creates a cleaner guarding the given temp directory.
    pub fn new(temp_dir: PathBuf) -> Self {
        Self { temp_dir }
    }

    /// The directory this cleaner is allowed to delete from.
    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Whether `path` looks like an artifact this system created.
    pub fn is_managed(&self, path: &Path) -> bool {
        let inside_temp = path.starts_with(&self.temp_dir)
            && !path.components().any(|c| matches!(c, Component::ParentDir));
        let marked = path
            .file_name()
            .map(|name| name.to_string_lossy().contains(EXTRACTED_TRACK_MARKER))
            .unwrap_or(false);

        inside_temp && marked
    }

    /// Removes `path` if it is a managed artifact. Never fails.
    ///
    /// Returns whether a file was removed.
    pub async fn cleanup(&self, path: &Path) -> bool {
        if !self.is_managed(path) {
            debug!("Not removing unmanaged path {}", path.display());
            return false;
        }

        if tokio::fs::metadata(path).await.is_err() {
            return false;
        }

        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                info!("Removed extracted subtitle {}", path.display());
                true
            }
            Err(e) => {
                warn!(
                    "Could not clean up extracted subtitle {}: {}",
                    path.display(),
                    e
                );
                false
            }
        }
    }
}
