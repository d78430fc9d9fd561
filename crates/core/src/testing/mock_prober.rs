//! Mock prober for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::tracks::{TrackDescriptor, TrackProber};

/// Mock implementation of the TrackProber trait.
///
/// Returns pre-configured tracks, per path or as a default for any path, and
/// records every probed path. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockProber {
    /// Tracks returned for any path without a specific entry.
    default_tracks: Arc<RwLock<Vec<TrackDescriptor>>>,
    /// Tracks returned for specific paths.
    tracks_by_path: Arc<RwLock<HashMap<PathBuf, Vec<TrackDescriptor>>>>,
    /// Paths that were probed.
    probed: Arc<RwLock<Vec<PathBuf>>>,
}

impl MockProber {
    /// Create a new mock prober that finds no tracks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tracks returned for any path.
    pub async fn set_tracks(&self, tracks: Vec<TrackDescriptor>) {
        *self.default_tracks.write().await = tracks;
    }

    /// Set the tracks returned for a specific path.
    pub async fn set_tracks_for(&self, path: impl AsRef<Path>, tracks: Vec<TrackDescriptor>) {
        self.tracks_by_path
            .write()
            .await
            .insert(path.as_ref().to_path_buf(), tracks);
    }

    /// Get all probed paths.
    pub async fn probed_paths(&self) -> Vec<PathBuf> {
        self.probed.read().await.clone()
    }

    /// Get the number of probes performed.
    pub async fn probe_count(&self) -> usize {
        self.probed.read().await.len()
    }
}

#[async_trait]
impl TrackProber for MockProber {
    fn name(&self) -> &str {
        "mock"
    }

    async fn probe(&self, video_path: &Path) -> Vec<TrackDescriptor> {
        self.probed.write().await.push(video_path.to_path_buf());

        if let Some(tracks) = self.tracks_by_path.read().await.get(video_path) {
            return tracks.clone();
        }

        self.default_tracks.read().await.clone()
    }
}
