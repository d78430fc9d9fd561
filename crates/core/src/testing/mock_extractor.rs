//! Mock extractor for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::tracks::TrackExtractor;

/// A recorded extraction for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedExtraction {
    pub video_path: PathBuf,
    pub subtitle_ordinal: usize,
    /// Path as requested by the caller, before the extension rewrite.
    pub output_path: PathBuf,
    pub codec_name: String,
    pub success: bool,
}

/// Mock implementation of the TrackExtractor trait.
///
/// Provides controllable behavior for testing:
/// - Track extraction requests for assertions
/// - Simulate success/failure
/// - Optionally write an empty file where the real extractor would
#[derive(Debug, Clone)]
pub struct MockExtractor {
    extractions: Arc<RwLock<Vec<RecordedExtraction>>>,
    succeed: Arc<RwLock<bool>>,
    write_files: Arc<RwLock<bool>>,
}

impl Default for MockExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockExtractor {
    /// Create a mock extractor that succeeds and writes output files.
    pub fn new() -> Self {
        Self {
            extractions: Arc::new(RwLock::new(Vec::new())),
            succeed: Arc::new(RwLock::new(true)),
            write_files: Arc::new(RwLock::new(true)),
        }
    }

    /// Get all recorded extractions.
    pub async fn recorded_extractions(&self) -> Vec<RecordedExtraction> {
        self.extractions.read().await.clone()
    }

    /// Get the number of extractions attempted.
    pub async fn extraction_count(&self) -> usize {
        self.extractions.read().await.len()
    }

    /// Make subsequent extractions succeed or fail.
    pub async fn set_succeed(&self, succeed: bool) {
        *self.succeed.write().await = succeed;
    }

    /// Enable or disable writing output files on success.
    pub async fn set_write_files(&self, write: bool) {
        *self.write_files.write().await = write;
    }
}

#[async_trait]
impl TrackExtractor for MockExtractor {
    fn name(&self) -> &str {
        "mock"
    }

    async fn extract(
        &self,
        video_path: &Path,
        subtitle_ordinal: usize,
        output_path: &Path,
        codec_name: &str,
    ) -> bool {
        let mut success = *self.succeed.read().await;

        if success && *self.write_files.read().await {
            let resolved = self.resolved_output_path(output_path, codec_name);
            success = tokio::fs::write(&resolved, b"").await.is_ok();
        }

        self.extractions.write().await.push(RecordedExtraction {
            video_path: video_path.to_path_buf(),
            subtitle_ordinal,
            output_path: output_path.to_path_buf(),
            codec_name: codec_name.to_string(),
            success,
        });

        success
    }
}
