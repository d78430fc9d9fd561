//! Trait definitions for the tracks module.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::types::{SubtitleFormat, TrackDescriptor};

/// Discovers the subtitle tracks of a video container.
///
/// Probing is fail-soft: a missing file, a broken tool or unparsable output
/// all yield an empty list, indistinguishable from a video without subtitles.
#[async_trait]
pub trait TrackProber: Send + Sync {
    /// Returns the name of this prober implementation.
    fn name(&self) -> &str;

    /// Lists subtitle tracks in container order.
    async fn probe(&self, video_path: &Path) -> Vec<TrackDescriptor>;
}

/// Materializes one subtitle track as a standalone file.
#[async_trait]
pub trait TrackExtractor: Send + Sync {
    /// Returns the name of this extractor implementation.
    fn name(&self) -> &str;

    /// Extracts the subtitle stream at `subtitle_ordinal` (position among
    /// subtitle streams, not the absolute stream index).
    ///
    /// The extension of `output_path` is replaced to match the codec; use
    /// [`TrackExtractor::resolved_output_path`] to learn where the file lands.
    /// Returns `true` only when the tool succeeded and the file exists.
    async fn extract(
        &self,
        video_path: &Path,
        subtitle_ordinal: usize,
        output_path: &Path,
        codec_name: &str,
    ) -> bool;

    /// Path the extraction writes to for the given requested path and codec.
    fn resolved_output_path(&self, output_path: &Path, codec_name: &str) -> PathBuf {
        SubtitleFormat::for_codec(codec_name).apply_to(output_path)
    }
}
