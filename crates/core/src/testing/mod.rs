//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the prober, extractor and
//! interactive selector traits, so sync orchestration can be exercised without
//! ffprobe, ffmpeg or a user.
//!
//! # Example
//!
//! ```rust,ignore
//! use subsync_core::testing::{fixtures, MockExtractor, MockProber};
//!
//! let prober = MockProber::new();
//! prober.set_tracks(fixtures::english_and_spanish()).await;
//!
//! let extractor = MockExtractor::new();
//! // build a SyncOrchestrator with them...
//! ```

mod mock_extractor;
mod mock_prober;
mod mock_selector;

pub use mock_extractor::{MockExtractor, RecordedExtraction};
pub use mock_prober::MockProber;
pub use mock_selector::MockSelector;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::tracks::TrackDescriptor;

    /// Create a subtitle track with a language and codec.
    pub fn track(ordinal: usize, stream_index: u32, language: &str, codec: &str) -> TrackDescriptor {
        TrackDescriptor::new(
            ordinal,
            stream_index,
            Some(codec.to_string()),
            Some(language.to_string()),
            None,
        )
    }

    /// Two SubRip tracks, English then Spanish, after a video and audio stream.
    pub fn english_and_spanish() -> Vec<TrackDescriptor> {
        vec![track(0, 2, "en", "subrip"), track(1, 3, "es", "subrip")]
    }

    /// ffprobe JSON describing `tracks`, as `-select_streams s` prints it.
    pub fn ffprobe_json(tracks: &[TrackDescriptor]) -> String {
        let streams: Vec<serde_json::Value> = tracks
            .iter()
            .map(|t| {
                serde_json::json!({
                    "index": t.stream_index,
                    "codec_type": "subtitle",
                    "codec_name": t.codec_name,
                    "tags": { "language": t.language, "title": t.title },
                })
            })
            .collect();
        serde_json::json!({ "streams": streams }).to_string()
    }
}
