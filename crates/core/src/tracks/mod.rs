//! Tracks module for discovering and extracting embedded subtitles.
//!
//! This module provides the `TrackProber` and `TrackExtractor` traits and their
//! ffprobe/ffmpeg implementations, plus the language-based track ranker.
//!
//! Both implementations are fail-soft: problems with the video or the external
//! tools are logged and reported as "no tracks" or "not extracted".
//!
//! # Example
//!
//! ```ignore
//! use subsync_core::tracks::{best_track, FfmpegExtractor, FfprobeProber, TrackExtractor, TrackProber};
//!
//! let prober = FfprobeProber::from_config(&config.tools, platform);
//! let extractor = FfmpegExtractor::from_config(&config.tools, platform);
//!
//! let tracks = prober.probe(Path::new("/videos/movie.mkv")).await;
//! if let Some(pos) = best_track(&tracks, "en") {
//!     let track = &tracks[pos];
//!     let ok = extractor
//!         .extract(Path::new("/videos/movie.mkv"), track.ordinal, Path::new("/tmp/ref.srt"), &track.codec_name)
//!         .await;
//! }
//! ```

mod error;
mod ffmpeg;
mod ranker;
mod traits;
mod types;

pub use error::TrackError;
pub use ffmpeg::{FfmpegExtractor, FfprobeProber};
pub use ranker::best_track;
pub use traits::{TrackExtractor, TrackProber};
pub use types::{SubtitleFormat, TrackDescriptor, UNKNOWN};
