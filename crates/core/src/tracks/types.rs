//! Types for the tracks module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Placeholder used when the inspector reports no codec or language.
pub const UNKNOWN: &str = "unknown";

/// A subtitle stream discovered inside a video container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDescriptor {
    /// Position among the container's subtitle streams (0-based).
    /// This is what ffmpeg's `0:s:N` stream specifier addresses.
    pub ordinal: usize,
    /// Absolute stream index inside the container.
    pub stream_index: u32,
    /// Codec name as reported by ffprobe, or `"unknown"`.
    pub codec_name: String,
    /// Language tag, or `"unknown"`.
    pub language: String,
    /// Free-text title, may be empty.
    pub title: String,
    /// Human-readable label, built once on construction.
    pub display_name: String,
}

impl TrackDescriptor {
    /// Creates a descriptor, normalizing missing fields and building the display name.
    pub fn new(
        ordinal: usize,
        stream_index: u32,
        codec_name: Option<String>,
        language: Option<String>,
        title: Option<String>,
    ) -> Self {
        let codec_name = non_empty_or_unknown(codec_name);
        let language = non_empty_or_unknown(language);
        let title = title.unwrap_or_default();
        let display_name = display_name(ordinal, &codec_name, &language, &title);

        Self {
            ordinal,
            stream_index,
            codec_name,
            language,
            title,
            display_name,
        }
    }

    /// Whether the track is tagged with the given language (case-insensitive).
    pub fn has_language(&self, language: &str) -> bool {
        self.language.eq_ignore_ascii_case(language)
    }
}

impl std::fmt::Display for TrackDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_name)
    }
}

fn non_empty_or_unknown(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => UNKNOWN.to_string(),
    }
}

fn display_name(ordinal: usize, codec_name: &str, language: &str, title: &str) -> String {
    let mut parts = vec![format!("Track {}", ordinal + 1)];
    if language != UNKNOWN {
        parts.push(format!("({})", language));
    }
    if !title.is_empty() {
        parts.push(format!("- {}", title));
    }
    if codec_name != UNKNOWN {
        parts.push(format!("[{}]", codec_name));
    }
    parts.join(" ")
}

/// Standalone subtitle file format produced by extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    /// SubRip
    Srt,
    /// Advanced SubStation Alpha
    Ass,
    /// WebVTT
    Vtt,
}

impl SubtitleFormat {
    /// Maps an ffprobe codec name to the output format.
    /// Unknown codecs fall back to SubRip.
    pub fn for_codec(codec_name: &str) -> Self {
        match codec_name {
            "ass" => Self::Ass,
            "webvtt" => Self::Vtt,
            "subrip" | "mov_text" => Self::Srt,
            _ => Self::Srt,
        }
    }

    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Ass => "ass",
            Self::Vtt => "vtt",
        }
    }

    /// Returns the ffmpeg subtitle codec argument for `-c:s`.
    /// ASS is copied verbatim, everything else is re-encoded to SubRip.
    pub fn ffmpeg_codec(&self) -> &'static str {
        match self {
            Self::Ass => "copy",
            Self::Srt | Self::Vtt => "srt",
        }
    }

    /// Rewrites the extension of `path` to this format's extension.
    pub fn apply_to(&self, path: &Path) -> PathBuf {
        path.with_extension(self.extension())
    }
}
