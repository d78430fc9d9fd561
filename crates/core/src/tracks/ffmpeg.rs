//! FFprobe/FFmpeg-based prober and extractor.

use async_trait::async_trait;
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use super::error::TrackError;
use super::traits::{TrackExtractor, TrackProber};
use super::types::{SubtitleFormat, TrackDescriptor};
use crate::config::{ToolPaths, ToolsConfig};
use crate::platform::Platform;

/// Runs an external tool to completion, killing it if the deadline passes.
async fn run_tool(
    tool: &'static str,
    program: &Path,
    args: &[OsString],
    timeout_secs: u64,
    platform: Platform,
) -> Result<Output, TrackError> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    platform.hide_console_window(&mut command);

    debug!("Running {} {:?}", program.display(), args);

    match timeout(Duration::from_secs(timeout_secs), command.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(TrackError::spawn_failed(tool, program.to_path_buf(), e)),
        Err(_) => Err(TrackError::Timeout {
            tool,
            timeout_secs,
        }),
    }
}

/// Subtitle track prober backed by ffprobe.
pub struct FfprobeProber {
    ffprobe_path: PathBuf,
    timeout_secs: u64,
    platform: Platform,
}

impl FfprobeProber {
    /// Creates a prober that runs the given ffprobe binary.
    pub fn new(ffprobe_path: PathBuf, timeout_secs: u64, platform: Platform) -> Self {
        Self {
            ffprobe_path,
            timeout_secs,
            platform,
        }
    }

    /// Creates a prober from the tools configuration.
    pub fn from_config(config: &ToolsConfig, platform: Platform) -> Self {
        let paths = ToolPaths::resolve(config, platform);
        Self::new(paths.ffprobe, config.probe_timeout_secs, platform)
    }

    /// Builds ffprobe arguments listing only subtitle streams as JSON.
    fn build_args(video_path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_streams",
            "-select_streams",
            "s",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        args.push(video_path.into());
        args
    }

    /// Parses ffprobe JSON output into track descriptors.
    fn parse_probe_output(output: &str) -> Result<Vec<TrackDescriptor>, TrackError> {
        #[derive(Deserialize)]
        struct ProbeOutput {
            #[serde(default)]
            streams: Vec<ProbeStream>,
        }

        #[derive(Deserialize)]
        struct ProbeStream {
            index: Option<u32>,
            codec_type: Option<String>,
            codec_name: Option<String>,
            #[serde(default)]
            tags: ProbeTags,
        }

        #[derive(Deserialize, Default)]
        struct ProbeTags {
            language: Option<String>,
            title: Option<String>,
        }

        let probe: ProbeOutput =
            serde_json::from_str(output).map_err(|e| TrackError::ParseError {
                reason: e.to_string(),
            })?;

        let mut tracks = Vec::new();
        for stream in probe.streams {
            if stream.codec_type.as_deref() != Some("subtitle") {
                continue;
            }

            let ordinal = tracks.len();
            tracks.push(TrackDescriptor::new(
                ordinal,
                stream.index.unwrap_or(ordinal as u32),
                stream.codec_name,
                stream.tags.language,
                stream.tags.title,
            ));
        }

        Ok(tracks)
    }

    async fn try_probe(&self, video_path: &Path) -> Result<Vec<TrackDescriptor>, TrackError> {
        if !video_path.exists() {
            return Err(TrackError::InputNotFound {
                path: video_path.to_path_buf(),
            });
        }

        let output = run_tool(
            "ffprobe",
            &self.ffprobe_path,
            &Self::build_args(video_path),
            self.timeout_secs,
            self.platform,
        )
        .await?;

        if !output.status.success() {
            return Err(TrackError::tool_failed(
                "ffprobe",
                output.status.code(),
                &output.stderr,
            ));
        }

        Self::parse_probe_output(&String::from_utf8_lossy(&output.stdout))
    }
}

#[async_trait]
impl TrackProber for FfprobeProber {
    fn name(&self) -> &str {
        "ffprobe"
    }

    async fn probe(&self, video_path: &Path) -> Vec<TrackDescriptor> {
        match self.try_probe(video_path).await {
            Ok(tracks) => {
                info!(
                    "Found {} subtitle track(s) in {}",
                    tracks.len(),
                    video_path.display()
                );
                tracks
            }
            Err(TrackError::InputNotFound { path }) => {
                debug!("Not probing missing video {}", path.display());
                Vec::new()
            }
            Err(e) => {
                warn!("Could not probe {}: {}", video_path.display(), e);
                Vec::new()
            }
        }
    }
}

/// Subtitle track extractor backed by ffmpeg.
pub struct FfmpegExtractor {
    ffmpeg_path: PathBuf,
    timeout_secs: u64,
    platform: Platform,
}

impl FfmpegExtractor {
    /// Creates an extractor that runs the given ffmpeg binary.
    pub fn new(ffmpeg_path: PathBuf, timeout_secs: u64, platform: Platform) -> Self {
        Self {
            ffmpeg_path,
            timeout_secs,
            platform,
        }
    }

    /// Creates an extractor from the tools configuration.
    pub fn from_config(config: &ToolsConfig, platform: Platform) -> Self {
        let paths = ToolPaths::resolve(config, platform);
        Self::new(paths.ffmpeg, config.extract_timeout_secs, platform)
    }

    /// Builds ffmpeg arguments mapping one subtitle stream into `output_path`.
    ///
    /// `output_path` must already carry the extension of `format`.
    fn build_args(
        video_path: &Path,
        subtitle_ordinal: usize,
        output_path: &Path,
        format: SubtitleFormat,
    ) -> Vec<OsString> {
        vec![
            "-i".into(),
            video_path.into(),
            "-map".into(),
            format!("0:s:{}", subtitle_ordinal).into(),
            "-c:s".into(),
            format.ffmpeg_codec().into(),
            "-y".into(), // Overwrite output
            output_path.into(),
        ]
    }

    async fn try_extract(
        &self,
        video_path: &Path,
        subtitle_ordinal: usize,
        output_path: &Path,
        format: SubtitleFormat,
    ) -> Result<(), TrackError> {
        let args = Self::build_args(video_path, subtitle_ordinal, output_path, format);
        let output = run_tool(
            "ffmpeg",
            &self.ffmpeg_path,
            &args,
            self.timeout_secs,
            self.platform,
        )
        .await?;

        if !output.status.success() {
            return Err(TrackError::tool_failed(
                "ffmpeg",
                output.status.code(),
                &output.stderr,
            ));
        }

        if tokio::fs::metadata(output_path).await.is_err() {
            return Err(TrackError::OutputMissing {
                path: output_path.to_path_buf(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl TrackExtractor for FfmpegExtractor {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn extract(
        &self,
        video_path: &Path,
        subtitle_ordinal: usize,
        output_path: &Path,
        codec_name: &str,
    ) -> bool {
        let format = SubtitleFormat::for_codec(codec_name);
        let output_path = format.apply_to(output_path);

        match self
            .try_extract(video_path, subtitle_ordinal, &output_path, format)
            .await
        {
            Ok(()) => {
                info!(
                    "Extracted subtitle stream 0:s:{} of {} to {}",
                    subtitle_ordinal,
                    video_path.display(),
                    output_path.display()
                );
                true
            }
            Err(e) => {
                warn!(
                    "Could not extract subtitle stream 0:s:{} of {}: {}",
                    subtitle_ordinal,
                    video_path.display(),
                    e
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_probe_output() {
        let json = r#"{
            "streams": [
                {
                    "index": 2,
                    "codec_type": "subtitle",
                    "codec_name": "subrip",
                    "tags": { "language": "en", "title": "English" }
                },
                {
                    "index": 3,
                    "codec_type": "subtitle",
                    "codec_name": "ass",
                    "tags": { "language": "es", "title": "Spanish" }
                }
            ]
        }"#;

        let tracks = FfprobeProber::parse_probe_output(json).unwrap();
        assert_eq!(tracks.len(), 2);

        assert_eq!(tracks[0].ordinal, 0);
        assert_eq!(tracks[0].stream_index, 2);
        assert_eq!(tracks[0].language, "en");
        assert_eq!(tracks[0].display_name, "Track 1 (en) - English [subrip]");

        assert_eq!(tracks[1].ordinal, 1);
        assert_eq!(tracks[1].stream_index, 3);
        assert_eq!(tracks[1].codec_name, "ass");
        assert_eq!(tracks[1].display_name, "Track 2 (es) - Spanish [ass]");
    }

    #[test]
    fn test_parse_probe_output_missing_fields() {
        let json = r#"{ "streams": [ { "codec_type": "subtitle" } ] }"#;

        let tracks = FfprobeProber::parse_probe_output(json).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].stream_index, 0);
        assert_eq!(tracks[0].codec_name, "unknown");
        assert_eq!(tracks[0].language, "unknown");
        assert_eq!(tracks[0].title, "");
        assert_eq!(tracks[0].display_name, "Track 1");
    }

    #[test]
    fn test_parse_probe_output_skips_other_streams() {
        let json = r#"{
            "streams": [
                { "index": 0, "codec_type": "video", "codec_name": "h264" },
                { "index": 4, "codec_type": "subtitle", "codec_name": "webvtt" }
            ]
        }"#;

        let tracks = FfprobeProber::parse_probe_output(json).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].ordinal, 0);
        assert_eq!(tracks[0].stream_index, 4);
    }

    #[test]
    fn test_parse_probe_output_no_streams() {
        assert!(FfprobeProber::parse_probe_output("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_probe_output_malformed() {
        let result = FfprobeProber::parse_probe_output("not json");
        assert!(matches!(result, Err(TrackError::ParseError { .. })));
    }

    #[test]
    fn test_build_probe_args() {
        let args = FfprobeProber::build_args(Path::new("/videos/movie.mkv"));
        assert_eq!(
            args,
            vec![
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_streams",
                "-select_streams",
                "s",
                "/videos/movie.mkv"
            ]
        );
    }

    #[test]
    fn test_build_extract_args_reencode() {
        let args = FfmpegExtractor::build_args(
            Path::new("/videos/movie.mkv"),
            1,
            Path::new("/tmp/movie_extracted_track_3.srt"),
            SubtitleFormat::Srt,
        );
        assert_eq!(
            args,
            vec![
                "-i",
                "/videos/movie.mkv",
                "-map",
                "0:s:1",
                "-c:s",
                "srt",
                "-y",
                "/tmp/movie_extracted_track_3.srt"
            ]
        );
    }

    #[test]
    fn test_build_extract_args_copies_ass() {
        let args = FfmpegExtractor::build_args(
            Path::new("in.mkv"),
            0,
            Path::new("out.ass"),
            SubtitleFormat::Ass,
        );
        let codec_pos = args.iter().position(|a| a == "-c:s").unwrap();
        assert_eq!(args[codec_pos + 1], "copy");
    }

    #[test]
    fn test_extract_request_targets_rewritten_extension() {
        let extractor = FfmpegExtractor::new(PathBuf::from("ffmpeg"), 60, Platform::Linux);
        let resolved = extractor.resolved_output_path(Path::new("x.txt"), "webvtt");
        assert_eq!(resolved, PathBuf::from("x.vtt"));

        let args = FfmpegExtractor::build_args(
            Path::new("in.mkv"),
            0,
            &resolved,
            SubtitleFormat::for_codec("webvtt"),
        );
        assert_eq!(args.last(), Some(&OsString::from("x.vtt")));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_paths_pass_through() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let video = Path::new(OsStr::from_bytes(b"/videos/caf\xe9.mkv"));
        let output = Path::new(OsStr::from_bytes(b"/tmp/caf\xe9_extracted_track_2.srt"));

        let args = FfprobeProber::build_args(video);
        assert_eq!(args.last().map(|a| a.as_os_str()), Some(video.as_os_str()));

        let args = FfmpegExtractor::build_args(video, 0, output, SubtitleFormat::Srt);
        assert_eq!(args[1].as_os_str(), video.as_os_str());
        assert_eq!(args.last().map(|a| a.as_os_str()), Some(output.as_os_str()));
    }

    #[tokio::test]
    async fn test_probe_missing_video_is_empty() {
        let prober = FfprobeProber::new(
            PathBuf::from("/nonexistent/ffprobe"),
            30,
            Platform::current(),
        );
        let tracks = prober.probe(Path::new("/nonexistent/movie.mkv")).await;
        assert!(tracks.is_empty());
    }

    #[tokio::test]
    async fn test_probe_missing_tool_is_empty() {
        let video = tempfile::NamedTempFile::new().unwrap();
        let prober = FfprobeProber::new(
            PathBuf::from("/nonexistent/ffprobe"),
            30,
            Platform::current(),
        );
        assert!(prober.probe(video.path()).await.is_empty());
    }

    #[tokio::test]
    async fn test_extract_missing_tool_fails() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = FfmpegExtractor::new(
            PathBuf::from("/nonexistent/ffmpeg"),
            60,
            Platform::current(),
        );
        let ok = extractor
            .extract(
                Path::new("/nonexistent/movie.mkv"),
                0,
                &dir.path().join("out.srt"),
                "subrip",
            )
            .await;
        assert!(!ok);
    }

    #[test]
    fn test_from_config_uses_resolved_paths() {
        let config = ToolsConfig {
            install_root: PathBuf::from("/opt/subsync"),
            probe_timeout_secs: 5,
            ..Default::default()
        };
        let prober = FfprobeProber::from_config(&config, Platform::Linux);
        assert_eq!(
            prober.ffprobe_path,
            PathBuf::from("/opt/subsync/resources/ffmpeg-bin/ffprobe")
        );
        assert_eq!(prober.timeout_secs, 5);

        let extractor = FfmpegExtractor::from_config(&config, Platform::Linux);
        assert_eq!(
            extractor.ffmpeg_path,
            PathBuf::from("/opt/subsync/resources/ffmpeg-bin/ffmpeg")
        );
        assert_eq!(extractor.timeout_secs, 60);
    }
}
