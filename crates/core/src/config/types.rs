use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

/// External tool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// Installation root the bundled tools are resolved against
    /// (default: directory of the running executable).
    /// Tools live under `resources/ffmpeg-bin` and `resources/alass-bin`.
    #[serde(default = "default_install_root")]
    pub install_root: PathBuf,
    /// Explicit ffprobe path, overrides the bundled one
    #[serde(default)]
    pub ffprobe_path: Option<PathBuf>,
    /// Explicit ffmpeg path, overrides the bundled one
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,
    /// Explicit alass path, overrides the bundled one
    #[serde(default)]
    pub alass_path: Option<PathBuf>,
    /// Timeout for probing subtitle tracks (default: 30)
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
    /// Timeout for extracting a subtitle track (default: 60)
    #[serde(default = "default_extract_timeout")]
    pub extract_timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            install_root: default_install_root(),
            ffprobe_path: None,
            ffmpeg_path: None,
            alass_path: None,
            probe_timeout_secs: default_probe_timeout(),
            extract_timeout_secs: default_extract_timeout(),
        }
    }
}

/// Directory holding the running executable, or `.` when it cannot be found.
fn default_install_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_probe_timeout() -> u64 {
    30
}

fn default_extract_timeout() -> u64 {
    60
}

/// Subtitle track selection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectionConfig {
    /// Look for embedded subtitle tracks in the video at all.
    /// When disabled the video itself is handed to the synchronizer.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Language code preferred by automatic selection
    #[serde(default = "default_language")]
    pub preferred_language: String,
    /// Pick a track automatically instead of asking
    #[serde(default)]
    pub auto_select: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            preferred_language: default_language(),
            auto_select: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    "en".to_string()
}

/// Synchronizer configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Keep extracted reference subtitles after the job finishes
    #[serde(default = "default_true")]
    pub keep_extracted_subtitles: bool,
    /// Extra arguments appended to every alass invocation
    #[serde(default)]
    pub extra_args: Vec<String>,
    /// alass split penalty (default: 7)
    #[serde(default = "default_split_penalty")]
    pub split_penalty: f64,
    #[serde(default)]
    pub disable_fps_guessing: bool,
    #[serde(default)]
    pub disable_speed_optimization: bool,
    /// Directory for extracted reference subtitles (default: system temp dir)
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            keep_extracted_subtitles: true,
            extra_args: Vec::new(),
            split_penalty: default_split_penalty(),
            disable_fps_guessing: false,
            disable_speed_optimization: false,
            temp_dir: None,
        }
    }
}

fn default_split_penalty() -> f64 {
    7.0
}

impl SyncConfig {
    /// Directory extracted tracks are written to.
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tools.install_root, default_install_root());
        assert_eq!(config.tools.probe_timeout_secs, 30);
        assert_eq!(config.tools.extract_timeout_secs, 60);
        assert!(config.selection.enabled);
        assert_eq!(config.selection.preferred_language, "en");
        assert!(!config.selection.auto_select);
        assert!(config.sync.keep_extracted_subtitles);
        assert_eq!(config.sync.split_penalty, 7.0);
        assert!(config.sync.extra_args.is_empty());
    }

    #[test]
    fn test_sync_temp_dir_fallback() {
        let sync = SyncConfig::default();
        assert_eq!(sync.temp_dir(), std::env::temp_dir());

        let sync = SyncConfig {
            temp_dir: Some(PathBuf::from("/scratch")),
            ..Default::default()
        };
        assert_eq!(sync.temp_dir(), PathBuf::from("/scratch"));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed.selection.preferred_language,
            config.selection.preferred_language
        );
    }
}
