//! Resolution of the external tool executables.

use std::path::{Path, PathBuf};

use super::types::ToolsConfig;
use crate::platform::Platform;

const FFMPEG_BIN_DIR: &str = "resources/ffmpeg-bin";
const ALASS_BIN_DIR: &str = "resources/alass-bin";

/// Paths to the external executables used by a sync job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    /// Media inspector (ffprobe).
    pub ffprobe: PathBuf,
    /// Media transcoder (ffmpeg).
    pub ffmpeg: PathBuf,
    /// External synchronizer (alass-cli).
    pub alass: PathBuf,
}

impl ToolPaths {
    /// Resolves tool paths relative to the install root, honoring explicit overrides.
    pub fn resolve(config: &ToolsConfig, platform: Platform) -> Self {
        let root = config.install_root.as_path();
        Self {
            ffprobe: config
                .ffprobe_path
                .clone()
                .unwrap_or_else(|| bundled(root, FFMPEG_BIN_DIR, "ffprobe", platform)),
            ffmpeg: config
                .ffmpeg_path
                .clone()
                .unwrap_or_else(|| bundled(root, FFMPEG_BIN_DIR, "ffmpeg", platform)),
            alass: config
                .alass_path
                .clone()
                .unwrap_or_else(|| bundled(root, ALASS_BIN_DIR, "alass-cli", platform)),
        }
    }
}

fn bundled(root: &Path, dir: &str, name: &str, platform: Platform) -> PathBuf {
    root.join(dir).join(platform.executable_name(name))
}
