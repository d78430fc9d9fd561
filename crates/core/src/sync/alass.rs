//! Launching the alass synchronizer.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::{Child, Command};
use tracing::info;

use super::error::SyncError;
use crate::config::{SyncConfig, ToolPaths, ToolsConfig};
use crate::platform::Platform;

/// alass tuning flags taken from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AlassOptions {
    pub split_penalty: f64,
    pub disable_fps_guessing: bool,
    pub disable_speed_optimization: bool,
    /// Appended after the tuning flags on every run.
    pub extra_args: Vec<String>,
}

impl Default for AlassOptions {
    fn default() -> Self {
        Self::from_config(&SyncConfig::default())
    }
}

impl AlassOptions {
    pub fn from_config(config: &SyncConfig) -> Self {
        Self {
            split_penalty: config.split_penalty,
            disable_fps_guessing: config.disable_fps_guessing,
            disable_speed_optimization: config.disable_speed_optimization,
            extra_args: config.extra_args.clone(),
        }
    }

    fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "--split-penalty".to_string(),
            self.split_penalty.to_string(),
        ];
        if self.disable_fps_guessing {
            args.push("--disable-fps-guessing".to_string());
        }
        if self.disable_speed_optimization {
            args.extend(["--speed-optimization".to_string(), "0".to_string()]);
        }
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

/// Starts alass runs in the background.
#[derive(Debug, Clone)]
pub struct AlassLauncher {
    alass_path: PathBuf,
    platform: Platform,
    options: AlassOptions,
}

impl AlassLauncher {
    pub fn new(alass_path: PathBuf, platform: Platform, options: AlassOptions) -> Self {
        Self {
            alass_path,
            platform,
            options,
        }
    }

    /// Creates a launcher from the tools and sync configuration.
    pub fn from_config(tools: &ToolsConfig, sync: &SyncConfig, platform: Platform) -> Self {
        let paths = ToolPaths::resolve(tools, platform);
        Self::new(paths.alass, platform, AlassOptions::from_config(sync))
    }

    pub fn alass_path(&self) -> &Path {
        &self.alass_path
    }

    /// Builds `reference subtitle output`, then configured flags, then `extra_args`.
    pub fn build_args(
        &self,
        reference: &Path,
        subtitle: &Path,
        output: &Path,
        extra_args: &[String],
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![reference.into(), subtitle.into(), output.into()];
        args.extend(self.options.to_args().into_iter().map(OsString::from));
        args.extend(extra_args.iter().map(OsString::from));
        args
    }

    /// Spawns alass without waiting for it.
    ///
    /// stdout and stderr are piped for the caller to read. The process keeps
    /// running if the handle is dropped.
    pub fn launch(
        &self,
        reference: &Path,
        subtitle: &Path,
        output: &Path,
        extra_args: &[String],
    ) -> Result<Child, SyncError> {
        let args = self.build_args(reference, subtitle, output, extra_args);

        let mut command = Command::new(&self.alass_path);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        self.platform.hide_console_window(&mut command);

        let child = command
            .spawn()
            .map_err(|e| SyncError::spawn_failed(self.alass_path.clone(), e))?;

        info!(
            "Started alass (pid {:?}) with reference {}",
            child.id(),
            reference.display()
        );
        Ok(child)
    }
}
