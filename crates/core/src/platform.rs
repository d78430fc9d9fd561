//! Platform capability.
//!
//! The platform is resolved once at startup and handed to everything that needs
//! to build executable names or spawn external tools.

use tokio::process::Command;

/// Windows `CREATE_NO_WINDOW` process creation flag.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// The platform the external tools run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Darwin,
    Linux,
}

impl Platform {
    /// Resolves the platform of the running binary.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::Darwin
        } else {
            Self::Linux
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }

    /// Returns the file name of an executable on this platform.
    pub fn executable_name(&self, base: &str) -> String {
        if self.is_windows() {
            format!("{}.exe", base)
        } else {
            base.to_string()
        }
    }

    /// Keeps spawned console tools from opening a window.
    ///
    /// Only has an effect on Windows builds.
    pub fn hide_console_window(&self, command: &mut Command) {
        #[cfg(windows)]
        if self.is_windows() {
            command.creation_flags(CREATE_NO_WINDOW);
        }

        #[cfg(not(windows))]
        let _ = command;
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Windows => "Windows",
            Self::Darwin => "Darwin",
            Self::Linux => "Linux",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executable_name_windows() {
        assert_eq!(Platform::Windows.executable_name("ffprobe"), "ffprobe.exe");
    }

    #[test]
    fn test_executable_name_unix() {
        assert_eq!(Platform::Linux.executable_name("ffprobe"), "ffprobe");
        assert_eq!(Platform::Darwin.executable_name("alass-cli"), "alass-cli");
    }

    #[test]
    fn test_current_matches_target() {
        let platform = Platform::current();
        assert_eq!(platform.is_windows(), cfg!(target_os = "windows"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Platform::Darwin.to_string(), "Darwin");
    }
}
