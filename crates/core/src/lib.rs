pub mod config;
pub mod platform;
pub mod selection;
pub mod sync;
pub mod testing;
pub mod tracks;

pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config,
    ConfigError, SelectionConfig, SyncConfig, ToolPaths, ToolsConfig,
};
pub use platform::Platform;
pub use selection::{resolve_track, SelectionContext, TrackSelector};
pub use sync::{
    extracted_track_path, AlassLauncher, AlassOptions, ArtifactCleaner, ReferenceFile, SyncError,
    SyncJob, SyncOrchestrator, SyncOutcome, SyncRequest, EXTRACTED_TRACK_MARKER,
};
pub use tracks::{
    best_track, FfmpegExtractor, FfprobeProber, SubtitleFormat, TrackDescriptor, TrackError,
    TrackExtractor, TrackProber,
};
