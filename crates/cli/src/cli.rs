use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "subsync")]
#[command(author, version, about = "Subtitle synchronization against embedded subtitle tracks")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "SUBSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the subtitle tracks embedded in a video
    Tracks {
        /// Video file to probe
        #[arg(required = true)]
        video: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Synchronize a subtitle file against a video
    Sync(SyncArgs),
}

#[derive(clap::Args)]
pub struct SyncArgs {
    /// Video providing the timing reference
    pub video: PathBuf,

    /// Subtitle file to synchronize
    pub subtitle: PathBuf,

    /// Where the synchronized subtitle is written
    pub output: PathBuf,

    /// Pick the best track for the preferred language without asking
    #[arg(long)]
    pub auto: bool,

    /// Preferred subtitle language (overrides config)
    #[arg(long)]
    pub language: Option<String>,

    /// Use the subtitle track with this ordinal (as listed by `tracks`, zero-based)
    #[arg(long, conflicts_with = "auto")]
    pub track: Option<usize>,

    /// Never ask which track to use
    #[arg(long)]
    pub no_prompt: bool,

    /// Keep the extracted reference track after syncing (overrides config)
    #[arg(long, value_name = "BOOL")]
    pub keep_extracted: Option<bool>,

    /// Extra arguments passed through to alass
    #[arg(last = true)]
    pub extra: Vec<String>,
}
