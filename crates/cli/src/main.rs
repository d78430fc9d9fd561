mod cli;
mod prompt;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use subsync_core::{
    load_config, load_config_from_env, validate_config, Config, FfprobeProber, Platform,
    SelectionContext, SyncOrchestrator, SyncRequest, TrackProber,
};

use cli::{Cli, Commands, SyncArgs};
use prompt::PromptSelector;

/// Config file picked up from the working directory when none is named.
const DEFAULT_CONFIG_FILE: &str = "subsync.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = load(cli.config.as_deref())?;
    validate_config(&config).context("Configuration validation failed")?;

    let platform = Platform::current();
    info!("Running on {}", platform);

    match cli.command {
        Commands::Tracks { video, json } => list_tracks(&config, platform, &video, json).await,
        Commands::Sync(args) => sync(&config, platform, args).await,
    }
}

fn load(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                info!("No config file, using defaults");
                return load_config_from_env().context("Failed to load config from environment");
            }
            default
        }
    };

    info!("Loading configuration from {:?}", path);
    load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))
}

async fn list_tracks(config: &Config, platform: Platform, video: &Path, json: bool) -> Result<()> {
    let prober = FfprobeProber::from_config(&config.tools, platform);
    let tracks = prober.probe(video).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&tracks)?);
    } else if tracks.is_empty() {
        println!("No subtitle tracks found in {}", video.display());
    } else {
        for track in &tracks {
            println!("{}\t{}", track.ordinal, track.display_name);
        }
    }

    Ok(())
}

async fn sync(config: &Config, platform: Platform, args: SyncArgs) -> Result<()> {
    let orchestrator = SyncOrchestrator::from_config(config, platform);

    let mut context = SelectionContext::from_config(&config.selection);
    if let Some(language) = args.language {
        context.preferred_language = language;
    }
    if args.auto {
        context = context.with_auto_select(true);
    }
    if !args.no_prompt {
        context = context.with_selector(Arc::new(PromptSelector::new()));
    }

    if let Some(ordinal) = args.track {
        let tracks = orchestrator.prober().probe(&args.video).await;
        let Some(track) = tracks.into_iter().find(|t| t.ordinal == ordinal) else {
            bail!(
                "No subtitle track {} in {}",
                ordinal,
                args.video.display()
            );
        };
        info!("Using requested {}", track);
        context = context.with_selected_track(track);
    }

    let request = SyncRequest::new(args.video, args.subtitle, args.output)
        .with_extra_args(args.extra);

    let job = orchestrator
        .synchronize(&request, &context)
        .await
        .context("Failed to start alass")?;
    info!("Reference: {}", job.reference.path().display());

    let keep_extracted = args
        .keep_extracted
        .unwrap_or(config.sync.keep_extracted_subtitles);
    let outcome = job.wait(orchestrator.cleaner(), keep_extracted).await?;

    if !outcome.stdout.is_empty() {
        print!("{}", outcome.stdout);
    }
    if !outcome.stderr.is_empty() {
        eprint!("{}", outcome.stderr);
    }

    if !outcome.succeeded() {
        bail!(
            "No synchronized output produced at {} (alass exit code {:?})",
            request.output_path.display(),
            outcome.status.code()
        );
    }

    Ok(())
}
