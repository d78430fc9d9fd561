//! Sync module for running alass against an embedded subtitle reference.
//!
//! The orchestrator probes the video, resolves one subtitle track, extracts it
//! into the temp directory and launches alass with it as the timing reference.
//! When no track can be used, the video itself becomes the reference.
//!
//! # Example
//!
//! ```ignore
//! use subsync_core::sync::{SyncOrchestrator, SyncRequest};
//! use subsync_core::selection::SelectionContext;
//!
//! let orchestrator = SyncOrchestrator::from_config(&config, platform);
//! let request = SyncRequest::new("/videos/movie.mkv", "/subs/movie.srt", "/subs/movie.synced.srt");
//! let context = SelectionContext::from_config(&config.selection);
//!
//! let job = orchestrator.synchronize(&request, &context).await?;
//! let outcome = job
//!     .wait(orchestrator.cleaner(), config.sync.keep_extracted_subtitles)
//!     .await?;
//! println!("alass exited with {}", outcome.status);
//! ```

mod alass;
mod cleanup;
mod error;
mod orchestrator;
mod types;

pub use alass::{AlassLauncher, AlassOptions};
pub use cleanup::{extracted_track_path, ArtifactCleaner, EXTRACTED_TRACK_MARKER};
pub use error::SyncError;
pub use orchestrator::SyncOrchestrator;
pub use types::{ReferenceFile, SyncJob, SyncOutcome, SyncRequest};
