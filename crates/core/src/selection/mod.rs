//! Selection module for choosing the reference subtitle track.
//!
//! A track is chosen explicitly by the caller, automatically by language
//! preference, or interactively through a [`TrackSelector`] collaborator.
//! The core never depends on how the collaborator presents the choice.

mod resolver;
mod traits;
mod types;

pub use resolver::resolve_track;
pub use traits::TrackSelector;
pub use types::SelectionContext;
