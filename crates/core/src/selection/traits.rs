//! Trait definitions for the selection module.

use crate::tracks::TrackDescriptor;

/// Interactive collaborator that lets a user choose among several tracks.
///
/// Called synchronously with the full probed list. Returning `None` means the
/// user cancelled. Implementations may block (a terminal prompt, a dialog).
pub trait TrackSelector: Send + Sync {
    /// Returns the name of this selector implementation.
    fn name(&self) -> &str;

    /// Asks for one of `tracks`.
    fn select_one(&self, tracks: &[TrackDescriptor]) -> Option<TrackDescriptor>;
}
