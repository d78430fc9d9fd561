//! Resolves the single track a sync job uses.

use tracing::{debug, info};

use super::types::SelectionContext;
use crate::tracks::{best_track, TrackDescriptor};

/// Resolves one track from the context and the probed list.
///
/// No probed tracks always resolves to `None`, even with a pre-selected
/// track. Otherwise, first match wins:
/// 1. A pre-selected track is used verbatim, without checking it against the
///    probed list.
/// 2. With auto-select, or exactly one probed track, the ranker decides.
/// 3. Otherwise the selector is asked; without one the first track is used.
pub fn resolve_track(
    context: &SelectionContext,
    tracks: &[TrackDescriptor],
) -> Option<TrackDescriptor> {
    if tracks.is_empty() {
        return None;
    }

    if let Some(track) = &context.selected_track {
        debug!("Using pre-selected track: {}", track);
        return Some(track.clone());
    }

    if context.auto_select || tracks.len() == 1 {
        let position = best_track(tracks, &context.preferred_language)?;
        let track = tracks[position].clone();
        info!(
            "Auto-selected track {} (preferred language: {})",
            track, context.preferred_language
        );
        return Some(track);
    }

    match &context.selector {
        Some(selector) => {
            let choice = selector.select_one(tracks);
            match &choice {
                Some(track) => info!("{} selected track {}", selector.name(), track),
                None => info!("Track selection cancelled via {}", selector.name()),
            }
            choice
        }
        None => {
            debug!(
                "{} tracks and no selector, using the first one",
                tracks.len()
            );
            tracks.first().cloned()
        }
    }
}
