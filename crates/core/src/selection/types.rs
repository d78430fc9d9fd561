//! Types for the selection module.

use std::sync::Arc;

use super::traits::TrackSelector;
use crate::config::SelectionConfig;
use crate::tracks::TrackDescriptor;

/// Inputs that decide which subtitle track a sync job uses.
#[derive(Clone)]
pub struct SelectionContext {
    /// Track chosen up front by the caller, used as-is.
    pub selected_track: Option<TrackDescriptor>,
    /// Pick a track with the ranker even when several exist.
    pub auto_select: bool,
    /// Language the ranker prefers.
    pub preferred_language: String,
    /// Collaborator consulted when several tracks exist and nothing else decides.
    pub selector: Option<Arc<dyn TrackSelector>>,
}

impl SelectionContext {
    /// Creates a context with no pre-selection and no collaborator.
    pub fn new(preferred_language: impl Into<String>) -> Self {
        Self {
            selected_track: None,
            auto_select: false,
            preferred_language: preferred_language.into(),
            selector: None,
        }
    }

    /// Creates a context from the selection configuration.
    pub fn from_config(config: &SelectionConfig) -> Self {
        Self::new(config.preferred_language.clone()).with_auto_select(config.auto_select)
    }

    /// Uses the given track regardless of what probing finds.
    pub fn with_selected_track(mut self, track: TrackDescriptor) -> Self {
        self.selected_track = Some(track);
        self
    }

    /// Sets the auto-select flag.
    pub fn with_auto_select(mut self, auto_select: bool) -> Self {
        self.auto_select = auto_select;
        self
    }

    /// Sets the interactive collaborator.
    pub fn with_selector(mut self, selector: Arc<dyn TrackSelector>) -> Self {
        self.selector = Some(selector);
        self
    }
}

impl std::fmt::Debug for SelectionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionContext")
            .field("selected_track", &self.selected_track)
            .field("auto_select", &self.auto_select)
            .field("preferred_language", &self.preferred_language)
            .field("selector", &self.selector.as_ref().map(|s| s.name().to_string()))
            .finish()
    }
}
