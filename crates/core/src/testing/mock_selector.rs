//! Mock interactive selector for testing.

use std::sync::Mutex;

use crate::selection::TrackSelector;
use crate::tracks::TrackDescriptor;

/// Mock implementation of the TrackSelector trait.
///
/// Answers with a fixed list position (or cancels) and remembers what it was
/// offered.
#[derive(Debug)]
pub struct MockSelector {
    choice: Option<usize>,
    offered: Mutex<Vec<Vec<TrackDescriptor>>>,
}

impl MockSelector {
    /// A selector that picks the track at `position`.
    pub fn choosing(position: usize) -> Self {
        Self {
            choice: Some(position),
            offered: Mutex::new(Vec::new()),
        }
    }

    /// A selector that always cancels.
    pub fn cancelling() -> Self {
        Self {
            choice: None,
            offered: Mutex::new(Vec::new()),
        }
    }

    /// Number of times the selector was asked.
    pub fn call_count(&self) -> usize {
        self.offered.lock().map(|o| o.len()).unwrap_or(0)
    }

    /// The list offered on the most recent call.
    pub fn last_offered(&self) -> Option<Vec<TrackDescriptor>> {
        self.offered.lock().ok().and_then(|o| o.last().cloned())
    }
}

impl TrackSelector for MockSelector {
    fn name(&self) -> &str {
        "mock"
    }

    fn select_one(&self, tracks: &[TrackDescriptor]) -> Option<TrackDescriptor> {
        if let Ok(mut offered) = self.offered.lock() {
            offered.push(tracks.to_vec());
        }
        self.choice.and_then(|position| tracks.get(position).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choosing_out_of_range_is_none() {
        let selector = MockSelector::choosing(3);
        let tracks = vec![TrackDescriptor::new(0, 0, None, None, None)];
        assert_eq!(selector.select_one(&tracks), None);
        assert_eq!(selector.call_count(), 1);
    }

    #[test]
    fn test_cancelling() {
        let selector = MockSelector::cancelling();
        assert_eq!(selector.select_one(&[]), None);
        assert_eq!(selector.last_offered(), Some(Vec::new()));
    }
}
