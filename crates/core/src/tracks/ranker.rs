//! Picks the best subtitle track for a language preference.

use super::types::TrackDescriptor;

/// Returns the list position of the best track.
///
/// The first track tagged with `preferred_language` (case-insensitive) wins.
/// Without a match the first track is used. `None` only for an empty list.
pub fn best_track(tracks: &[TrackDescriptor], preferred_language: &str) -> Option<usize> {
    if tracks.is_empty() {
        return None;
    }

    let position = tracks
        .iter()
        .position(|track| track.has_language(preferred_language))
        .unwrap_or(0);

    Some(position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks(languages: &[&str]) -> Vec<TrackDescriptor> {
        languages
            .iter()
            .enumerate()
            .map(|(i, lang)| {
                TrackDescriptor::new(
                    i,
                    i as u32 + 2,
                    Some("subrip".to_string()),
                    Some(lang.to_string()),
                    None,
                )
            })
            .collect()
    }

    #[test]
    fn test_preferred_language_wins() {
        assert_eq!(best_track(&tracks(&["es", "en", "fr"]), "en"), Some(1));
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(best_track(&tracks(&["es", "fr", "fr"]), "fr"), Some(1));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(best_track(&tracks(&["es", "EN"]), "en"), Some(1));
        assert_eq!(best_track(&tracks(&["es", "en"]), "EN"), Some(1));
    }

    #[test]
    fn test_no_match_falls_back_to_first() {
        assert_eq!(best_track(&tracks(&["es", "en", "fr"]), "de"), Some(0));
    }

    #[test]
    fn test_returns_position_not_stream_index() {
        // stream indices are 2, 3 here
        assert_eq!(best_track(&tracks(&["es", "en"]), "en"), Some(1));
    }

    #[test]
    fn test_empty_is_none() {
        assert_eq!(best_track(&[], "en"), None);
    }
}
