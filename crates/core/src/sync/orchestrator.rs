//! Sync job orchestration: probe, select, extract, launch.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::alass::AlassLauncher;
use super::cleanup::{extracted_track_path, ArtifactCleaner};
use super::error::SyncError;
use super::types::{ReferenceFile, SyncJob, SyncRequest};
use crate::config::Config;
use crate::platform::Platform;
use crate::selection::{resolve_track, SelectionContext};
use crate::tracks::{FfmpegExtractor, FfprobeProber, TrackExtractor, TrackProber};

/// Turns a sync request into a running alass process.
///
/// The reference handed to alass is an extracted subtitle track when one can
/// be found and extracted, otherwise the video itself.
pub struct SyncOrchestrator<P: TrackProber, E: TrackExtractor> {
    prober: P,
    extractor: E,
    launcher: AlassLauncher,
    cleaner: ArtifactCleaner,
    /// When false, no probing or extraction happens at all.
    selection_enabled: bool,
}

impl SyncOrchestrator<FfprobeProber, FfmpegExtractor> {
    /// Creates the ffprobe/ffmpeg/alass orchestrator from configuration.
    pub fn from_config(config: &Config, platform: Platform) -> Self {
        Self::new(
            FfprobeProber::from_config(&config.tools, platform),
            FfmpegExtractor::from_config(&config.tools, platform),
            AlassLauncher::from_config(&config.tools, &config.sync, platform),
            config.sync.temp_dir(),
        )
        .with_selection_enabled(config.selection.enabled)
    }
}

impl<P: TrackProber, E: TrackExtractor> SyncOrchestrator<P, E> {
    /// Creates an orchestrator writing extracted tracks to `temp_dir`.
    pub fn new(prober: P, extractor: E, launcher: AlassLauncher, temp_dir: PathBuf) -> Self {
        Self {
            prober,
            extractor,
            launcher,
            cleaner: ArtifactCleaner::new(temp_dir),
            selection_enabled: true,
        }
    }

    /// Enables or disables subtitle track lookup.
    pub fn with_selection_enabled(mut self, enabled: bool) -> Self {
        self.selection_enabled = enabled;
        self
    }

    /// Cleaner for the artifacts this orchestrator creates.
    pub fn cleaner(&self) -> &ArtifactCleaner {
        &self.cleaner
    }

    pub fn prober(&self) -> &P {
        &self.prober
    }

    /// Works out which file alass should use as its timing reference.
    ///
    /// Never fails: anything that goes wrong falls back to the video.
    pub async fn resolve_reference(
        &self,
        video_path: &Path,
        context: &SelectionContext,
    ) -> ReferenceFile {
        let fallback = || ReferenceFile::Video(video_path.to_path_buf());

        if !self.selection_enabled {
            debug!("Track selection disabled, using video as reference");
            return fallback();
        }

        let tracks = self.prober.probe(video_path).await;
        let Some(track) = resolve_track(context, &tracks) else {
            info!(
                "No subtitle track selected for {}, using video as reference",
                video_path.display()
            );
            return fallback();
        };

        let temp_dir = self.cleaner.temp_dir();
        if let Err(e) = tokio::fs::create_dir_all(temp_dir).await {
            warn!(
                "Could not create temp directory {}: {}",
                temp_dir.display(),
                e
            );
            return fallback();
        }

        let requested = extracted_track_path(temp_dir, video_path, track.stream_index);
        let path = self
            .extractor
            .resolved_output_path(&requested, &track.codec_name);

        if self
            .extractor
            .extract(video_path, track.ordinal, &requested, &track.codec_name)
            .await
        {
            ReferenceFile::Extracted { path, track }
        } else {
            // a failed run may still leave a partial file behind
            self.cleaner.cleanup(&path).await;
            info!(
                "Extraction of {} failed, using video as reference",
                track
            );
            fallback()
        }
    }

    /// Resolves the reference and starts alass in the background.
    ///
    /// Returns as soon as the process is spawned. If alass cannot be started,
    /// any extracted reference is removed before the error is returned.
    pub async fn synchronize(
        &self,
        request: &SyncRequest,
        context: &SelectionContext,
    ) -> Result<SyncJob, SyncError> {
        let reference = self.resolve_reference(&request.video_path, context).await;

        let args = self.launcher.build_args(
            reference.path(),
            &request.subtitle_path,
            &request.output_path,
            &request.extra_args,
        );

        let process = match self.launcher.launch(
            reference.path(),
            &request.subtitle_path,
            &request.output_path,
            &request.extra_args,
        ) {
            Ok(process) => process,
            Err(e) => {
                if let Some(path) = reference.extracted_path() {
                    self.cleaner.cleanup(path).await;
                }
                return Err(e);
            }
        };

        Ok(SyncJob {
            reference,
            subtitle_path: request.subtitle_path.clone(),
            output_path: request.output_path.clone(),
            args,
            process,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::AlassOptions;
    use crate::testing::fixtures::{english_and_spanish, track};
    use crate::testing::{MockExtractor, MockProber, MockSelector};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn orchestrator(
        prober: MockProber,
        extractor: MockExtractor,
        temp: &TempDir,
    ) -> SyncOrchestrator<MockProber, MockExtractor> {
        let launcher = AlassLauncher::new(
            PathBuf::from("/nonexistent/alass-cli"),
            Platform::current(),
            AlassOptions::default(),
        );
        SyncOrchestrator::new(prober, extractor, launcher, temp.path().to_path_buf())
    }

    #[tokio::test]
    async fn test_auto_select_extracts_preferred_track() {
        let temp = TempDir::new().unwrap();
        let prober = MockProber::new();
        prober.set_tracks(english_and_spanish()).await;
        let extractor = MockExtractor::new();
        let orch = orchestrator(prober, extractor.clone(), &temp);

        let context = SelectionContext::new("es").with_auto_select(true);
        let reference = orch
            .resolve_reference(Path::new("/videos/movie.mkv"), &context)
            .await;

        let expected = temp.path().join("movie_extracted_track_3.srt");
        assert_eq!(reference.path(), expected.as_path());
        assert!(reference.is_extracted());

        let calls = extractor.recorded_extractions().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].subtitle_ordinal, 1);
        assert_eq!(calls[0].output_path, expected);
        assert_eq!(calls[0].video_path, PathBuf::from("/videos/movie.mkv"));
    }

    #[tokio::test]
    async fn test_no_tracks_falls_back_to_video() {
        let temp = TempDir::new().unwrap();
        let extractor = MockExtractor::new();
        let orch = orchestrator(MockProber::new(), extractor.clone(), &temp);

        let context = SelectionContext::new("en").with_auto_select(true);
        let reference = orch
            .resolve_reference(Path::new("/videos/movie.mkv"), &context)
            .await;

        assert_eq!(reference, ReferenceFile::Video(PathBuf::from("/videos/movie.mkv")));
        assert_eq!(extractor.extraction_count().await, 0);
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_extraction_failure_falls_back_to_video() {
        let temp = TempDir::new().unwrap();
        let prober = MockProber::new();
        prober.set_tracks(vec![track(0, 2, "en", "subrip")]).await;
        let extractor = MockExtractor::new();
        extractor.set_succeed(false).await;
        let orch = orchestrator(prober, extractor.clone(), &temp);

        let reference = orch
            .resolve_reference(Path::new("/videos/movie.mkv"), &SelectionContext::new("en"))
            .await;

        assert_eq!(reference, ReferenceFile::Video(PathBuf::from("/videos/movie.mkv")));
        assert_eq!(extractor.extraction_count().await, 1);
    }

    #[tokio::test]
    async fn test_reference_extension_follows_codec() {
        let temp = TempDir::new().unwrap();
        let prober = MockProber::new();
        prober.set_tracks(vec![track(0, 4, "en", "ass")]).await;
        let orch = orchestrator(prober, MockExtractor::new(), &temp);

        let reference = orch
            .resolve_reference(Path::new("/videos/show.mkv"), &SelectionContext::new("en"))
            .await;

        assert_eq!(
            reference.path(),
            temp.path().join("show_extracted_track_4.ass").as_path()
        );
    }

    #[tokio::test]
    async fn test_pre_selected_track_is_extracted() {
        let temp = TempDir::new().unwrap();
        let prober = MockProber::new();
        prober.set_tracks(english_and_spanish()).await;
        let extractor = MockExtractor::new();
        let orch = orchestrator(prober.clone(), extractor.clone(), &temp);

        let context = SelectionContext::new("en").with_selected_track(track(2, 6, "fr", "subrip"));
        let reference = orch
            .resolve_reference(Path::new("/videos/movie.mkv"), &context)
            .await;

        assert!(reference.is_extracted());
        assert_eq!(prober.probe_count().await, 1);
        let calls = extractor.recorded_extractions().await;
        assert_eq!(calls[0].subtitle_ordinal, 2);
        assert_eq!(calls[0].output_path, temp.path().join("movie_extracted_track_6.srt"));
    }

    #[tokio::test]
    async fn test_pre_selected_track_without_probed_tracks_uses_video() {
        let temp = TempDir::new().unwrap();
        let prober = MockProber::new();
        let extractor = MockExtractor::new();
        let orch = orchestrator(prober.clone(), extractor.clone(), &temp);

        let context = SelectionContext::new("en").with_selected_track(track(0, 2, "en", "subrip"));
        let reference = orch
            .resolve_reference(Path::new("/nonexistent/movie.mkv"), &context)
            .await;

        assert_eq!(
            reference,
            ReferenceFile::Video(PathBuf::from("/nonexistent/movie.mkv"))
        );
        assert_eq!(prober.probe_count().await, 1);
        assert_eq!(extractor.extraction_count().await, 0);
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_selector_cancel_falls_back_to_video() {
        let temp = TempDir::new().unwrap();
        let prober = MockProber::new();
        prober.set_tracks(english_and_spanish()).await;
        let extractor = MockExtractor::new();
        let orch = orchestrator(prober, extractor.clone(), &temp);

        let context =
            SelectionContext::new("en").with_selector(Arc::new(MockSelector::cancelling()));
        let reference = orch
            .resolve_reference(Path::new("/videos/movie.mkv"), &context)
            .await;

        assert!(!reference.is_extracted());
        assert_eq!(extractor.extraction_count().await, 0);
    }

    #[tokio::test]
    async fn test_selection_disabled_uses_video() {
        let temp = TempDir::new().unwrap();
        let prober = MockProber::new();
        prober.set_tracks(vec![track(0, 2, "en", "subrip")]).await;
        let orch = orchestrator(prober.clone(), MockExtractor::new(), &temp)
            .with_selection_enabled(false);

        let reference = orch
            .resolve_reference(Path::new("/videos/movie.mkv"), &SelectionContext::new("en"))
            .await;

        assert!(!reference.is_extracted());
        assert_eq!(prober.probe_count().await, 0);
    }

    #[tokio::test]
    async fn test_spawn_failure_removes_extracted_reference() {
        let temp = TempDir::new().unwrap();
        let prober = MockProber::new();
        prober.set_tracks(vec![track(0, 2, "en", "subrip")]).await;
        let orch = orchestrator(prober, MockExtractor::new(), &temp);

        let request = SyncRequest::new("/videos/movie.mkv", "/subs/movie.srt", "/subs/out.srt");
        let result = orch
            .synchronize(&request, &SelectionContext::new("en"))
            .await;

        assert!(matches!(result, Err(SyncError::SynchronizerNotFound { .. })));
        assert!(!temp.path().join("movie_extracted_track_2.srt").exists());
    }
}
