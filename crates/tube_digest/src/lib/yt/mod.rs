pub mod captions;

use std::{fmt::Debug, future::Future};

use crate::{
    parser::VideoId,
    types::{CaptionFragment, CaptionTrack, TranscriptDocument},
};

/// Language every transcript is resolved to before summarization.
pub const TARGET_LANGUAGE: &str = "en";

/// Seam over the caption-hosting service.
pub trait TranscriptSource {
    type Error: Debug;

    /// Lists the caption tracks available for a video. An error here means
    /// no transcript data is reachable at all (e.g. captions disabled).
    fn list_tracks(
        &self,
        video_id: &VideoId,
    ) -> impl Future<Output = Result<Vec<CaptionTrack>, Self::Error>> + Send;

    /// Fetches the ordered fragments of one track.
    fn fetch_track(
        &self,
        track: &CaptionTrack,
    ) -> impl Future<Output = Result<Vec<CaptionFragment>, Self::Error>> + Send;

    /// Fetches one track translated into `target_language`.
    fn fetch_translated(
        &self,
        track: &CaptionTrack,
        target_language: &str,
    ) -> impl Future<Output = Result<Vec<CaptionFragment>, Self::Error>> + Send;
}

/// The caption tracks of one video, with the selection rules the fallback
/// chain needs.
#[derive(Debug)]
pub struct TrackSet(Vec<CaptionTrack>);

impl TrackSet {
    pub fn new(tracks: Vec<CaptionTrack>) -> Self {
        TrackSet(tracks)
    }

    pub fn find_manual(&self, language: &str) -> Option<&CaptionTrack> {
        self.0
            .iter()
            .find(|t| !t.is_generated() && t.base_language() == language)
    }

    pub fn find_generated(&self, language: &str) -> Option<&CaptionTrack> {
        self.0
            .iter()
            .find(|t| t.is_generated() && t.base_language() == language)
    }

    /// First track that is not in `language` and is marked translatable.
    pub fn first_translatable_other_than(&self, language: &str) -> Option<&CaptionTrack> {
        self.0
            .iter()
            .find(|t| t.base_language() != language && t.is_translatable)
    }
}

/// Resolves an English transcript for `video_id`, or nothing.
///
/// Strict priority order, short-circuiting on first success:
/// 1. manually created English track
/// 2. auto-generated English track
/// 3. the first non-English translatable track, translated to English
///
/// Every failure along the way is absorbed and logged; this function never
/// returns an error to its caller.
#[tracing::instrument(skip(source))]
pub async fn fetch_english_transcript<S: TranscriptSource>(
    source: &S,
    video_id: &VideoId,
) -> Option<TranscriptDocument> {
    let tracks = match source.list_tracks(video_id).await {
        Ok(tracks) => TrackSet::new(tracks),
        Err(e) => {
            tracing::warn!(error = ?e, %video_id, "Failed to list caption tracks");
            return None;
        }
    };

    if let Some(track) = tracks.find_manual(TARGET_LANGUAGE) {
        match source.fetch_track(track).await {
            Ok(fragments) => {
                return Some(TranscriptDocument::new(
                    fragments,
                    track.language_code.clone(),
                ))
            }
            Err(e) => {
                tracing::debug!(error = ?e, "Manual English track fetch failed, falling back")
            }
        }
    }

    if let Some(track) = tracks.find_generated(TARGET_LANGUAGE) {
        match source.fetch_track(track).await {
            Ok(fragments) => {
                return Some(TranscriptDocument::new(
                    fragments,
                    track.language_code.clone(),
                ))
            }
            Err(e) => {
                tracing::debug!(error = ?e, "Generated English track fetch failed, falling back")
            }
        }
    }

    if let Some(track) = tracks.first_translatable_other_than(TARGET_LANGUAGE) {
        match source.fetch_translated(track, TARGET_LANGUAGE).await {
            Ok(fragments) => return Some(TranscriptDocument::new(fragments, TARGET_LANGUAGE)),
            Err(e) => {
                tracing::debug!(error = ?e, source_language = %track.language_code, "Translation fetch failed")
            }
        }
    }

    tracing::warn!(%video_id, "No English transcript could be resolved");
    None
}
