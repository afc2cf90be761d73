use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use tube_digest::{
    parser::VideoId,
    types::{CaptionFragment, CaptionTrack},
    yt::TranscriptSource,
};

pub fn caption_track(language_code: &str, generated: bool, translatable: bool) -> CaptionTrack {
    CaptionTrack {
        base_url: format!(
            "https://www.youtube.com/api/timedtext?lang={language_code}&asr={generated}"
        ),
        language_code: language_code.to_string(),
        kind: generated.then(|| "asr".to_string()),
        is_translatable: translatable,
        name: None,
    }
}

pub fn fragments(texts: &[&str]) -> Vec<CaptionFragment> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| CaptionFragment {
            text: text.to_string(),
            start: i as f64,
            duration: 1.0,
        })
        .collect()
}

#[derive(Clone, Default)]
pub struct MockCaptionSource {
    pub tracks: Vec<CaptionTrack>,
    /// Fragments served per track, keyed by base_url.
    pub track_fragments: HashMap<String, Vec<CaptionFragment>>,
    /// Translated fragments served per track, keyed by base_url.
    pub translated_fragments: HashMap<String, Vec<CaptionFragment>>,
    /// Tracks whose fetch (plain or translated) fails.
    pub failing_urls: HashSet<String>,
    pub list_error: Option<String>,

    pub list_calls: Arc<Mutex<Vec<String>>>,
    pub fetch_calls: Arc<Mutex<Vec<String>>>,
    pub translate_calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockCaptionSource {
    pub fn new(tracks: Vec<CaptionTrack>) -> Self {
        Self {
            tracks,
            ..Default::default()
        }
    }

    pub fn failing_list(msg: &str) -> Self {
        Self {
            list_error: Some(msg.to_string()),
            ..Default::default()
        }
    }

    pub fn with_fragments(mut self, track: &CaptionTrack, texts: &[&str]) -> Self {
        self.track_fragments
            .insert(track.base_url.clone(), fragments(texts));
        self
    }

    pub fn with_translation(mut self, track: &CaptionTrack, texts: &[&str]) -> Self {
        self.translated_fragments
            .insert(track.base_url.clone(), fragments(texts));
        self
    }

    pub fn with_failing_fetch(mut self, track: &CaptionTrack) -> Self {
        self.failing_urls.insert(track.base_url.clone());
        self
    }
}

impl TranscriptSource for MockCaptionSource {
    type Error = anyhow::Error;

    async fn list_tracks(&self, video_id: &VideoId) -> anyhow::Result<Vec<CaptionTrack>> {
        self.list_calls.lock().unwrap().push(video_id.to_string());
        if let Some(ref msg) = self.list_error {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.tracks.clone())
    }

    async fn fetch_track(&self, track: &CaptionTrack) -> anyhow::Result<Vec<CaptionFragment>> {
        self.fetch_calls.lock().unwrap().push(track.base_url.clone());
        if self.failing_urls.contains(&track.base_url) {
            return Err(anyhow::anyhow!("timedtext fetch failed"));
        }
        Ok(self
            .track_fragments
            .get(&track.base_url)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_translated(
        &self,
        track: &CaptionTrack,
        target_language: &str,
    ) -> anyhow::Result<Vec<CaptionFragment>> {
        self.translate_calls
            .lock()
            .unwrap()
            .push((track.base_url.clone(), target_language.to_string()));
        if self.failing_urls.contains(&track.base_url) {
            return Err(anyhow::anyhow!("translation fetch failed"));
        }
        Ok(self
            .translated_fragments
            .get(&track.base_url)
            .cloned()
            .unwrap_or_default())
    }
}
