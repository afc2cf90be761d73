//! # Caption client
//!
//! Talks to YouTube's watch page and timedtext endpoint to list and fetch
//! caption tracks for a single video.

use std::{ops::Deref, sync::LazyLock};

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::{
    parser::VideoId,
    types::{CaptionFragment, CaptionTrack, PlayerResponse, TimedTextBody},
    yt::TranscriptSource,
};

static PLAYER_RESPONSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)var\s+ytInitialPlayerResponse\s*=\s*(\{.*?\})\s*;\s*(?:var\s+\w|</script>)")
        .unwrap()
});

#[derive(Debug, thiserror::Error)]
pub enum CaptionError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(&'static str),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The raw HTML of a video's watch page.
pub struct WatchPage(String);

impl Deref for WatchPage {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for WatchPage {
    fn from(value: String) -> Self {
        WatchPage(value)
    }
}

impl WatchPage {
    /// Extracts `ytInitialPlayerResponse` from the page's script tag.
    pub fn player_response<T>(&self) -> Result<T, CaptionError>
    where
        T: DeserializeOwned,
    {
        PLAYER_RESPONSE_RE
            .captures(self)
            .and_then(|cap| cap.get(1))
            .and_then(|m| serde_json::from_str(m.as_str()).ok())
            .ok_or(CaptionError::Parse(
                "Failed to extract ytInitialPlayerResponse from the page's script tag",
            ))
    }
}

/// Parses a `fmt=json3` timedtext payload into ordered caption fragments.
///
/// Events without text segments (timing-only markers) are skipped; newlines
/// inside a fragment are flattened to spaces.
pub fn parse_timedtext(body: &str) -> Result<Vec<CaptionFragment>, CaptionError> {
    let body: TimedTextBody = serde_json::from_str(body)?;

    let fragments = body
        .events
        .into_iter()
        .filter_map(|event| {
            let segs = event.segs?;
            let text = segs
                .iter()
                .map(|s| s.utf8.as_str())
                .collect::<String>()
                .replace('\n', " ")
                .trim()
                .to_string();
            if text.is_empty() {
                return None;
            }
            Some(CaptionFragment {
                text,
                start: event.t_start_ms as f64 / 1000.0,
                duration: event.d_duration_ms as f64 / 1000.0,
            })
        })
        .collect();

    Ok(fragments)
}

fn caption_tracks(player: PlayerResponse) -> Result<Vec<CaptionTrack>, CaptionError> {
    let tracks = player
        .captions
        .and_then(|c| c.player_captions_tracklist_renderer)
        .map(|r| r.caption_tracks)
        .unwrap_or_default();

    if tracks.is_empty() {
        // Covers both "no captions" and "captions disabled": the renderer is
        // simply missing from the player response.
        return Err(CaptionError::Parse("No caption tracks for this video"));
    }

    Ok(tracks)
}

#[derive(Default)]
pub struct CaptionClient(pub reqwest::Client);

impl Deref for CaptionClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl CaptionClient {
    const WATCH_URL: &'static str = "https://www.youtube.com/watch";

    async fn fetch_timedtext(&self, url: &str) -> Result<Vec<CaptionFragment>, CaptionError> {
        let body = self
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_timedtext(&body)
    }
}

impl TranscriptSource for CaptionClient {
    type Error = CaptionError;

    async fn list_tracks(&self, video_id: &VideoId) -> Result<Vec<CaptionTrack>, Self::Error> {
        let html = self
            .get(format!("{}?v={}", Self::WATCH_URL, video_id))
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to fetch watch page"))?
            .error_for_status()?
            .text()
            .await?;

        let player = WatchPage::from(html).player_response::<PlayerResponse>()?;
        caption_tracks(player)
    }

    async fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<CaptionFragment>, Self::Error> {
        let url = format!("{}&fmt=json3", track.base_url);
        self.fetch_timedtext(&url).await
    }

    async fn fetch_translated(
        &self,
        track: &CaptionTrack,
        target_language: &str,
    ) -> Result<Vec<CaptionFragment>, Self::Error> {
        let url = format!("{}&fmt=json3&tlang={}", track.base_url, target_language);
        self.fetch_timedtext(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATCH_PAGE_SNIPPET: &str = r#"
        <html><head>
        <script nonce="abc123">var ytInitialPlayerResponse = {"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=abcdefghijk\u0026lang=en","languageCode":"en","isTranslatable":true,"name":{"simpleText":"English"}},{"baseUrl":"https://www.youtube.com/api/timedtext?v=abcdefghijk\u0026lang=en\u0026kind=asr","languageCode":"en","kind":"asr","isTranslatable":true}]}}};var meta = {"x":1};</script>
        </head><body></body></html>
    "#;

    #[test]
    fn test_player_response_extraction() {
        let page = WatchPage::from(WATCH_PAGE_SNIPPET.to_string());
        let player: PlayerResponse = page.player_response().unwrap();
        let tracks = caption_tracks(player).unwrap();

        assert_eq!(tracks.len(), 2);
        assert!(!tracks[0].is_generated());
        assert!(tracks[1].is_generated());
        // \u0026 escapes decode to &
        assert!(tracks[0].base_url.contains("?v=abcdefghijk&lang=en"));
    }

    #[test]
    fn test_player_response_missing_is_parse_error() {
        let page = WatchPage::from("<html><body>nothing here</body></html>".to_string());
        let result = page.player_response::<PlayerResponse>();
        assert!(matches!(result, Err(CaptionError::Parse(_))));
    }

    #[test]
    fn test_no_captions_renderer_means_no_tracks() {
        let page = WatchPage::from(
            r#"<script>var ytInitialPlayerResponse = {"videoDetails":{"videoId":"abcdefghijk"}};</script>"#
                .to_string(),
        );
        let player: PlayerResponse = page.player_response().unwrap();
        assert!(matches!(
            caption_tracks(player),
            Err(CaptionError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_timedtext_fragments() {
        let body = r#"{
            "events": [
                { "tStartMs": 0, "dDurationMs": 1000 },
                { "tStartMs": 0, "dDurationMs": 1500, "segs": [{ "utf8": "Hello" }] },
                { "tStartMs": 1500, "dDurationMs": 1500, "segs": [{ "utf8": "wor" }, { "utf8": "ld" }] },
                { "tStartMs": 3000, "dDurationMs": 500, "segs": [{ "utf8": "\n" }] }
            ]
        }"#;

        let fragments = parse_timedtext(body).unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "Hello");
        assert_eq!(fragments[1].text, "world");
        assert_eq!(fragments[1].start, 1.5);
        assert_eq!(fragments[1].duration, 1.5);
    }

    #[test]
    fn test_parse_timedtext_invalid_json() {
        assert!(matches!(
            parse_timedtext("not json"),
            Err(CaptionError::Json(_))
        ));
    }

    #[test]
    fn test_parse_timedtext_no_events() {
        let fragments = parse_timedtext("{}").unwrap();
        assert!(fragments.is_empty());
    }
}
