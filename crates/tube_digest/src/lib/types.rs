//! Wire types for the YouTube player response and timedtext payloads,
//! plus the domain types threaded through the pipeline.

use itertools::Itertools;
use serde::Deserialize;

// ─── Watch page player response ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Captions {
    pub player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracklistRenderer {
    #[serde(default)]
    pub caption_tracks: Vec<CaptionTrack>,
}

/// A single caption stream for a video in one language.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    /// `"asr"` marks an auto-generated track.
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub is_translatable: bool,
    #[serde(default)]
    pub name: Option<TrackName>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackName {
    pub simple_text: Option<String>,
}

impl CaptionTrack {
    pub fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }

    /// Base language subtag: `en-US` → `en`.
    pub fn base_language(&self) -> &str {
        self.language_code
            .split('-')
            .next()
            .unwrap_or(&self.language_code)
    }
}

// ─── Timedtext (fmt=json3) payload ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TimedTextBody {
    #[serde(default)]
    pub events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedTextEvent {
    #[serde(default)]
    pub t_start_ms: u64,
    #[serde(default)]
    pub d_duration_ms: u64,
    pub segs: Option<Vec<TimedTextSeg>>,
}

#[derive(Debug, Deserialize)]
pub struct TimedTextSeg {
    #[serde(default)]
    pub utf8: String,
}

// ─── Domain types ────────────────────────────────────────────────────────────

/// One caption fragment with its timing metadata. Timing is carried but
/// unused downstream; flattening discards it.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionFragment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// An ordered sequence of caption fragments in English (native or
/// translated) by construction.
#[derive(Debug, Clone)]
pub struct TranscriptDocument {
    fragments: Vec<CaptionFragment>,
    language_code: String,
}

impl TranscriptDocument {
    pub fn new(fragments: Vec<CaptionFragment>, language_code: impl Into<String>) -> Self {
        Self {
            fragments,
            language_code: language_code.into(),
        }
    }

    pub fn fragments(&self) -> &[CaptionFragment] {
        &self.fragments
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    /// Joins fragment texts with a single space in original order.
    /// No normalization, no deduplication, no timestamp retention.
    pub fn flatten(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).join(" ")
    }
}

/// Word-limit and instruction configuration for one summarization request.
#[derive(Debug, Clone)]
pub struct PromptSpec {
    word_limit: u16,
    instruction: Option<String>,
}

impl Default for PromptSpec {
    fn default() -> Self {
        Self {
            word_limit: Self::DEFAULT_WORD_LIMIT,
            instruction: None,
        }
    }
}

impl PromptSpec {
    pub const MIN_WORD_LIMIT: u16 = 50;
    pub const MAX_WORD_LIMIT: u16 = 500;
    pub const DEFAULT_WORD_LIMIT: u16 = 250;
    pub const WORD_LIMIT_STEP: u16 = 10;

    /// Builds a spec, clamping the word limit into the supported range.
    /// An empty or whitespace-only instruction counts as no override.
    pub fn new(word_limit: u16, instruction: Option<String>) -> Self {
        Self {
            word_limit: word_limit.clamp(Self::MIN_WORD_LIMIT, Self::MAX_WORD_LIMIT),
            instruction: instruction.filter(|s| !s.trim().is_empty()),
        }
    }

    pub fn word_limit(&self) -> u16 {
        self.word_limit
    }

    fn instruction_text(&self) -> String {
        match &self.instruction {
            Some(custom) => custom.clone(),
            None => format!(
                "You are a YouTube video summarizer. You will be taking the transcript text \
                 and summarizing the entire video, providing the important summary in points \
                 within {} words. Please provide the summary of the given YouTube caption here: ",
                self.word_limit
            ),
        }
    }

    /// The full prompt sent to the summarization service: instruction text
    /// prefixed directly onto the transcript. The word limit is advisory
    /// text inside the default instruction, not an enforced constraint.
    pub fn build_prompt(&self, transcript: &str) -> String {
        let mut prompt = self.instruction_text();
        prompt.push_str(transcript);
        prompt
    }
}

/// The single session-scoped summary slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SummaryState {
    /// No generation has been requested yet.
    #[default]
    NotRequested,
    /// All transcript strategies were exhausted; no summary can be produced.
    Unavailable,
    /// A summary was generated.
    Ready(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(text: &str, start: f64) -> CaptionFragment {
        CaptionFragment {
            text: text.to_string(),
            start,
            duration: 1.0,
        }
    }

    #[test]
    fn test_flatten_joins_with_single_space_in_order() {
        let doc = TranscriptDocument::new(
            vec![fragment("Hello", 0.0), fragment("world", 1.0)],
            "en",
        );
        assert_eq!(doc.flatten(), "Hello world");
    }

    #[test]
    fn test_flatten_does_not_normalize() {
        let doc = TranscriptDocument::new(
            vec![fragment("two  spaces", 0.0), fragment("two  spaces", 1.0)],
            "en",
        );
        assert_eq!(doc.flatten(), "two  spaces two  spaces");
    }

    #[test]
    fn test_flatten_empty_document() {
        let doc = TranscriptDocument::new(vec![], "en");
        assert_eq!(doc.flatten(), "");
    }

    #[test]
    fn test_prompt_spec_defaults() {
        let spec = PromptSpec::default();
        assert_eq!(spec.word_limit(), 250);
    }

    #[test]
    fn test_prompt_spec_clamps_word_limit() {
        assert_eq!(PromptSpec::new(10, None).word_limit(), 50);
        assert_eq!(PromptSpec::new(9000, None).word_limit(), 500);
        assert_eq!(PromptSpec::new(300, None).word_limit(), 300);
    }

    #[test]
    fn test_default_prompt_embeds_word_limit_and_transcript() {
        let spec = PromptSpec::new(120, None);
        let prompt = spec.build_prompt("the transcript");
        assert!(prompt.contains("within 120 words"));
        assert!(prompt.ends_with("here: the transcript"));
    }

    #[test]
    fn test_custom_instruction_replaces_template() {
        let spec = PromptSpec::new(250, Some("Summarize as a haiku: ".to_string()));
        let prompt = spec.build_prompt("the transcript");
        assert_eq!(prompt, "Summarize as a haiku: the transcript");
    }

    #[test]
    fn test_blank_instruction_falls_back_to_template() {
        let spec = PromptSpec::new(250, Some("   ".to_string()));
        let prompt = spec.build_prompt("the transcript");
        assert!(prompt.contains("within 250 words"));
    }

    #[test]
    fn test_caption_track_helpers() {
        let json = r#"{
            "baseUrl": "https://www.youtube.com/api/timedtext?v=abc",
            "languageCode": "en-US",
            "kind": "asr",
            "isTranslatable": true,
            "name": { "simpleText": "English (auto-generated)" }
        }"#;
        let track: CaptionTrack = serde_json::from_str(json).unwrap();
        assert!(track.is_generated());
        assert!(track.is_translatable);
        assert_eq!(track.base_language(), "en");
    }

    #[test]
    fn test_manual_track_deserialization() {
        let json = r#"{
            "baseUrl": "https://www.youtube.com/api/timedtext?v=abc",
            "languageCode": "fr"
        }"#;
        let track: CaptionTrack = serde_json::from_str(json).unwrap();
        assert!(!track.is_generated());
        assert!(!track.is_translatable);
        assert_eq!(track.base_language(), "fr");
    }
}
