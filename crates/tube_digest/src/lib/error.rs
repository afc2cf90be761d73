/// Errors surfaced by the summary pipeline to its caller.
///
/// Transcript-layer failures never appear here; they are absorbed into an
/// absent transcript (see [`crate::yt::fetch_english_transcript`]).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid YouTube URL")]
    InvalidUrl,
    #[error("Summarization failed: {0}")]
    Summarization(String),
}
