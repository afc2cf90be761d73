pub mod builder;

use crate::{
    error::Error,
    parser::{extract_video_id, VideoId},
    types::{PromptSpec, SummaryState, TranscriptDocument},
    yt::{fetch_english_transcript, TranscriptSource},
    Summarizer,
};

// The core URL → transcript → summary pipeline
#[derive(Debug)]
pub struct SummaryPipeline<C, S>
where
    C: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    captions: C,
    summarizer: S,
}

impl<C, S> SummaryPipeline<C, S>
where
    C: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    pub fn new(captions: C, summarizer: S) -> Self {
        SummaryPipeline {
            captions,
            summarizer,
        }
    }

    /// Resolves the transcript for one video; absent when every strategy
    /// fails. Service failures never escape this call.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_transcript(&self, video_id: &VideoId) -> Option<TranscriptDocument> {
        fetch_english_transcript(&self.captions, video_id).await
    }

    /// Runs the whole flow for one Generate request.
    ///
    /// * malformed URL → `Err(Error::InvalidUrl)`, nothing else happens
    /// * no transcript obtainable → `Ok(SummaryState::Unavailable)`
    /// * summarization service error → `Err(Error::Summarization)`
    /// * success → `Ok(SummaryState::Ready)`
    #[tracing::instrument(skip(self, spec))]
    pub async fn generate(&self, url: &str, spec: &PromptSpec) -> Result<SummaryState, Error> {
        let video_id = extract_video_id(url)?;

        let Some(transcript) = self.fetch_transcript(&video_id).await else {
            return Ok(SummaryState::Unavailable);
        };

        let transcript_text = transcript.flatten();
        if transcript_text.is_empty() {
            // A track that fetches but carries no text is as good as none.
            tracing::warn!(%video_id, "Transcript flattened to an empty string");
            return Ok(SummaryState::Unavailable);
        }

        tracing::info!(
            %video_id,
            language = transcript.language_code(),
            fragments = transcript.fragments().len(),
            "Transcript resolved, requesting summary"
        );

        let prompt = spec.build_prompt(&transcript_text);
        let response = self
            .summarizer
            .summarize(&prompt)
            .await
            .map_err(|e| Error::Summarization(format!("{e:?}")))?;

        Ok(SummaryState::Ready(response.summary))
    }
}
