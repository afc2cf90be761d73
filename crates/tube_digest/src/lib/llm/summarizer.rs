use std::{fmt::Debug, future::Future};

pub trait Summarizer {
    const SUMMARIZER_MODEL: &'static str;

    type Error: Debug;

    /// Sends the fully built prompt to the summarization service and
    /// returns its completion verbatim. No post-processing, no length
    /// enforcement, no retry.
    fn summarize(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<SummaryResponse, Self::Error>> + Send;
}

#[derive(Debug)]
pub struct SummaryResponse {
    pub summary: String,
}
