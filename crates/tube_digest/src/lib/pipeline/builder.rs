use crate::{yt::TranscriptSource, Summarizer, SummaryPipeline};

pub struct SummaryPipelineBuilder<C = (), S = ()> {
    captions: C,
    summarizer: S,
}

impl SummaryPipelineBuilder {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            captions: (),
            summarizer: (),
        }
    }
}

impl<C, S> SummaryPipelineBuilder<C, S> {
    pub fn captions<C2: TranscriptSource + Send + Sync + 'static>(
        self,
        captions: C2,
    ) -> SummaryPipelineBuilder<C2, S> {
        SummaryPipelineBuilder {
            captions,
            summarizer: self.summarizer,
        }
    }

    pub fn summarizer<S2: Summarizer + Send + Sync + 'static>(
        self,
        summarizer: S2,
    ) -> SummaryPipelineBuilder<C, S2> {
        SummaryPipelineBuilder {
            captions: self.captions,
            summarizer,
        }
    }
}

impl<C, S> SummaryPipelineBuilder<C, S>
where
    C: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    pub fn build(self) -> SummaryPipeline<C, S> {
        SummaryPipeline::new(self.captions, self.summarizer)
    }
}
