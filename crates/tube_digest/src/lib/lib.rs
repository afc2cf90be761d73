mod error;
mod llm;
pub mod parser;
mod pipeline;
pub mod server;
pub mod tracing;
pub mod types;
pub mod yt;

pub use error::Error;
pub use llm::gemini;
pub use llm::summarizer::{Summarizer, SummaryResponse};
pub use pipeline::{builder::SummaryPipelineBuilder, SummaryPipeline};
