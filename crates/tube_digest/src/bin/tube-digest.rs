use std::net::SocketAddr;

use clap::Parser;
use tube_digest::{
    gemini::GeminiClient, server, tracing::init_tracing_subscriber, yt::captions::CaptionClient,
    SummaryPipelineBuilder,
};

#[derive(Parser)]
#[command(name = "tube-digest", about = "YouTube video transcript summarizer")]
struct Cli {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY")]
    gemini_api_key: String,

    /// Address to serve the web interface on
    #[arg(long, env = "LISTEN_ADDR", default_value = "127.0.0.1:8080")]
    listen_addr: SocketAddr,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let pipeline = SummaryPipelineBuilder::new()
        .captions(CaptionClient::default())
        .summarizer(GeminiClient::new(&cli.gemini_api_key))
        .build();

    server::serve(cli.listen_addr, pipeline).await
}
