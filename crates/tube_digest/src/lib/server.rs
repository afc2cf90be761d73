//! HTTP interface: one form page, one generate action, two on-demand
//! document downloads. All rendering is server-side from the single
//! session-scoped summary slot.

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use summary_export::ExportArtifact;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::{
    parser::{extract_video_id, VideoId},
    types::{PromptSpec, SummaryState},
    yt::TranscriptSource,
    SummaryPipeline, Summarizer,
};

const UNAVAILABLE_NOTICE: &str =
    "Sorry, a summary for this video cannot be generated. Try another video.";

/// Session-scoped state: the summary slot plus the video it belongs to.
/// Overwritten wholesale by each Generate request.
#[derive(Debug, Default)]
struct Session {
    summary: SummaryState,
    video: Option<VideoId>,
}

pub struct AppState<C, S>
where
    C: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    pipeline: SummaryPipeline<C, S>,
    session: RwLock<Session>,
}

impl<C, S> AppState<C, S>
where
    C: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    pub fn new(pipeline: SummaryPipeline<C, S>) -> Self {
        Self {
            pipeline,
            session: RwLock::new(Session::default()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SummarizeForm {
    url: String,
    #[serde(default = "default_word_limit")]
    word_limit: u16,
    #[serde(default)]
    instruction: String,
}

fn default_word_limit() -> u16 {
    PromptSpec::DEFAULT_WORD_LIMIT
}

pub fn router<C, S>(state: Arc<AppState<C, S>>) -> Router
where
    C: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index::<C, S>))
        .route("/summarize", post(generate::<C, S>))
        .route("/export/pdf", get(download_pdf::<C, S>))
        .route("/export/docx", get(download_docx::<C, S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve<C, S>(
    addr: std::net::SocketAddr,
    pipeline: SummaryPipeline<C, S>,
) -> anyhow::Result<()>
where
    C: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let state = Arc::new(AppState::new(pipeline));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Serving web interface");
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index<C, S>(State(state): State<Arc<AppState<C, S>>>) -> Html<String>
where
    C: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let session = state.session.read().await;
    Html(render_page(&session, None))
}

async fn generate<C, S>(
    State(state): State<Arc<AppState<C, S>>>,
    Form(form): Form<SummarizeForm>,
) -> Html<String>
where
    C: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let spec = PromptSpec::new(form.word_limit, Some(form.instruction));

    match state.pipeline.generate(&form.url, &spec).await {
        Ok(next) => {
            let mut session = state.session.write().await;
            session.video = extract_video_id(&form.url).ok();
            session.summary = next;
            Html(render_page(&session, None))
        }
        // InvalidUrl and Summarization both leave the slot untouched and
        // surface inline.
        Err(e) => {
            let session = state.session.read().await;
            Html(render_page(&session, Some(&e.to_string())))
        }
    }
}

async fn download_pdf<C, S>(State(state): State<Arc<AppState<C, S>>>) -> Response
where
    C: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let session = state.session.read().await;
    let SummaryState::Ready(text) = &session.summary else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match summary_export::render_pdf(text) {
        Ok(artifact) => artifact_response(artifact),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render PDF export");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn download_docx<C, S>(State(state): State<Arc<AppState<C, S>>>) -> Response
where
    C: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let session = state.session.read().await;
    let SummaryState::Ready(text) = &session.summary else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match summary_export::render_docx(text) {
        Ok(artifact) => artifact_response(artifact),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render Word export");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn artifact_response(artifact: ExportArtifact) -> Response {
    (
        [
            (header::CONTENT_TYPE, artifact.mime_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", artifact.file_name),
            ),
        ],
        artifact.bytes,
    )
        .into_response()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn render_page(session: &Session, error: Option<&str>) -> String {
    let error_block = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape_html(e)))
        .unwrap_or_default();

    let result_block = match &session.summary {
        SummaryState::NotRequested => String::new(),
        SummaryState::Unavailable => {
            format!(r#"<p class="notice">{UNAVAILABLE_NOTICE}</p>"#)
        }
        SummaryState::Ready(summary) => {
            let thumbnail = session
                .video
                .as_ref()
                .map(|v| {
                    format!(
                        r#"<img class="thumbnail" src="{}" alt="Video thumbnail">"#,
                        v.thumbnail_url()
                    )
                })
                .unwrap_or_default();

            format!(
                r#"{thumbnail}
<h2>Detailed Notes</h2>
<div class="summary">{}</div>
<p class="downloads">
  <a href="/export/pdf" download>Download PDF</a>
  <a href="/export/docx" download>Download Word</a>
</p>"#,
                escape_html(summary)
            )
        }
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Video Summarizer</title>
<style>
  body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }}
  label {{ display: block; margin: 0.75rem 0; }}
  .error {{ color: #b00020; }}
  .notice {{ background: #eef; padding: 0.75rem; }}
  .summary {{ white-space: pre-wrap; border: 1px solid #ccc; padding: 1rem; }}
  .thumbnail {{ max-width: 100%; }}
</style>
</head>
<body>
<h1>Video Summarizer</h1>
<ol class="instructions">
  <li>Paste the URL of a YouTube video.</li>
  <li>Optionally enter your own prompt to shape the summary.</li>
  <li>Pick the word limit with the slider, then generate.</li>
</ol>
<form method="post" action="/summarize">
  <label>YouTube URL
    <input type="url" name="url" placeholder="https://www.youtube.com/watch?v=..." required>
  </label>
  <label>Word limit
    <input type="range" name="word_limit" min="{min}" max="{max}" step="{step}" value="{default}"
           oninput="this.nextElementSibling.value = this.value">
    <output>{default}</output>
  </label>
  <label>Prompt (optional)
    <input type="text" name="instruction" placeholder="How the summary should be formatted">
  </label>
  <button type="submit">Generate Summary</button>
</form>
{error_block}
{result_block}
</body>
</html>"#,
        min = PromptSpec::MIN_WORD_LIMIT,
        max = PromptSpec::MAX_WORD_LIMIT,
        step = PromptSpec::WORD_LIMIT_STEP,
        default = PromptSpec::DEFAULT_WORD_LIMIT,
    )
}
