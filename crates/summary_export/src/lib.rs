//! # Summary Export
//!
//! Renders a summary string into downloadable document artifacts: a
//! paginated PDF report and a Word document. Artifacts are built fresh from
//! the text on every call; nothing is cached.

mod docx;
mod pdf;

pub const PDF_FILE_NAME: &str = "summary_report.pdf";
pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const DOCX_FILE_NAME: &str = "summary_report.docx";
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Title printed at the top of both document formats.
pub const REPORT_TITLE: &str = "Summary Report";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),
    #[error("Word rendering failed: {0}")]
    Docx(String),
}

/// A named byte stream ready to be served as a download.
#[derive(Debug)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Renders the summary as a paginated PDF: a title header and a centered
/// page-number footer on every page, body as left-aligned wrapped text.
pub fn render_pdf(summary: &str) -> Result<ExportArtifact, ExportError> {
    let bytes = pdf::render(summary)?;
    tracing::debug!(size = bytes.len(), "Rendered PDF export");

    Ok(ExportArtifact {
        file_name: PDF_FILE_NAME,
        mime_type: PDF_MIME_TYPE,
        bytes,
    })
}

/// Renders the summary as a Word document: a title heading followed by the
/// summary as a single paragraph.
pub fn render_docx(summary: &str) -> Result<ExportArtifact, ExportError> {
    let bytes = docx::render(summary)?;
    tracing::debug!(size = bytes.len(), "Rendered Word export");

    Ok(ExportArtifact {
        file_name: DOCX_FILE_NAME,
        mime_type: DOCX_MIME_TYPE,
        bytes,
    })
}
