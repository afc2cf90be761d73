//! Word document rendering: a title heading and the summary body as a
//! single unstyled paragraph.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Style, StyleType};

use crate::{ExportError, REPORT_TITLE};

const TITLE_STYLE_ID: &str = "Title";
// python-docx's level-0 heading is 28pt; docx sizes are half-points.
const TITLE_SIZE_HALF_PT: usize = 56;

pub(crate) fn render(summary: &str) -> Result<Vec<u8>, ExportError> {
    let title_style = Style::new(TITLE_STYLE_ID, StyleType::Paragraph)
        .name("Title")
        .size(TITLE_SIZE_HALF_PT)
        .bold();

    let docx = Docx::new()
        .add_style(title_style)
        .add_paragraph(
            Paragraph::new()
                .style(TITLE_STYLE_ID)
                .add_run(Run::new().add_text(REPORT_TITLE)),
        )
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(summary)));

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buffer.into_inner())
}
