//! Paginated PDF layout over printpdf's builtin Helvetica fonts.
//!
//! Wrapping and pagination are computed here from an average glyph width;
//! builtin fonts carry no metrics table we could measure against.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::{ExportError, REPORT_TITLE};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;

const HEADER_Y_MM: f32 = PAGE_HEIGHT_MM - MARGIN_MM;
const BODY_TOP_MM: f32 = HEADER_Y_MM - 12.0;
const FOOTER_Y_MM: f32 = 10.0;
const LINE_HEIGHT_MM: f32 = 7.0;

const HEADER_SIZE_PT: f32 = 12.0;
const BODY_SIZE_PT: f32 = 12.0;
const FOOTER_SIZE_PT: f32 = 8.0;

/// Approximate Helvetica advance: ~0.5 em per glyph.
const PT_TO_MM: f32 = 0.352_778;
const AVG_GLYPH_EM: f32 = 0.5;

const MAX_LINE_CHARS: usize = 85;
const LINES_PER_PAGE: usize = ((BODY_TOP_MM - MARGIN_MM - FOOTER_Y_MM) / LINE_HEIGHT_MM) as usize;

pub(crate) fn render(summary: &str) -> Result<Vec<u8>, ExportError> {
    let pages = paginate(wrap_text(summary, MAX_LINE_CHARS), LINES_PER_PAGE);

    let (doc, first_page, first_layer) =
        PdfDocument::new(REPORT_TITLE, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Page 1");

    let body_font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let header_font = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let footer_font = doc
        .add_builtin_font(BuiltinFont::HelveticaOblique)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    for (page_index, lines) in pages.iter().enumerate() {
        let layer = if page_index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(
                Mm(PAGE_WIDTH_MM),
                Mm(PAGE_HEIGHT_MM),
                format!("Page {}", page_index + 1),
            );
            doc.get_page(page).get_layer(layer)
        };

        draw_page(
            &layer,
            lines,
            page_index + 1,
            &body_font,
            &header_font,
            &footer_font,
        );
    }

    doc.save_to_bytes().map_err(|e| ExportError::Pdf(e.to_string()))
}

fn draw_page(
    layer: &PdfLayerReference,
    lines: &[String],
    page_number: usize,
    body_font: &IndirectFontRef,
    header_font: &IndirectFontRef,
    footer_font: &IndirectFontRef,
) {
    layer.use_text(
        REPORT_TITLE,
        HEADER_SIZE_PT,
        Mm(centered_x(REPORT_TITLE, HEADER_SIZE_PT)),
        Mm(HEADER_Y_MM),
        header_font,
    );

    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        layer.use_text(
            line.as_str(),
            BODY_SIZE_PT,
            Mm(MARGIN_MM),
            Mm(BODY_TOP_MM - LINE_HEIGHT_MM * i as f32),
            body_font,
        );
    }

    let footer = format!("Page {page_number}");
    layer.use_text(
        footer.as_str(),
        FOOTER_SIZE_PT,
        Mm(centered_x(&footer, FOOTER_SIZE_PT)),
        Mm(FOOTER_Y_MM),
        footer_font,
    );
}

fn centered_x(text: &str, font_size_pt: f32) -> f32 {
    let text_width_mm = text.chars().count() as f32 * font_size_pt * AVG_GLYPH_EM * PT_TO_MM;
    (PAGE_WIDTH_MM - text_width_mm) / 2.0
}

/// Greedy word wrap. Paragraph breaks (newlines) are preserved as their own
/// lines; words longer than the limit are hard-split.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word;
            // hard-split oversized words
            while word.chars().count() > max_chars {
                let split_at = word
                    .char_indices()
                    .nth(max_chars)
                    .map(|(i, _)| i)
                    .unwrap_or(word.len());
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                lines.push(word[..split_at].to_string());
                word = &word[split_at..];
            }

            if current.is_empty() {
                current.push_str(word);
            } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// Splits wrapped lines into page-sized chunks. Always yields at least one
/// page so the header and footer render even for an empty body.
fn paginate(lines: Vec<String>, lines_per_page: usize) -> Vec<Vec<String>> {
    if lines.is_empty() {
        return vec![Vec::new()];
    }

    lines
        .chunks(lines_per_page.max(1))
        .map(|chunk| chunk.to_vec())
        .collect()
}
