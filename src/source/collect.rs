//! Span collection: raw pages to the normalized document model.

use crate::analysis::normalize_text;
use crate::model::{Document, Page, RawPage, RawSpan, TextSpan};

/// Normalize every page of a raw dump into a [`Document`].
///
/// Pages keep their order. A page numbered 0 takes its 1-based position.
pub fn collect_document<I>(pages: I) -> Document
where
    I: IntoIterator<Item = RawPage>,
{
    let mut doc = Document::new();
    for (index, raw) in pages.into_iter().enumerate() {
        let number = if raw.number == 0 {
            index as u32 + 1
        } else {
            raw.number
        };
        doc.add_page(collect_page(number, &raw));
    }
    doc
}

/// Normalize one raw page. Spans whose text normalizes to nothing, or whose
/// font size is not a positive number, are dropped.
pub fn collect_page(number: u32, raw: &RawPage) -> Page {
    let (width, height) = raw
        .spans
        .first()
        .map(|s| (s.page_width, s.page_height))
        .unwrap_or((0.0, 0.0));

    let mut page = Page::new(number, width, height);
    page.spans = raw
        .spans
        .iter()
        .filter_map(|span| collect_span(number, span))
        .collect();
    page
}

fn collect_span(page: u32, raw: &RawSpan) -> Option<TextSpan> {
    if !raw.font_size.is_finite() || raw.font_size <= 0.0 {
        return None;
    }
    let text = normalize_text(&raw.text);
    if text.is_empty() {
        return None;
    }

    Some(TextSpan {
        text,
        font_size: raw.font_size,
        bold: raw.bold,
        page,
        x: raw.x,
        y: raw.y,
        width: raw.width,
        height: raw.height,
        relative_x: relative(raw.x, raw.page_width),
        relative_y: relative(raw.y, raw.page_height),
    })
}

/// `value / extent` clamped to [0, 1]; 0 when the extent is degenerate.
fn relative(value: f32, extent: f32) -> f32 {
    if !extent.is_finite() || extent <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value / extent).clamp(0.0, 1.0)
}
