//! Span, page and document types.

use serde::{Deserialize, Serialize};

/// A text run exactly as reported by a PDF text layer.
///
/// Coordinates are top-down: `y` is the distance from the top edge of the
/// page to the top of the run's bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSpan {
    /// The text content, unnormalized
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Whether the run is set in a bold face
    #[serde(default)]
    pub bold: bool,
    /// Left edge in points
    #[serde(default)]
    pub x: f32,
    /// Top edge in points
    #[serde(default)]
    pub y: f32,
    /// Box width in points
    #[serde(default)]
    pub width: f32,
    /// Box height in points
    #[serde(default)]
    pub height: f32,
    /// Width of the containing page
    #[serde(default)]
    pub page_width: f32,
    /// Height of the containing page
    #[serde(default)]
    pub page_height: f32,
}

impl RawSpan {
    /// Create a raw span with a font size and no geometry.
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            bold: false,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            page_width: 0.0,
            page_height: 0.0,
        }
    }

    /// Mark the span as bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set the bounding box.
    pub fn with_bbox(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self
    }

    /// Set the dimensions of the containing page.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }
}

/// One page of raw spans, in the order the text layer emitted them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    /// Page number (1-indexed)
    pub number: u32,
    /// Spans in layout-encounter order
    #[serde(default)]
    pub spans: Vec<RawSpan>,
}

impl RawPage {
    /// Create an empty raw page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            spans: Vec::new(),
        }
    }

    /// Append a span.
    pub fn push(&mut self, span: RawSpan) {
        self.spans.push(span);
    }

    /// Builder-style span append.
    pub fn with_span(mut self, span: RawSpan) -> Self {
        self.spans.push(span);
        self
    }
}

/// A collected, normalized text span.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// Whitespace- and NFC-normalized text
    pub text: String,
    /// Font size in points (always > 0)
    pub font_size: f32,
    /// Bold face
    pub bold: bool,
    /// Page number (1-indexed)
    pub page: u32,
    /// Left edge in points
    pub x: f32,
    /// Top edge in points
    pub y: f32,
    /// Box width in points
    pub width: f32,
    /// Box height in points
    pub height: f32,
    /// `x / page_width`, or 0.0 for degenerate pages
    pub relative_x: f32,
    /// `y / page_height`, or 0.0 for degenerate pages
    pub relative_y: f32,
}

impl TextSpan {
    /// Length of the normalized text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A page of collected spans. Span order is never changed after collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Spans in layout-encounter order
    pub spans: Vec<TextSpan>,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            spans: Vec::new(),
        }
    }

    /// Check if the page has no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// A collected document: one input file's pages in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Pages in the document
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// The first page, if any.
    pub fn first_page(&self) -> Option<&Page> {
        self.pages.first()
    }

    /// All spans of the document in page order.
    pub fn spans(&self) -> impl Iterator<Item = &TextSpan> {
        self.pages.iter().flat_map(|page| page.spans.iter())
    }

    /// Total number of spans across all pages.
    pub fn span_count(&self) -> usize {
        self.pages.iter().map(|page| page.spans.len()).sum()
    }

    /// Font sizes of every span, in document order.
    pub fn font_sizes(&self) -> Vec<f32> {
        self.spans().map(|span| span.font_size).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, size: f32, page: u32) -> TextSpan {
        TextSpan {
            text: text.to_string(),
            font_size: size,
            bold: false,
            page,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            relative_x: 0.0,
            relative_y: 0.0,
        }
    }

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
        assert!(doc.first_page().is_none());
    }

    #[test]
    fn test_font_sizes_in_page_order() {
        let mut doc = Document::new();
        let mut page1 = Page::new(1, 612.0, 792.0);
        page1.spans.push(span("Title here", 24.0, 1));
        page1.spans.push(span("Body text", 10.0, 1));
        let mut page2 = Page::new(2, 612.0, 792.0);
        page2.spans.push(span("More body", 11.0, 2));
        doc.add_page(page1);
        doc.add_page(Page::new(3, 612.0, 792.0));
        doc.add_page(page2);

        assert_eq!(doc.font_sizes(), vec![24.0, 10.0, 11.0]);
        assert_eq!(doc.span_count(), 3);
        assert!(doc.pages[1].is_empty());
    }

    #[test]
    fn test_raw_span_deserialize_defaults() {
        let raw: RawSpan = serde_json::from_str(r#"{"text": "Intro", "font_size": 12}"#).unwrap();
        assert_eq!(raw.text, "Intro");
        assert!(!raw.bold);
        assert_eq!(raw.page_width, 0.0);
    }

    #[test]
    fn test_char_len_counts_chars() {
        assert_eq!(span("Résumé", 12.0, 1).char_len(), 6);
    }
}
