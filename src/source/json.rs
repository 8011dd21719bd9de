//! Span source over a JSON dump of raw pages.

use std::path::Path;

use super::SpanSource;
use crate::error::Result;
use crate::model::RawPage;

/// Pre-extracted spans, as written by `pdfoutline spans`.
///
/// The dump is a JSON array of pages:
///
/// ```json
/// [{"number": 1, "spans": [{"text": "Overview", "font_size": 14.0}]}]
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonSpanSource {
    pages: Vec<RawPage>,
}

impl JsonSpanSource {
    /// Parse a span dump from a string.
    pub fn from_json(json: &str) -> Result<Self> {
        let pages: Vec<RawPage> = serde_json::from_str(json)?;
        Ok(Self { pages })
    }

    /// Read a span dump from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Wrap pages that are already in memory.
    pub fn from_pages(pages: Vec<RawPage>) -> Self {
        Self { pages }
    }
}

impl SpanSource for JsonSpanSource {
    fn raw_pages(&self) -> Result<Vec<RawPage>> {
        Ok(self.pages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_minimal_dump() {
        let source = JsonSpanSource::from_json(
            r#"[{"number": 1, "spans": [{"text": "Overview", "font_size": 14.0, "bold": true}]},
                {"number": 2}]"#,
        )
        .unwrap();
        let pages = source.raw_pages().unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].spans[0].bold);
        assert_eq!(pages[0].spans[0].page_width, 0.0);
        assert!(pages[1].spans.is_empty());
    }

    #[test]
    fn test_malformed_dump() {
        let err = JsonSpanSource::from_json(r#"{"not": "pages"}"#).unwrap_err();
        assert!(matches!(err, Error::SpanDump(_)));
    }
}
