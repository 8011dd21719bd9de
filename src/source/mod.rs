//! Span sources.
//!
//! A [`SpanSource`] yields raw pages of positioned text spans. The collector
//! turns them into the normalized [`Document`] the analyzer works on, so the
//! analysis never sees PDF bytes.

mod collect;
mod detect;
mod json;
mod pdf;

pub use collect::{collect_document, collect_page};
pub use detect::{detect_pdf_file, detect_pdf_header, is_pdf, PdfHeader};
pub use json::JsonSpanSource;
pub use pdf::{decode_text_simple, LopdfSource};

use crate::error::Result;
use crate::model::{Document, RawPage};

/// Provider of raw text spans, one [`RawPage`] per page in document order.
pub trait SpanSource {
    /// Raw pages in document order.
    fn raw_pages(&self) -> Result<Vec<RawPage>>;

    /// Collect the raw pages into a normalized document.
    fn document(&self) -> Result<Document> {
        Ok(collect_document(self.raw_pages()?))
    }
}
