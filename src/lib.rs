//! # pdfoutline
//!
//! Document outline extraction for PDF files.
//!
//! Reads the positioned text spans of a PDF and infers its structure from
//! typography and wording alone: a title plus a flat list of H1-H4 headings
//! with page numbers. No embedded bookmarks are needed.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline, render, JsonFormat};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = extract_outline("document.pdf")?;
//!     println!("{}", render::to_json(&outline, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Span sources**: lopdf content-stream extraction or JSON span dumps
//! - **Font clusters**: a handful of representative sizes per document
//! - **Form detection**: stricter rules for label-heavy layouts
//! - **Heading evaluation**: ordered rejection gates and acceptance signals
//! - **Leveling**: section numbering first, font rank otherwise
//! - **Batch processing**: one JSON file per input, in parallel with Rayon

pub mod analysis;
pub mod batch;
pub mod error;
pub mod model;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use analysis::{BoldPromotion, ClusterPolicy, OutlineAnalyzer, OutlineOptions};
pub use batch::{process_directory, BatchOptions, BatchReport};
pub use error::{Error, Result};
pub use model::{
    Document, HeadingCandidate, HeadingLevel, Outline, Page, RawPage, RawSpan, TextSpan,
};
pub use render::JsonFormat;
pub use source::{collect_document, JsonSpanSource, LopdfSource, SpanSource};

use std::path::Path;

/// Extract the outline of a PDF file with default options.
///
/// # Example
///
/// ```no_run
/// let outline = pdfoutline::extract_outline("report.pdf").unwrap();
/// for entry in &outline.entries {
///     println!("{} {} (p. {})", entry.level, entry.text, entry.page);
/// }
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<Outline> {
    PdfOutline::new().extract(path)
}

/// Extract the outline of a PDF held in memory.
pub fn extract_outline_from_bytes(data: &[u8]) -> Result<Outline> {
    PdfOutline::new().extract_bytes(data)
}

/// Extract the outline of a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{extract_outline_with_options, OutlineOptions};
///
/// let options = OutlineOptions::new().lenient();
/// let outline = extract_outline_with_options("report.pdf", options).unwrap();
/// ```
pub fn extract_outline_with_options<P: AsRef<Path>>(
    path: P,
    options: OutlineOptions,
) -> Result<Outline> {
    PdfOutline::new().with_options(options).extract(path)
}

/// Builder for outline extraction.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{BoldPromotion, PdfOutline};
///
/// let outline = PdfOutline::new()
///     .lenient()
///     .with_bold_promotion(BoldPromotion::Never)
///     .extract("document.pdf")?;
/// # Ok::<(), pdfoutline::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PdfOutline {
    options: OutlineOptions,
}

impl PdfOutline {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the lenient length and alphabetic-ratio bounds.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Replace all options.
    pub fn with_options(mut self, options: OutlineOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the font clustering policy.
    pub fn with_cluster_policy(mut self, policy: ClusterPolicy) -> Self {
        self.options = self.options.with_cluster_policy(policy);
        self
    }

    /// Set the bold promotion mode.
    pub fn with_bold_promotion(mut self, mode: BoldPromotion) -> Self {
        self.options = self.options.with_bold_promotion(mode);
        self
    }

    /// The options that will be used.
    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Build the analyzer.
    pub fn analyzer(&self) -> OutlineAnalyzer {
        OutlineAnalyzer::new(self.options.clone())
    }

    /// Extract the outline of a PDF file.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<Outline> {
        self.extract_from(&LopdfSource::open(path)?)
    }

    /// Extract the outline of a PDF held in memory.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<Outline> {
        self.extract_from(&LopdfSource::from_bytes(data)?)
    }

    /// Extract the outline from any span source.
    pub fn extract_from<S: SpanSource + ?Sized>(&self, source: &S) -> Result<Outline> {
        let doc = source.document()?;
        Ok(self.analyzer().analyze(&doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_options() {
        let builder = PdfOutline::new()
            .lenient()
            .with_cluster_policy(ClusterPolicy::TopDistinct)
            .with_bold_promotion(BoldPromotion::Always);

        assert_eq!(builder.options().min_heading_len, 5);
        assert_eq!(builder.options().max_heading_len, 100);
        assert_eq!(builder.options().cluster_policy, ClusterPolicy::TopDistinct);
        assert_eq!(builder.options().bold_promotion, BoldPromotion::Always);
    }

    #[test]
    fn test_builder_default() {
        let builder = PdfOutline::default();
        assert_eq!(builder.options(), &OutlineOptions::default());
    }

    #[test]
    fn test_extract_from_span_source() {
        let source = JsonSpanSource::from_pages(vec![RawPage::new(1)
            .with_span(RawSpan::new("Annual Report 2024", 24.0).with_bbox(72.0, 60.0, 200.0, 24.0))
            .with_span(RawSpan::new("1. Introduction", 14.0).with_bbox(72.0, 120.0, 100.0, 14.0))
            .with_span(RawSpan::new("1.1 Background", 12.0).with_bbox(72.0, 160.0, 100.0, 12.0))]);

        let outline = PdfOutline::new().extract_from(&source).unwrap();
        // No page size: every span sits at relative_y 0, inside the title band
        assert_eq!(outline.title, "Annual Report 2024");
        assert_eq!(outline.len(), 2);
    }

    #[test]
    fn test_extract_bytes_empty_data() {
        assert!(matches!(
            extract_outline_from_bytes(&[]),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_extract_bytes_unknown_magic() {
        let data = b"<!DOCTYPE html><html></html>";
        assert!(matches!(
            extract_outline_from_bytes(data),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_extract_missing_file() {
        assert!(matches!(
            extract_outline("definitely/not/here.pdf"),
            Err(Error::Io(_))
        ));
    }
}
