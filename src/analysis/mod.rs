//! Outline analysis.
//!
//! Turns a collected [`Document`] into an [`Outline`]. The pipeline runs
//! once per document and keeps all of its state (font clusters, the
//! form-like flag, the dedup set) local to that run, so one analyzer can be
//! shared across threads.
//!
//! ```text
//! Document -> font clusters -> form check -> title
//!          -> evaluate spans -> assign levels -> assemble -> Outline
//! ```
//!
//! Setting `body_font_margin` adds a gate that rejects spans set smaller
//! than their page's median size by more than the margin.

mod assemble;
mod fonts;
mod form;
mod heading;
mod level;
mod numbering;
mod options;
mod text;
mod title;

pub use assemble::assemble;
pub use fonts::{median_size, page_median_sizes, FontClusterSet};
pub use form::is_form_like;
pub use heading::{AcceptSignal, Decision, HeadingEvaluator, RejectReason};
pub use level::{LevelAssigner, LevelSource};
pub use numbering::{HeadingPatterns, Numbering};
pub use options::{BoldPromotion, ClusterPolicy, OutlineOptions, DEFAULT_KEYWORDS};
pub use text::{alphabetic_word_count, normalize_text, word_count, TextStats};
pub use title::select_title;

use crate::model::{Document, HeadingCandidate, Outline};

/// Outline analyzer.
///
/// Holds the options and the compiled heading patterns; everything derived
/// from a document lives only for the duration of [`analyze`](Self::analyze).
#[derive(Debug, Clone)]
pub struct OutlineAnalyzer {
    options: OutlineOptions,
    patterns: HeadingPatterns,
}

impl OutlineAnalyzer {
    /// Create an analyzer with the given options.
    pub fn new(options: OutlineOptions) -> Self {
        Self {
            options,
            patterns: HeadingPatterns::new(),
        }
    }

    /// The options in use.
    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Compute the font cluster set for a document.
    pub fn font_clusters(&self, doc: &Document) -> FontClusterSet {
        FontClusterSet::analyze(&doc.font_sizes(), &self.options)
    }

    /// Extract the title and headings of a document.
    pub fn analyze(&self, doc: &Document) -> Outline {
        let clusters = self.font_clusters(doc);
        let form_like = is_form_like(doc, &self.options);
        let title = select_title(doc.first_page(), &self.options);

        let mut evaluator =
            HeadingEvaluator::new(&self.options, &self.patterns, &clusters, form_like);
        if self.options.body_font_margin.is_some() {
            evaluator = evaluator.with_page_medians(page_median_sizes(doc));
        }
        let assigner = LevelAssigner::new(&self.patterns, &clusters, self.options.bold_promotion);

        let candidates = doc
            .spans()
            .filter(|span| evaluator.accepts(span))
            .map(|span| HeadingCandidate::new(assigner.assign(span), span.text.clone(), span.page));

        let outline = assemble(title, candidates);

        log::debug!(
            "Outline: {} pages, {} spans, {} headings, title {:?}",
            doc.page_count(),
            doc.span_count(),
            outline.len(),
            outline.title
        );

        outline
    }
}

impl Default for OutlineAnalyzer {
    fn default() -> Self {
        Self::new(OutlineOptions::default())
    }
}
