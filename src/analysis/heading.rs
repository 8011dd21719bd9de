//! Heading candidate evaluation.
//!
//! A span is first run through rejection gates, then through acceptance
//! signals. Both lists are checked in a fixed order and the first gate or
//! signal that fires decides; ambiguous spans therefore depend on that order.

use std::collections::HashMap;

use super::fonts::FontClusterSet;
use super::numbering::HeadingPatterns;
use super::options::OutlineOptions;
use super::text::{alphabetic_word_count, word_count, TextStats};
use crate::model::TextSpan;

/// Why a span was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// Text length outside the accepted bounds
    Length,
    /// Only a number or punctuation
    BareNumeral,
    /// More symbols than letters
    SymbolHeavy,
    /// Too few letters and no numbered heading to excuse it
    LowAlphaRatio,
    /// Form-like document and too few alphabetic words
    FormFragment,
    /// Smaller than the page's body text
    BodyFont,
    /// Passed every gate but no signal fired
    NoSignal,
}

/// Which signal accepted a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcceptSignal {
    /// Decimal section number with text after it
    Numbered,
    /// Roman numeral with text after it
    Roman,
    /// Starts with a document-structure keyword
    Keyword,
    /// Font size matches a cluster, or bold and larger than every cluster
    FontSize,
    /// Mostly uppercase multi-word text
    Uppercase,
    /// Short label ending in a colon
    Colon,
}

/// Outcome of evaluating one span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept(AcceptSignal),
    Reject(RejectReason),
}

impl Decision {
    /// Whether the span was accepted.
    pub fn is_accept(&self) -> bool {
        matches!(self, Decision::Accept(_))
    }
}

/// Decides whether spans of one document are headings.
///
/// Holds only borrowed, read-only state, so the same span always gets the
/// same decision.
pub struct HeadingEvaluator<'a> {
    options: &'a OutlineOptions,
    patterns: &'a HeadingPatterns,
    clusters: &'a FontClusterSet,
    form_like: bool,
    page_medians: HashMap<u32, f32>,
}

impl<'a> HeadingEvaluator<'a> {
    /// Create an evaluator for one document.
    pub fn new(
        options: &'a OutlineOptions,
        patterns: &'a HeadingPatterns,
        clusters: &'a FontClusterSet,
        form_like: bool,
    ) -> Self {
        Self {
            options,
            patterns,
            clusters,
            form_like,
            page_medians: HashMap::new(),
        }
    }

    /// Median font size per page, used by the body-font gate when
    /// `body_font_margin` is set.
    pub fn with_page_medians(mut self, medians: HashMap<u32, f32>) -> Self {
        self.page_medians = medians;
        self
    }

    /// Whether the span is accepted as a heading.
    pub fn accepts(&self, span: &TextSpan) -> bool {
        self.evaluate(span).is_accept()
    }

    /// Evaluate a span and report the deciding gate or signal.
    pub fn evaluate(&self, span: &TextSpan) -> Decision {
        let options = self.options;
        let text = span.text.as_str();
        let stats = TextStats::of(text);

        // Gates
        if stats.len < options.min_heading_len || stats.len > options.max_heading_len {
            return Decision::Reject(RejectReason::Length);
        }
        if self.patterns.is_bare_numeral(text) {
            return Decision::Reject(RejectReason::BareNumeral);
        }
        if stats.symbols > stats.alpha {
            return Decision::Reject(RejectReason::SymbolHeavy);
        }

        let numbered = self
            .patterns
            .decimal(text)
            .filter(|n| n.trailing.chars().count() > options.min_numbered_trailing_len);

        if stats.alpha_ratio() < options.min_alpha_ratio && numbered.is_none() {
            return Decision::Reject(RejectReason::LowAlphaRatio);
        }
        if self.form_like && alphabetic_word_count(text) < options.form_min_words {
            return Decision::Reject(RejectReason::FormFragment);
        }
        if self.below_body_font(span) {
            return Decision::Reject(RejectReason::BodyFont);
        }

        // Signals
        if numbered.is_some() {
            return Decision::Accept(AcceptSignal::Numbered);
        }
        if self
            .patterns
            .roman(text)
            .is_some_and(|trailing| trailing.chars().count() > options.min_numbered_trailing_len)
        {
            return Decision::Accept(AcceptSignal::Roman);
        }
        if self.starts_with_keyword(text) {
            return Decision::Accept(AcceptSignal::Keyword);
        }
        if self.font_stands_out(span) {
            return Decision::Accept(AcceptSignal::FontSize);
        }
        if stats.upper_ratio() > options.uppercase_ratio
            && word_count(text) >= 2
            && stats.len < options.uppercase_max_len
            && stats.symbol_ratio() <= options.symbol_dominance_ratio
        {
            return Decision::Accept(AcceptSignal::Uppercase);
        }
        if text.ends_with(':') && stats.len < options.colon_max_len {
            return Decision::Accept(AcceptSignal::Colon);
        }

        Decision::Reject(RejectReason::NoSignal)
    }

    /// Keyword at the start of the text, ending on a word boundary.
    fn starts_with_keyword(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.options.keywords.iter().any(|keyword| {
            lower.starts_with(keyword.as_str())
                && lower[keyword.len()..]
                    .chars()
                    .next()
                    .map_or(true, |c| !c.is_alphanumeric())
        })
    }

    fn below_body_font(&self, span: &TextSpan) -> bool {
        let Some(margin) = self.options.body_font_margin else {
            return false;
        };
        self.page_medians
            .get(&span.page)
            .is_some_and(|&median| span.font_size < median - margin)
    }

    fn font_stands_out(&self, span: &TextSpan) -> bool {
        if self.clusters.matches(span.font_size) {
            return true;
        }
        span.bold
            && self
                .clusters
                .largest()
                .is_some_and(|largest| span.font_size > largest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, size: f32) -> TextSpan {
        TextSpan {
            text: text.to_string(),
            font_size: size,
            bold: false,
            page: 1,
            x: 72.0,
            y: 100.0,
            width: 200.0,
            height: size,
            relative_x: 0.12,
            relative_y: 0.13,
        }
    }

    struct Fixture {
        options: OutlineOptions,
        patterns: HeadingPatterns,
        clusters: FontClusterSet,
    }

    impl Fixture {
        fn new(sizes: &[f32]) -> Self {
            let options = OutlineOptions::default();
            let clusters = FontClusterSet::analyze(sizes, &options);
            Self {
                options,
                patterns: HeadingPatterns::new(),
                clusters,
            }
        }

        fn evaluator(&self, form_like: bool) -> HeadingEvaluator<'_> {
            HeadingEvaluator::new(&self.options, &self.patterns, &self.clusters, form_like)
        }
    }

    #[test]
    fn test_length_gate() {
        let fx = Fixture::new(&[30.0, 11.0]);
        let eval = fx.evaluator(false);
        // Matches the 30pt cluster, but too short
        assert_eq!(
            eval.evaluate(&span("Scope", 30.0)),
            Decision::Reject(RejectReason::Length)
        );
        let long = "Introduction ".repeat(8);
        assert_eq!(
            eval.evaluate(&span(long.trim(), 30.0)),
            Decision::Reject(RejectReason::Length)
        );
    }

    #[test]
    fn test_lenient_length_bounds() {
        let options = OutlineOptions::new().lenient();
        let patterns = HeadingPatterns::new();
        let clusters = FontClusterSet::analyze(&[30.0, 11.0], &options);
        let eval = HeadingEvaluator::new(&options, &patterns, &clusters, false);
        assert!(eval.accepts(&span("Scope", 30.0)));
        assert!(!eval.accepts(&span("Aims", 30.0)));
    }

    #[test]
    fn test_bare_numeral_gate() {
        let fx = Fixture::new(&[30.0, 11.0]);
        let eval = fx.evaluator(false);
        assert_eq!(
            eval.evaluate(&span("(12.3.4)", 30.0)),
            Decision::Reject(RejectReason::BareNumeral)
        );
    }

    #[test]
    fn test_symbol_gate() {
        let fx = Fixture::new(&[30.0, 11.0]);
        let eval = fx.evaluator(false);
        assert_eq!(
            eval.evaluate(&span("x += y && z--", 30.0)),
            Decision::Reject(RejectReason::SymbolHeavy)
        );
    }

    #[test]
    fn test_alpha_ratio_gate_spares_numbered_headings() {
        let fx = Fixture::new(&[30.0, 11.0]);
        let eval = fx.evaluator(false);
        assert_eq!(
            eval.evaluate(&span("Q3 2024 10-20", 30.0)),
            Decision::Reject(RejectReason::LowAlphaRatio)
        );
        // 7 letters out of 23 characters, but a numbered heading
        assert_eq!(
            eval.evaluate(&span("10.2.3.4.5 Summary 2024", 11.0)),
            Decision::Accept(AcceptSignal::Numbered)
        );
    }

    #[test]
    fn test_form_gate() {
        let fx = Fixture::new(&[30.0, 11.0]);
        assert_eq!(
            fx.evaluator(true).evaluate(&span("Signature:", 20.0)),
            Decision::Reject(RejectReason::FormFragment)
        );
        assert_eq!(
            fx.evaluator(false).evaluate(&span("Signature:", 20.0)),
            Decision::Accept(AcceptSignal::Colon)
        );
        assert!(fx.evaluator(true).accepts(&span("Applicant details:", 20.0)));
    }

    #[test]
    fn test_signals_in_order() {
        let fx = Fixture::new(&[30.0, 11.0]);
        let eval = fx.evaluator(false);
        assert_eq!(
            eval.evaluate(&span("1.1 Background", 30.0)),
            Decision::Accept(AcceptSignal::Numbered)
        );
        assert_eq!(
            eval.evaluate(&span("IV. Methodology", 30.0)),
            Decision::Accept(AcceptSignal::Roman)
        );
        assert_eq!(
            eval.evaluate(&span("Introduction", 30.0)),
            Decision::Accept(AcceptSignal::Keyword)
        );
        assert_eq!(
            eval.evaluate(&span("Quarterly highlights", 30.0)),
            Decision::Accept(AcceptSignal::FontSize)
        );
        assert_eq!(
            eval.evaluate(&span("KEY RISKS AND MITIGATIONS", 20.0)),
            Decision::Accept(AcceptSignal::Uppercase)
        );
        assert_eq!(
            eval.evaluate(&span("Items to prepare:", 20.0)),
            Decision::Accept(AcceptSignal::Colon)
        );
        assert_eq!(
            eval.evaluate(&span("Quarterly highlights", 20.0)),
            Decision::Reject(RejectReason::NoSignal)
        );
    }

    #[test]
    fn test_numbered_needs_substantive_text() {
        let fx = Fixture::new(&[30.0, 11.0]);
        let eval = fx.evaluator(false);
        assert_eq!(
            eval.evaluate(&span("1.2 Aims", 20.0)),
            Decision::Reject(RejectReason::NoSignal)
        );
    }

    #[test]
    fn test_undotted_number_is_not_numbering() {
        let fx = Fixture::new(&[30.0, 11.0]);
        let eval = fx.evaluator(false);
        assert_eq!(
            eval.evaluate(&span("12 Angry Men reviewed", 20.0)),
            Decision::Reject(RejectReason::NoSignal)
        );
        assert_eq!(
            eval.evaluate(&span("100 ways to save", 20.0)),
            Decision::Reject(RejectReason::NoSignal)
        );
        assert_eq!(
            eval.evaluate(&span("12. Angry Men reviewed", 20.0)),
            Decision::Accept(AcceptSignal::Numbered)
        );
    }

    #[test]
    fn test_body_font_gate() {
        let mut fx = Fixture::new(&[30.0, 11.0]);
        let medians = HashMap::from([(1, 14.0)]);
        let small = span("Quarterly figures", 11.0);

        // Off by default, even with medians supplied
        let eval = fx.evaluator(false).with_page_medians(medians.clone());
        assert_eq!(eval.evaluate(&small), Decision::Accept(AcceptSignal::FontSize));

        fx.options = fx.options.clone().with_body_font_margin(1.0);
        let eval = fx.evaluator(false).with_page_medians(medians.clone());
        assert_eq!(eval.evaluate(&small), Decision::Reject(RejectReason::BodyFont));
        // Within the margin of the median
        assert!(eval.accepts(&span("Quarterly figures", 13.5)));

        // Pages without a median are not gated
        let mut elsewhere = small.clone();
        elsewhere.page = 2;
        assert!(eval.accepts(&elsewhere));
    }

    #[test]
    fn test_keyword_needs_word_boundary() {
        let fx = Fixture::new(&[30.0, 11.0]);
        let eval = fx.evaluator(false);
        assert!(eval.accepts(&span("Appendix A: Data", 20.0)));
        assert!(!eval.accepts(&span("Sections of the plant", 20.0)));
    }

    #[test]
    fn test_bold_larger_than_every_cluster() {
        let fx = Fixture::new(&[30.0, 11.0]);
        let eval = fx.evaluator(false);
        let mut big = span("Quarterly highlights", 40.0);
        assert!(!eval.accepts(&big));
        big.bold = true;
        assert_eq!(eval.evaluate(&big), Decision::Accept(AcceptSignal::FontSize));
    }

    #[test]
    fn test_decision_is_stable() {
        let fx = Fixture::new(&[24.0, 14.0, 12.0, 10.0]);
        let eval = fx.evaluator(false);
        let s = span("Some normal paragraph text.", 10.0);
        assert_eq!(eval.evaluate(&s), eval.evaluate(&s));
        assert!(!eval.accepts(&s));
    }
}
