//! Outline analysis options and thresholds.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Document-structure words that mark a span as a heading when it starts with one.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "table of contents",
    "contents",
    "introduction",
    "overview",
    "background",
    "abstract",
    "summary",
    "executive summary",
    "scope",
    "methodology",
    "results",
    "discussion",
    "conclusion",
    "conclusions",
    "recommendations",
    "acknowledgements",
    "acknowledgments",
    "references",
    "bibliography",
    "appendix",
    "glossary",
    "preface",
    "revision history",
    "chapter",
    "section",
];

/// How representative font sizes are derived from the observed sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterPolicy {
    /// Group sizes whose relative difference stays within the cluster
    /// tolerance and represent each group by its mean
    #[default]
    Tolerance,
    /// Keep the largest distinct sizes as they are
    TopDistinct,
}

/// When a bold span is moved up one heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoldPromotion {
    /// Bold never changes the level
    Never,
    /// Only levels derived from the font cluster rank are promoted
    #[default]
    FontRankOnly,
    /// Numbering-derived levels are promoted as well
    Always,
}

/// Options controlling heading classification, leveling and title selection.
///
/// Every numeric threshold the analyzer uses lives here so it can be tuned
/// without touching the classification code. Unknown fields are rejected when
/// loading from JSON; missing fields take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutlineOptions {
    /// Font clustering policy
    pub cluster_policy: ClusterPolicy,
    /// Relative size difference that separates two tolerance clusters
    pub cluster_tolerance: f32,
    /// Relative difference under which a size "matches" a cluster value
    pub size_match_tolerance: f32,
    /// Maximum number of representative sizes kept
    pub max_clusters: usize,

    /// Shortest accepted heading, in characters
    pub min_heading_len: usize,
    /// Longest accepted heading, in characters
    pub max_heading_len: usize,
    /// Minimum share of alphabetic characters in a heading
    pub min_alpha_ratio: f32,
    /// Trailing text after a section number must be longer than this
    pub min_numbered_trailing_len: usize,
    /// Uppercase share above which a span reads as a caps heading
    pub uppercase_ratio: f32,
    /// Caps headings must be shorter than this
    pub uppercase_max_len: usize,
    /// Colon-terminated headings must be shorter than this
    pub colon_max_len: usize,
    /// Symbol share above which a span is symbol-dominated
    pub symbol_dominance_ratio: f32,

    /// Number of leading pages sampled by the form-like detector
    pub form_sample_pages: usize,
    /// Fragments shorter than this are checked for symbol density
    pub form_short_len: usize,
    /// Non-alphanumeric density (inclusive) marking a short fragment as a field
    pub form_symbol_density: f32,
    /// Fully uppercase fragments shorter than this count as labels
    pub form_caps_len: usize,
    /// Share of field-like fragments above which a document is form-like
    pub form_ratio: f32,
    /// Alphabetic words a heading needs on a form-like document
    pub form_min_words: usize,

    /// Upper band of the first page searched for the title
    pub title_band: f32,
    /// Wider band used by the longest-text fallback
    pub title_fallback_band: f32,
    /// Title candidates must be longer than this
    pub title_min_len: usize,
    /// Last-resort title candidates must be longer than this
    pub title_fallback_min_len: usize,

    /// Keywords (lowercase) that open a heading
    pub keywords: Vec<String>,
    /// Bold promotion mode
    pub bold_promotion: BoldPromotion,
    /// Reject spans smaller than their page's median font size minus this
    /// margin, in points. Off when unset.
    pub body_font_margin: Option<f32>,
}

impl OutlineOptions {
    /// Create options with the strict defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looser length and alphabetic-ratio bounds for numbering-heavy documents.
    pub fn lenient(mut self) -> Self {
        self.min_heading_len = 5;
        self.max_heading_len = 100;
        self.min_alpha_ratio = 0.4;
        self
    }

    /// Set the clustering policy.
    pub fn with_cluster_policy(mut self, policy: ClusterPolicy) -> Self {
        self.cluster_policy = policy;
        self
    }

    /// Set the cluster tolerance.
    pub fn with_cluster_tolerance(mut self, tolerance: f32) -> Self {
        self.cluster_tolerance = tolerance;
        self
    }

    /// Set the maximum number of font clusters.
    pub fn with_max_clusters(mut self, max: usize) -> Self {
        self.max_clusters = max;
        self
    }

    /// Set accepted heading length bounds (inclusive).
    pub fn with_length_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_heading_len = min;
        self.max_heading_len = max;
        self
    }

    /// Set the minimum alphabetic ratio.
    pub fn with_min_alpha_ratio(mut self, ratio: f32) -> Self {
        self.min_alpha_ratio = ratio;
        self
    }

    /// Set the form-like detection ratio.
    pub fn with_form_ratio(mut self, ratio: f32) -> Self {
        self.form_ratio = ratio;
        self
    }

    /// Replace the keyword list. Keywords are stored lowercase.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        self
    }

    /// Set the bold promotion mode.
    pub fn with_bold_promotion(mut self, mode: BoldPromotion) -> Self {
        self.bold_promotion = mode;
        self
    }

    /// Enable the page body-font gate with the given margin in points.
    pub fn with_body_font_margin(mut self, margin: f32) -> Self {
        self.body_font_margin = Some(margin);
        self
    }

    /// Load options from a JSON document; missing fields keep their defaults.
    /// Keywords are normalized as by [`with_keywords`](Self::with_keywords).
    pub fn from_json(json: &str) -> Result<Self> {
        let mut options: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        let keywords = std::mem::take(&mut options.keywords);
        options = options.with_keywords(keywords);
        options.validate()?;
        Ok(options)
    }

    /// Check that thresholds are usable.
    pub fn validate(&self) -> Result<()> {
        if self.cluster_tolerance.is_nan() || self.cluster_tolerance <= 0.0 {
            return Err(Error::Config(
                "cluster_tolerance must be positive".to_string(),
            ));
        }
        if self.size_match_tolerance.is_nan() || self.size_match_tolerance < 0.0 {
            return Err(Error::Config(
                "size_match_tolerance must not be negative".to_string(),
            ));
        }
        if self.min_heading_len > self.max_heading_len {
            return Err(Error::Config(format!(
                "min_heading_len ({}) exceeds max_heading_len ({})",
                self.min_heading_len, self.max_heading_len
            )));
        }
        if let Some(margin) = self.body_font_margin {
            if !margin.is_finite() || margin < 0.0 {
                return Err(Error::Config(format!(
                    "body_font_margin must be a finite non-negative size, got {}",
                    margin
                )));
            }
        }
        for (name, ratio) in [
            ("min_alpha_ratio", self.min_alpha_ratio),
            ("uppercase_ratio", self.uppercase_ratio),
            ("symbol_dominance_ratio", self.symbol_dominance_ratio),
            ("form_symbol_density", self.form_symbol_density),
            ("form_ratio", self.form_ratio),
            ("title_band", self.title_band),
            ("title_fallback_band", self.title_fallback_band),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(Error::Config(format!(
                    "{} must be within 0.0..=1.0, got {}",
                    name, ratio
                )));
            }
        }
        Ok(())
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            cluster_policy: ClusterPolicy::Tolerance,
            cluster_tolerance: 0.5,
            size_match_tolerance: 0.05,
            max_clusters: 4,
            min_heading_len: 6,
            max_heading_len: 90,
            min_alpha_ratio: 0.45,
            min_numbered_trailing_len: 4,
            uppercase_ratio: 0.6,
            uppercase_max_len: 70,
            colon_max_len: 55,
            symbol_dominance_ratio: 0.25,
            form_sample_pages: 2,
            form_short_len: 14,
            form_symbol_density: 0.2,
            form_caps_len: 13,
            form_ratio: 0.18,
            form_min_words: 2,
            title_band: 0.3,
            title_fallback_band: 0.4,
            title_min_len: 6,
            title_fallback_min_len: 7,
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            bold_promotion: BoldPromotion::FontRankOnly,
            body_font_margin: None,
        }
    }
}
