//! Heading level assignment.

use super::fonts::FontClusterSet;
use super::numbering::HeadingPatterns;
use super::options::BoldPromotion;
use crate::model::{HeadingLevel, TextSpan};

/// Where an assigned level came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSource {
    /// Depth of a decimal section number
    Numbering,
    /// Rank of the matching font cluster
    FontRank,
}

/// Maps accepted spans to H1..H4.
///
/// Section numbering wins over font size: "2.3 Results" is H2 whatever its
/// font. Other spans take the rank of their font cluster.
pub struct LevelAssigner<'a> {
    patterns: &'a HeadingPatterns,
    clusters: &'a FontClusterSet,
    bold_promotion: BoldPromotion,
}

impl<'a> LevelAssigner<'a> {
    pub fn new(
        patterns: &'a HeadingPatterns,
        clusters: &'a FontClusterSet,
        bold_promotion: BoldPromotion,
    ) -> Self {
        Self {
            patterns,
            clusters,
            bold_promotion,
        }
    }

    /// Level of an accepted span.
    pub fn assign(&self, span: &TextSpan) -> HeadingLevel {
        self.assign_with_source(span).0
    }

    /// Level of an accepted span together with the rule that produced it.
    pub fn assign_with_source(&self, span: &TextSpan) -> (HeadingLevel, LevelSource) {
        let (level, source) = match self.patterns.decimal(&span.text) {
            Some(numbering) => (
                HeadingLevel::from_rank(numbering.depth),
                LevelSource::Numbering,
            ),
            None if self.clusters.is_empty() => (HeadingLevel::H1, LevelSource::FontRank),
            None => (
                HeadingLevel::from_rank(self.clusters.rank_of(span.font_size)),
                LevelSource::FontRank,
            ),
        };

        let promote = span.bold
            && match self.bold_promotion {
                BoldPromotion::Never => false,
                BoldPromotion::FontRankOnly => source == LevelSource::FontRank,
                BoldPromotion::Always => true,
            };

        if promote {
            (level.promote(), source)
        } else {
            (level, source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::options::OutlineOptions;

    fn span(text: &str, size: f32, bold: bool) -> TextSpan {
        TextSpan {
            text: text.to_string(),
            font_size: size,
            bold,
            page: 1,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            relative_x: 0.0,
            relative_y: 0.0,
        }
    }

    fn clusters(sizes: &[f32]) -> FontClusterSet {
        FontClusterSet::analyze(sizes, &OutlineOptions::default())
    }

    #[test]
    fn test_numbering_depth() {
        let patterns = HeadingPatterns::new();
        let clusters = clusters(&[30.0, 11.0]);
        let assigner = LevelAssigner::new(&patterns, &clusters, BoldPromotion::Never);

        assert_eq!(assigner.assign(&span("1. Introduction", 11.0, false)), HeadingLevel::H1);
        assert_eq!(assigner.assign(&span("1.1 Background", 30.0, false)), HeadingLevel::H2);
        assert_eq!(assigner.assign(&span("2.3.1 Data sources", 11.0, false)), HeadingLevel::H3);
        assert_eq!(assigner.assign(&span("2.3.1.4 Edge cases", 11.0, false)), HeadingLevel::H4);
        assert_eq!(
            assigner.assign(&span("2.3.1.4.9 Deep detail", 11.0, false)),
            HeadingLevel::H4
        );
    }

    #[test]
    fn test_font_rank() {
        let patterns = HeadingPatterns::new();
        let clusters = clusters(&[40.0, 16.0, 6.0]);
        let assigner = LevelAssigner::new(&patterns, &clusters, BoldPromotion::Never);

        assert_eq!(
            assigner.assign_with_source(&span("Overview", 40.0, false)),
            (HeadingLevel::H1, LevelSource::FontRank)
        );
        assert_eq!(assigner.assign(&span("Key figures", 16.0, false)), HeadingLevel::H2);
        assert_eq!(assigner.assign(&span("Notes apply", 6.0, false)), HeadingLevel::H3);
        // Matches no cluster: one past the last
        assert_eq!(assigner.assign(&span("Fine print", 2.0, false)), HeadingLevel::H4);
    }

    #[test]
    fn test_empty_clusters_give_h1() {
        let patterns = HeadingPatterns::new();
        let clusters = clusters(&[]);
        let assigner = LevelAssigner::new(&patterns, &clusters, BoldPromotion::FontRankOnly);
        assert_eq!(assigner.assign(&span("Overview", 12.0, false)), HeadingLevel::H1);
        assert_eq!(assigner.assign(&span("1.1 Background", 12.0, false)), HeadingLevel::H2);
    }

    #[test]
    fn test_bold_promotion_modes() {
        let patterns = HeadingPatterns::new();
        let clusters = clusters(&[40.0, 16.0, 6.0]);
        let ranked = span("Key figures", 16.0, true);
        let numbered = span("2.3 Results table", 9.0, true);

        let never = LevelAssigner::new(&patterns, &clusters, BoldPromotion::Never);
        assert_eq!(never.assign(&ranked), HeadingLevel::H2);
        assert_eq!(never.assign(&numbered), HeadingLevel::H2);

        let rank_only = LevelAssigner::new(&patterns, &clusters, BoldPromotion::FontRankOnly);
        assert_eq!(rank_only.assign(&ranked), HeadingLevel::H1);
        assert_eq!(rank_only.assign(&numbered), HeadingLevel::H2);

        let always = LevelAssigner::new(&patterns, &clusters, BoldPromotion::Always);
        assert_eq!(always.assign(&ranked), HeadingLevel::H1);
        assert_eq!(always.assign(&numbered), HeadingLevel::H1);
    }

    #[test]
    fn test_promotion_saturates_at_h1() {
        let patterns = HeadingPatterns::new();
        let clusters = clusters(&[40.0, 9.0]);
        let assigner = LevelAssigner::new(&patterns, &clusters, BoldPromotion::Always);
        assert_eq!(assigner.assign(&span("Overview", 40.0, true)), HeadingLevel::H1);
    }
}
