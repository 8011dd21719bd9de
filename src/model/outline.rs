//! Outline result types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hierarchical heading level, H1 being the most prominent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    /// All levels, most prominent first.
    pub const ALL: [HeadingLevel; 4] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
    ];

    /// Level for a zero-based rank; anything past the last level clamps to H4.
    pub fn from_rank(rank: usize) -> Self {
        Self::ALL[rank.min(Self::ALL.len() - 1)]
    }

    /// Zero-based rank (H1 = 0).
    pub fn rank(self) -> usize {
        self as usize
    }

    /// One level more prominent, saturating at H1.
    pub fn promote(self) -> Self {
        Self::from_rank(self.rank().saturating_sub(1))
    }

    /// The wire name ("H1".."H4").
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
            HeadingLevel::H4 => "H4",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An accepted heading with its level and page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingCandidate {
    /// Heading level
    pub level: HeadingLevel,
    /// Normalized heading text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl HeadingCandidate {
    /// Create a new heading candidate.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Extracted document outline: a title plus headings in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Document title (empty when none was found)
    pub title: String,
    /// Headings in document order
    #[serde(rename = "outline")]
    pub entries: Vec<HeadingCandidate>,
}

impl Outline {
    /// Create an outline with a title and no entries.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Check if the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over headings in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, HeadingCandidate> {
        self.entries.iter()
    }

    /// Number of headings at a given level.
    pub fn count_at(&self, level: HeadingLevel) -> usize {
        self.entries.iter().filter(|e| e.level == level).count()
    }
}
