//! Text normalization and character statistics shared by the classifiers.

use unicode_normalization::UnicodeNormalization;

/// Typographic ligatures expanded during normalization.
const LIGATURES: &[(char, &str)] = &[
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "st"),
    ('\u{FB06}', "st"),
];

/// Normalize span text: NFC, ligatures expanded, whitespace runs collapsed
/// to a single space, trimmed.
pub fn normalize_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.nfc() {
        if c.is_whitespace() {
            pending_space = !result.is_empty();
            continue;
        }
        if pending_space {
            result.push(' ');
            pending_space = false;
        }
        match LIGATURES.iter().find(|(lig, _)| *lig == c) {
            Some((_, expanded)) => result.push_str(expanded),
            None => result.push(c),
        }
    }

    result
}

/// Character class counts over a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// Total characters
    pub len: usize,
    /// Alphabetic characters
    pub alpha: usize,
    /// Uppercase alphabetic characters
    pub upper: usize,
    /// Numeric characters
    pub digits: usize,
    /// Whitespace characters
    pub whitespace: usize,
    /// Characters that are neither alphanumeric nor whitespace
    pub symbols: usize,
}

impl TextStats {
    /// Count character classes in `text`.
    pub fn of(text: &str) -> Self {
        let mut stats = Self::default();
        for c in text.chars() {
            stats.len += 1;
            if c.is_alphabetic() {
                stats.alpha += 1;
                if c.is_uppercase() {
                    stats.upper += 1;
                }
            } else if c.is_numeric() {
                stats.digits += 1;
            } else if c.is_whitespace() {
                stats.whitespace += 1;
            } else {
                stats.symbols += 1;
            }
        }
        stats
    }

    /// Share of alphabetic characters over the whole length.
    pub fn alpha_ratio(&self) -> f32 {
        ratio(self.alpha, self.len)
    }

    /// Share of uppercase letters among the letters.
    pub fn upper_ratio(&self) -> f32 {
        ratio(self.upper, self.alpha)
    }

    /// Share of symbol characters over the whole length.
    pub fn symbol_ratio(&self) -> f32 {
        ratio(self.symbols, self.len)
    }

    /// Whether there is at least one letter and every letter is uppercase.
    pub fn is_fully_uppercase(&self) -> bool {
        self.alpha > 0 && self.upper == self.alpha
    }
}

fn ratio(part: usize, whole: usize) -> f32 {
    if whole == 0 {
        0.0
    } else {
        part as f32 / whole as f32
    }
}

/// Number of whitespace-separated tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of tokens that are purely alphabetic once surrounding punctuation
/// is trimmed ("Signature:" counts, "1.1" and "A4" do not).
pub fn alphabetic_word_count(text: &str) -> usize {
    text.split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty() && word.chars().all(char::is_alphabetic))
        .count()
}
