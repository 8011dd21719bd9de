//! Section numbering patterns.

use regex::Regex;

/// A decimal section number at the start of a heading ("1.", "2.3", "4.1.2").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Numbering<'a> {
    /// The number itself, without a trailing dot
    pub number: &'a str,
    /// Count of interior dots (0 for "1.", 1 for "1.2")
    pub depth: usize,
    /// Text after the number
    pub trailing: &'a str,
}

/// Compiled heading patterns, built once per analyzer.
#[derive(Debug, Clone)]
pub struct HeadingPatterns {
    decimal: Regex,
    roman_prefix: Regex,
    roman_numeral: Regex,
    bare_numeral: Regex,
}

impl HeadingPatterns {
    /// Compile the patterns.
    pub fn new() -> Self {
        Self {
            // Dotted numbers of any depth, or a plain number of up to three
            // digits followed by a dot ("1. Scope"). "12 Angry Men" and
            // "2024 Budget" are not section numbers.
            decimal: Regex::new(r"^(?:(\d+(?:\.\d+)+)\.?|(\d{1,3})\.)\s+(\S.*)$").unwrap(),
            roman_prefix: Regex::new(r"(?i)^([IVXLCDM]+)([.\-\s]+)(\S.*)$").unwrap(),
            roman_numeral: Regex::new(
                r"^M{0,3}(?:CM|CD|D?C{0,3})(?:XC|XL|L?X{0,3})(?:IX|IV|V?I{0,3})$",
            )
            .unwrap(),
            bare_numeral: Regex::new(r"^[\p{N}\p{P}\p{S}\s]+$").unwrap(),
        }
    }

    /// Parse a leading decimal section number.
    pub fn decimal<'a>(&self, text: &'a str) -> Option<Numbering<'a>> {
        let caps = self.decimal.captures(text)?;
        let number = caps.get(1).or_else(|| caps.get(2))?.as_str();
        let trailing = caps.get(3)?.as_str();
        Some(Numbering {
            number,
            depth: number.matches('.').count(),
            trailing,
        })
    }

    /// Parse a leading Roman numeral and return the text after it.
    ///
    /// The numeral must be well formed and written in one case, so words
    /// such as "Did" or "Mix" are not mistaken for numerals. A one-letter
    /// numeral needs a '.' or '-' separator ("I. Scope"), which keeps the
    /// pronoun in "I think ..." out.
    pub fn roman<'a>(&self, text: &'a str) -> Option<&'a str> {
        let caps = self.roman_prefix.captures(text)?;
        let numeral = caps.get(1)?.as_str();
        let separator = caps.get(2)?.as_str();
        let trailing = caps.get(3)?.as_str();

        let single_case = numeral.chars().all(|c| c.is_ascii_uppercase())
            || numeral.chars().all(|c| c.is_ascii_lowercase());
        if !single_case || !self.roman_numeral.is_match(&numeral.to_ascii_uppercase()) {
            return None;
        }
        if numeral.len() == 1 && !separator.contains(['.', '-']) {
            return None;
        }
        Some(trailing)
    }

    /// Whether the text is nothing but a number or punctuation ("12.", "(3)").
    pub fn is_bare_numeral(&self, text: &str) -> bool {
        self.bare_numeral.is_match(text)
    }
}

impl Default for HeadingPatterns {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_depth() {
        let patterns = HeadingPatterns::new();

        let n = patterns.decimal("1. Introduction").unwrap();
        assert_eq!(n.number, "1");
        assert_eq!(n.depth, 0);
        assert_eq!(n.trailing, "Introduction");

        assert_eq!(patterns.decimal("1.1 Background").unwrap().depth, 1);
        assert_eq!(patterns.decimal("2.3.1 Data sources").unwrap().depth, 2);
        assert_eq!(patterns.decimal("2.3.1.4 Edge cases").unwrap().depth, 3);
        assert_eq!(patterns.decimal("3.2. Trailing dot").unwrap().number, "3.2");
    }

    #[test]
    fn test_decimal_rejects_non_numbering() {
        let patterns = HeadingPatterns::new();
        assert!(patterns.decimal("2024 Annual Report").is_none());
        assert!(patterns.decimal("Introduction").is_none());
        assert!(patterns.decimal("1.1").is_none());
        assert!(patterns.decimal("12.").is_none());
        assert!(patterns.decimal("12 Angry Men reviewed").is_none());
        assert!(patterns.decimal("100 ways to save").is_none());
        assert!(patterns.decimal("1 Introduction").is_none());
        assert!(patterns.decimal("1000. Too many digits").is_none());
    }

    #[test]
    fn test_roman_headings() {
        let patterns = HeadingPatterns::new();
        assert_eq!(patterns.roman("IV. Methodology"), Some("Methodology"));
        assert_eq!(patterns.roman("ii - Related work"), Some("Related work"));
        assert_eq!(patterns.roman("XII Appendices"), Some("Appendices"));
        assert_eq!(patterns.roman("I. Scope of work"), Some("Scope of work"));
    }

    #[test]
    fn test_roman_rejects_words() {
        let patterns = HeadingPatterns::new();
        assert_eq!(patterns.roman("Did we meet the target"), None);
        assert_eq!(patterns.roman("Mix of sources"), None);
        assert_eq!(patterns.roman("I think this works"), None);
        assert_eq!(patterns.roman("IIII Not a numeral"), None);
    }

    #[test]
    fn test_bare_numeral() {
        let patterns = HeadingPatterns::new();
        assert!(patterns.is_bare_numeral("12."));
        assert!(patterns.is_bare_numeral("(3)"));
        assert!(patterns.is_bare_numeral("- 4 -"));
        assert!(!patterns.is_bare_numeral("3 Results"));
    }
}
