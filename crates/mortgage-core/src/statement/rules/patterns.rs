//! Ordered text patterns for mortgage statement extraction.
//!
//! Each field has a list of patterns tried in order; the first one that
//! matches wins. Every pattern names the capture group holding the value
//! (group 0 means the whole match).

use lazy_static::lazy_static;
use regex::Regex;

/// A case-insensitive pattern paired with the group that carries the value.
#[derive(Debug)]
pub struct TextPattern {
    regex: Regex,
    group: usize,
}

impl TextPattern {
    fn new(pattern: &str, group: usize) -> Self {
        Self {
            regex: Regex::new(pattern).expect("built-in pattern must compile"),
            group,
        }
    }

    /// Captured value of this pattern in `text`, if it matches.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(self.group))
            .map(|m| m.as_str())
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// First capture of the first matching pattern.
pub fn first_capture<'t>(patterns: &[TextPattern], text: &'t str) -> Option<&'t str> {
    patterns.iter().find_map(|p| p.capture(text))
}

lazy_static! {
    // APR, most specific label first
    pub static ref APR_PATTERNS: Vec<TextPattern> = vec![
        TextPattern::new(r"(?i)apr[:\s]+(\d+\.?\d*)\s*%?", 1),
        TextPattern::new(r"(?i)annual percentage rate[:\s]+(\d+\.?\d*)\s*%?", 1),
        TextPattern::new(r"(?i)interest rate[:\s]+(\d+\.?\d*)\s*%?", 1),
    ];

    // Loan term, returned as the whole matched phrase
    pub static ref LOAN_TERM_PATTERNS: Vec<TextPattern> = vec![
        TextPattern::new(r"(?i)(\d+)\s*years?\s*(?:fixed|term|loan)?", 0),
        TextPattern::new(r"(?i)(\d+)\s*months?\s*(?:term|loan)?", 0),
        TextPattern::new(r"(?i)loan term[:\s]+(\d+\s*(?:year|month)s?)", 0),
    ];

    // Property address: rest of the labeled line plus an optional continuation line
    pub static ref PROPERTY_ADDRESS_PATTERNS: Vec<TextPattern> = vec![
        TextPattern::new(r"(?i)property(?:\s+address)?[:\s]+([^\n]+(?:\n[^\n]+)?)", 1),
    ];

    // Labeled dates in D/M/Y form with 2 or 4 digit years
    pub static ref PAYMENT_DATE_PATTERNS: Vec<TextPattern> = vec![
        TextPattern::new(r"(?i)payment date[:\s]+(\d{1,2}[-/]\d{1,2}[-/]\d{2,4})", 1),
    ];

    pub static ref ORIGINATION_DATE_PATTERNS: Vec<TextPattern> = vec![
        TextPattern::new(r"(?i)(?:loan|origination) date[:\s]+(\d{1,2}[-/]\d{1,2}[-/]\d{2,4})", 1),
    ];

    // Unlabeled date tokens, for normalizing passthrough dates
    pub static ref DATE_MDY: Regex = Regex::new(
        r"^\s*(\d{1,2})[-/](\d{1,2})[-/](\d{4}|\d{2})\b"
    ).unwrap();

    pub static ref DATE_YMD: Regex = Regex::new(
        r"^\s*(\d{4})-(\d{1,2})-(\d{1,2})\b"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        for list in [
            &*APR_PATTERNS,
            &*LOAN_TERM_PATTERNS,
            &*PROPERTY_ADDRESS_PATTERNS,
            &*PAYMENT_DATE_PATTERNS,
            &*ORIGINATION_DATE_PATTERNS,
        ] {
            assert!(!list.is_empty());
            for pattern in list.iter() {
                assert!(pattern.as_str().starts_with("(?i)"));
            }
        }
    }

    #[test]
    fn test_first_capture_respects_order() {
        let text = "Interest Rate: 4.10% APR: 4.25%";
        assert_eq!(first_capture(&APR_PATTERNS, text), Some("4.25"));
    }

    #[test]
    fn test_whole_match_group() {
        assert_eq!(
            first_capture(&LOAN_TERM_PATTERNS, "a 15 year loan"),
            Some("15 year loan")
        );
    }
}
