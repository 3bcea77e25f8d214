//! Loan term extraction.

use tracing::debug;

use super::patterns::LOAN_TERM_PATTERNS;
use super::{ExtractionMatch, FieldExtractor, non_empty};
use crate::models::record::FieldSource;
use crate::models::response::DocumentResponse;

/// Loan term extractor. Returns the matched phrase, e.g. "30 year fixed".
pub struct LoanTermExtractor;

impl LoanTermExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoanTermExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for LoanTermExtractor {
    type Output = String;

    fn extract(&self, response: &DocumentResponse) -> Option<ExtractionMatch<String>> {
        let text = &response.recognized_text;
        let term = LOAN_TERM_PATTERNS
            .iter()
            .find_map(|pattern| pattern.capture(text).and_then(non_empty))?;

        debug!("Loan term '{}' from recognized text", term);
        Some(ExtractionMatch::new(term.clone(), FieldSource::RecognizedText, term))
    }
}

/// Extract the loan term description from a response.
pub fn extract_loan_terms(response: &DocumentResponse) -> Option<String> {
    LoanTermExtractor::new().extract(response).map(|m| m.value)
}
