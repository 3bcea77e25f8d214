//! Original loan amount extraction.

use tracing::debug;

use super::{ExtractionMatch, FieldExtractor, custom_field_number, line_item_total};
use crate::models::response::DocumentResponse;

const LINE_ITEM_TERMS: [&str; 2] = ["original loan", "loan amount"];
const CUSTOM_FIELD_TERMS: [&str; 1] = ["loan amount"];

/// Loan amount extractor: line items first, then custom fields.
pub struct LoanAmountExtractor;

impl LoanAmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoanAmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for LoanAmountExtractor {
    type Output = f64;

    fn extract(&self, response: &DocumentResponse) -> Option<ExtractionMatch<f64>> {
        let found = line_item_total(&response.line_items, &LINE_ITEM_TERMS)
            .or_else(|| custom_field_number(&response.custom_fields, &CUSTOM_FIELD_TERMS));

        if let Some(m) = &found {
            debug!("Loan amount {} from {} '{}'", m.value, m.source, m.evidence);
        }

        found
    }
}

/// Extract the original loan amount from a response.
pub fn extract_loan_amount(response: &DocumentResponse) -> Option<f64> {
    LoanAmountExtractor::new().extract(response).map(|m| m.value)
}
