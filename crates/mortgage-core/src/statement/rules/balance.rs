//! Outstanding balance extraction.

use tracing::debug;

use super::{ExtractionMatch, FieldExtractor, line_item_total};
use crate::models::record::FieldSource;
use crate::models::response::DocumentResponse;

const LINE_ITEM_TERMS: [&str; 4] = [
    "principal balance",
    "outstanding balance",
    "current balance",
    "remaining balance",
];

/// Outstanding balance extractor.
///
/// Falls back to the document total when no balance line item exists. That
/// total may be the amount due for the period rather than the principal, so
/// the fallback is reported with [`FieldSource::DocumentTotal`].
pub struct OutstandingBalanceExtractor;

impl OutstandingBalanceExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OutstandingBalanceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for OutstandingBalanceExtractor {
    type Output = f64;

    fn extract(&self, response: &DocumentResponse) -> Option<ExtractionMatch<f64>> {
        if let Some(m) = line_item_total(&response.line_items, &LINE_ITEM_TERMS) {
            debug!("Outstanding balance {} from line item '{}'", m.value, m.evidence);
            return Some(m);
        }

        // Zero or missing totals say nothing about the balance
        let total = response.total.filter(|t| *t > 0.0)?;
        debug!("Outstanding balance {} inferred from document total", total);
        Some(ExtractionMatch::new(total, FieldSource::DocumentTotal, "total"))
    }
}

/// Extract the outstanding balance from a response.
pub fn extract_outstanding_balance(response: &DocumentResponse) -> Option<f64> {
    OutstandingBalanceExtractor::new().extract(response).map(|m| m.value)
}
