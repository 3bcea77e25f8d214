//! Rule-based field extractors for mortgage statements.
//!
//! Every extractor is a pure function of the response: it walks its sources
//! in a fixed priority order and stops at the first one that yields a value.
//! Nothing here can fail; an unresolved field is simply `None`.

pub mod address;
pub mod apr;
pub mod balance;
pub mod dates;
pub mod loan_amount;
pub mod numeric;
pub mod patterns;
pub mod term;

pub use address::{PropertyAddressExtractor, extract_property_address};
pub use apr::{AprExtractor, extract_apr};
pub use balance::{OutstandingBalanceExtractor, extract_outstanding_balance};
pub use dates::{DateSetExtractor, extract_dates, normalize_date};
pub use loan_amount::{LoanAmountExtractor, extract_loan_amount};
pub use numeric::{coerce_number, parse_number};
pub use term::{LoanTermExtractor, extract_loan_terms};

use crate::models::record::FieldSource;
use crate::models::response::{CustomField, DocumentResponse, LineItem};

/// Trait for single-valued field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from a response.
    fn extract(&self, response: &DocumentResponse) -> Option<ExtractionMatch<Self::Output>>;
}

/// An extracted value together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Part of the response that produced the value.
    pub source: FieldSource,
    /// Label or text that matched (line item description, field name, matched text).
    pub evidence: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: FieldSource, evidence: impl Into<String>) -> Self {
        Self {
            value,
            source,
            evidence: evidence.into(),
        }
    }
}

/// Case-insensitive check for any of `terms` (given in lowercase) inside `text`.
pub(crate) fn mentions_any(text: &str, terms: &[&str]) -> bool {
    let text = text.to_lowercase();
    terms.iter().any(|term| text.contains(term))
}

/// Total of the first line item whose description mentions one of `terms`.
///
/// Only the first matching item is consulted; if it carries no total the
/// line-item source yields nothing.
pub(crate) fn line_item_total(items: &[LineItem], terms: &[&str]) -> Option<ExtractionMatch<f64>> {
    let item = items.iter().find(|item| mentions_any(&item.description, terms))?;
    item.total
        .map(|total| ExtractionMatch::new(total, FieldSource::LineItem, item.description.as_str()))
}

/// First custom field whose name mentions one of `terms` and whose value coerces to a number.
pub(crate) fn custom_field_number(
    fields: &[CustomField],
    terms: &[&str],
) -> Option<ExtractionMatch<f64>> {
    fields
        .iter()
        .filter(|field| mentions_any(&field.name, terms))
        .find_map(|field| {
            numeric::coerce_number(&field.value)
                .map(|value| ExtractionMatch::new(value, FieldSource::CustomField, field.name.as_str()))
        })
}

/// Trimmed text, or `None` when nothing is left.
pub(crate) fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
