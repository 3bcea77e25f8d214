//! APR extraction.

use tracing::debug;

use super::numeric::parse_number;
use super::patterns::APR_PATTERNS;
use super::{ExtractionMatch, FieldExtractor, custom_field_number};
use crate::models::record::FieldSource;
use crate::models::response::DocumentResponse;

const CUSTOM_FIELD_TERMS: [&str; 2] = ["apr", "interest rate"];

/// APR extractor: recognized text patterns first, then custom fields.
pub struct AprExtractor;

impl AprExtractor {
    pub fn new() -> Self {
        Self
    }

    fn from_text(&self, text: &str) -> Option<ExtractionMatch<f64>> {
        APR_PATTERNS.iter().find_map(|pattern| {
            let captured = pattern.capture(text)?;
            parse_number(captured)
                .map(|value| ExtractionMatch::new(value, FieldSource::RecognizedText, captured))
        })
    }
}

impl Default for AprExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AprExtractor {
    type Output = f64;

    fn extract(&self, response: &DocumentResponse) -> Option<ExtractionMatch<f64>> {
        let found = self
            .from_text(&response.recognized_text)
            .or_else(|| custom_field_number(&response.custom_fields, &CUSTOM_FIELD_TERMS));

        if let Some(m) = &found {
            debug!("APR {} from {} '{}'", m.value, m.source, m.evidence);
        }

        found
    }
}

/// Extract the APR (as a percentage) from a response.
pub fn extract_apr(response: &DocumentResponse) -> Option<f64> {
    AprExtractor::new().extract(response).map(|m| m.value)
}
