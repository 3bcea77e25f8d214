//! Property address extraction.

use tracing::debug;

use super::patterns::PROPERTY_ADDRESS_PATTERNS;
use super::{ExtractionMatch, FieldExtractor, non_empty};
use crate::models::record::FieldSource;
use crate::models::response::{DocumentResponse, Party};

/// Property address extractor: vendor block, bill-to block, then a labeled line in the text.
pub struct PropertyAddressExtractor;

impl PropertyAddressExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PropertyAddressExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn party_address(party: Option<&Party>, source: FieldSource) -> Option<ExtractionMatch<String>> {
    let address = party?.address.as_deref().and_then(non_empty)?;
    Some(ExtractionMatch::new(address, source, "address"))
}

impl FieldExtractor for PropertyAddressExtractor {
    type Output = String;

    fn extract(&self, response: &DocumentResponse) -> Option<ExtractionMatch<String>> {
        let found = party_address(response.vendor.as_ref(), FieldSource::Vendor)
            .or_else(|| party_address(response.bill_to.as_ref(), FieldSource::BillTo))
            .or_else(|| {
                PROPERTY_ADDRESS_PATTERNS.iter().find_map(|pattern| {
                    let captured = pattern.capture(&response.recognized_text)?;
                    non_empty(captured)
                        .map(|address| ExtractionMatch::new(address, FieldSource::RecognizedText, captured))
                })
            });

        if let Some(m) = &found {
            debug!("Property address from {}", m.source);
        }

        found
    }
}

/// Extract the property address from a response.
pub fn extract_property_address(response: &DocumentResponse) -> Option<String> {
    PropertyAddressExtractor::new().extract(response).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party(address: Option<&str>) -> Option<Party> {
        Some(Party {
            name: Some("Somebody".to_string()),
            address: address.map(str::to_string),
            ..Party::default()
        })
    }

    #[test]
    fn test_vendor_first() {
        let r = DocumentResponse {
            vendor: party(Some("456 Bank St, Finance City, ST 67890")),
            bill_to: party(Some("123 Main St")),
            recognized_text: "Property Address: 9 Elm Rd".to_string(),
            ..DocumentResponse::default()
        };

        let m = PropertyAddressExtractor::new().extract(&r).unwrap();
        assert_eq!(m.value, "456 Bank St, Finance City, ST 67890");
        assert_eq!(m.source, FieldSource::Vendor);
    }

    #[test]
    fn test_empty_vendor_address_falls_to_bill_to() {
        let r = DocumentResponse {
            vendor: party(Some("   ")),
            bill_to: party(Some("123 Main St, Anytown, ST 12345")),
            ..DocumentResponse::default()
        };

        let m = PropertyAddressExtractor::new().extract(&r).unwrap();
        assert_eq!(m.value, "123 Main St, Anytown, ST 12345");
        assert_eq!(m.source, FieldSource::BillTo);
    }

    #[test]
    fn test_text_pattern_takes_two_lines() {
        let r = DocumentResponse {
            vendor: party(None),
            recognized_text: "Loan No. 1\nProperty Address: 123 Main St\nAnytown, ST 12345\nAmount Due".to_string(),
            ..DocumentResponse::default()
        };

        assert_eq!(
            extract_property_address(&r).as_deref(),
            Some("123 Main St\nAnytown, ST 12345")
        );
    }

    #[test]
    fn test_text_pattern_without_address_word() {
        let r = DocumentResponse {
            recognized_text: "PROPERTY: 77 Lake View Dr".to_string(),
            ..DocumentResponse::default()
        };

        assert_eq!(extract_property_address(&r).as_deref(), Some("77 Lake View Dr"));
    }

    #[test]
    fn test_text_pattern_keeps_case() {
        let r = DocumentResponse {
            recognized_text: "Property Address: 12 Oak St".to_string(),
            ..DocumentResponse::default()
        };

        assert_eq!(extract_property_address(&r).as_deref(), Some("12 Oak St"));
    }

    #[test]
    fn test_absent() {
        assert_eq!(extract_property_address(&DocumentResponse::default()), None);
    }
}
