//! Record assembly: runs every extractor over one response.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::models::record::{DateKind, DateSet, FieldSource, MortgageRecord, ParsedFields};
use crate::models::response::DocumentResponse;

use super::rules::{
    AprExtractor, DateSetExtractor, ExtractionMatch, FieldExtractor, LoanAmountExtractor,
    LoanTermExtractor, OutstandingBalanceExtractor, PropertyAddressExtractor,
};

/// Composes the field extractors into a [`MortgageRecord`].
///
/// Assembly cannot fail: each extractor resolves to a value or `None`.
#[derive(Default)]
pub struct RecordAssembler {
    loan_amount: LoanAmountExtractor,
    outstanding_balance: OutstandingBalanceExtractor,
    apr: AprExtractor,
    loan_terms: LoanTermExtractor,
    property_address: PropertyAddressExtractor,
    dates: DateSetExtractor,
}

/// Collects values and their provenance while the record is built.
#[derive(Default)]
struct Provenance {
    sources: BTreeMap<String, FieldSource>,
}

impl Provenance {
    fn take<T>(&mut self, field: &str, found: Option<ExtractionMatch<T>>) -> Option<T> {
        let found = found?;
        self.sources.insert(field.to_string(), found.source);
        Some(found.value)
    }

    fn dates(&mut self, dates: &DateSet) {
        for (kind, _) in dates.present() {
            let source = match kind {
                DateKind::StatementDate | DateKind::DueDate => FieldSource::ResponseField,
                DateKind::PaymentDate | DateKind::LoanOriginationDate => FieldSource::RecognizedText,
            };
            self.sources.insert(kind.key().to_string(), source);
        }
    }

    fn passthrough<T>(&mut self, field: &str, value: Option<T>, source: FieldSource) -> Option<T> {
        if value.is_some() {
            self.sources.insert(field.to_string(), source);
        }
        value
    }
}

impl RecordAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the normalized record, taking ownership of the response as its raw copy.
    pub fn assemble(&self, response: DocumentResponse) -> MortgageRecord {
        let mut provenance = Provenance::default();
        let mut warnings = Vec::new();

        let parsed_fields = ParsedFields {
            loan_amount: provenance.take("loan_amount", self.loan_amount.extract(&response)),
            outstanding_balance: provenance
                .take("outstanding_balance", self.outstanding_balance.extract(&response)),
            apr: provenance.take("apr", self.apr.extract(&response)),
            loan_terms: provenance.take("loan_terms", self.loan_terms.extract(&response)),
            property_address: provenance
                .take("property_address", self.property_address.extract(&response)),
            dates: self.dates.extract(&response),
            payment_amount: provenance.passthrough(
                "payment_amount",
                response.total,
                FieldSource::DocumentTotal,
            ),
            lender_name: provenance.passthrough(
                "lender_name",
                response.vendor_name().map(str::to_string),
                FieldSource::Vendor,
            ),
        };

        provenance.dates(&parsed_fields.dates);

        if provenance.sources.get("outstanding_balance") == Some(&FieldSource::DocumentTotal) {
            warnings.push(
                "Outstanding balance taken from the document total; it may be the amount due rather than the principal balance"
                    .to_string(),
            );
        }

        let record = MortgageRecord {
            confidence_score: response.confidence,
            document_type: response.document_type.clone(),
            raw_response: response,
            parsed_fields,
            provenance: provenance.sources,
            warnings,
        };

        if record.is_empty() {
            debug!("No mortgage fields recovered from response");
        }

        info!(
            "Normalized statement: {} values resolved ({} of 4 dates)",
            record.provenance.len(),
            record.parsed_fields.dates.present().count()
        );

        record
    }
}

/// Normalize one document response into a mortgage record.
pub fn normalize(response: DocumentResponse) -> MortgageRecord {
    RecordAssembler::new().assemble(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::response::{LineItem, Party};
    use pretty_assertions::assert_eq;

    fn sample() -> DocumentResponse {
        DocumentResponse {
            recognized_text: "APR: 3.75% Loan Term: 30 year fixed".to_string(),
            total: Some(287450.23),
            statement_date: Some("2024-01-15".to_string()),
            due_date: Some("2024-02-01".to_string()),
            vendor: Some(Party {
                name: Some("Test Mortgage Co.".to_string()),
                address: Some("456 Bank St, Finance City, ST 67890".to_string()),
                ..Party::default()
            }),
            line_items: vec![LineItem {
                description: "Principal Balance".to_string(),
                total: Some(287450.23),
                ..LineItem::default()
            }],
            confidence: Some(0.95),
            document_type: Some("receipt".to_string()),
            ..DocumentResponse::default()
        }
    }

    #[test]
    fn test_assemble_sample() {
        let record = normalize(sample());
        let fields = &record.parsed_fields;

        assert_eq!(fields.apr, Some(3.75));
        assert_eq!(fields.outstanding_balance, Some(287450.23));
        assert_eq!(fields.loan_terms.as_deref(), Some("30 year fixed"));
        assert_eq!(fields.loan_amount, None);
        assert_eq!(fields.payment_amount, Some(287450.23));
        assert_eq!(fields.lender_name.as_deref(), Some("Test Mortgage Co."));
        assert_eq!(
            fields.property_address.as_deref(),
            Some("456 Bank St, Finance City, ST 67890")
        );
        assert_eq!(fields.dates.statement_date.as_deref(), Some("2024-01-15"));
        assert_eq!(record.confidence_score, Some(0.95));
        assert_eq!(record.document_type.as_deref(), Some("receipt"));
        assert_eq!(record.raw_response, sample());
    }

    #[test]
    fn test_provenance() {
        let record = normalize(sample());

        assert_eq!(record.source_of("outstanding_balance"), Some(FieldSource::LineItem));
        assert_eq!(record.source_of("apr"), Some(FieldSource::RecognizedText));
        assert_eq!(record.source_of("property_address"), Some(FieldSource::Vendor));
        assert_eq!(record.source_of("loan_amount"), None);
        assert_eq!(record.source_of("statement_date"), Some(FieldSource::ResponseField));
        assert_eq!(record.source_of("due_date"), Some(FieldSource::ResponseField));
        assert_eq!(record.source_of("payment_date"), None);
        assert!(record.warnings.is_empty());
    }

    #[test]
    fn test_text_date_provenance() {
        let record = normalize(DocumentResponse {
            recognized_text: "Payment Date: 02/01/2024".to_string(),
            ..DocumentResponse::default()
        });

        assert_eq!(record.source_of("payment_date"), Some(FieldSource::RecognizedText));
        assert_eq!(record.source_of("statement_date"), None);
    }

    #[test]
    fn test_total_fallback_is_flagged() {
        let mut response = sample();
        response.line_items.clear();

        let record = normalize(response);
        assert_eq!(record.parsed_fields.outstanding_balance, Some(287450.23));
        assert_eq!(record.source_of("outstanding_balance"), Some(FieldSource::DocumentTotal));
        assert_eq!(record.warnings.len(), 1);
    }

    #[test]
    fn test_empty_response() {
        let record = normalize(DocumentResponse::default());

        assert!(record.is_empty());
        assert!(record.provenance.is_empty());
        assert_eq!(record.parsed_fields, ParsedFields::default());
        assert_eq!(record.confidence_score, None);
    }
}
