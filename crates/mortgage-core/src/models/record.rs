//! Normalized mortgage record produced by the record assembler.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::response::DocumentResponse;

/// The normalized result of one extraction pass.
///
/// Absent fields are `None` and serialize as `null`; a value of zero always
/// means the document actually stated zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageRecord {
    /// The response the record was built from, kept for audit.
    pub raw_response: DocumentResponse,

    /// Extracted mortgage facts.
    pub parsed_fields: ParsedFields,

    /// Service confidence score, passed through.
    pub confidence_score: Option<f64>,

    /// Service document classification, passed through.
    pub document_type: Option<String>,

    /// Which part of the response resolved each present field.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub provenance: BTreeMap<String, FieldSource>,

    /// Notes about heuristic resolutions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Mortgage facts extracted from a statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedFields {
    /// Original loan amount.
    pub loan_amount: Option<f64>,

    /// Outstanding (principal) balance.
    pub outstanding_balance: Option<f64>,

    /// Annual percentage rate, as a percentage (3.75 means 3.75%).
    pub apr: Option<f64>,

    /// Term description as written in the document, e.g. "30 year fixed".
    pub loan_terms: Option<String>,

    /// Property address.
    pub property_address: Option<String>,

    /// Key dates.
    pub dates: DateSet,

    /// Payment amount (the document total).
    pub payment_amount: Option<f64>,

    /// Lender name (the vendor name).
    pub lender_name: Option<String>,
}

/// The fixed set of dates tracked for a statement.
///
/// Every key is always present; only the values are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSet {
    pub statement_date: Option<String>,
    pub due_date: Option<String>,
    pub payment_date: Option<String>,
    pub loan_origination_date: Option<String>,
}

/// Key of a [`DateSet`] entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateKind {
    StatementDate,
    DueDate,
    PaymentDate,
    LoanOriginationDate,
}

impl DateKind {
    /// All kinds, in rendering order.
    pub const ALL: [DateKind; 4] = [
        DateKind::StatementDate,
        DateKind::DueDate,
        DateKind::PaymentDate,
        DateKind::LoanOriginationDate,
    ];

    /// Snake-case key, as used in JSON output.
    pub fn key(&self) -> &'static str {
        match self {
            DateKind::StatementDate => "statement_date",
            DateKind::DueDate => "due_date",
            DateKind::PaymentDate => "payment_date",
            DateKind::LoanOriginationDate => "loan_origination_date",
        }
    }

    /// Title-cased label for display.
    pub fn title(&self) -> &'static str {
        match self {
            DateKind::StatementDate => "Statement Date",
            DateKind::DueDate => "Due Date",
            DateKind::PaymentDate => "Payment Date",
            DateKind::LoanOriginationDate => "Loan Origination Date",
        }
    }
}

impl DateSet {
    /// Get the value for a date kind.
    pub fn get(&self, kind: DateKind) -> Option<&str> {
        match kind {
            DateKind::StatementDate => self.statement_date.as_deref(),
            DateKind::DueDate => self.due_date.as_deref(),
            DateKind::PaymentDate => self.payment_date.as_deref(),
            DateKind::LoanOriginationDate => self.loan_origination_date.as_deref(),
        }
    }

    /// Iterate over all four entries in rendering order.
    pub fn iter(&self) -> impl Iterator<Item = (DateKind, Option<&str>)> + '_ {
        DateKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// Iterate over the entries that have a value.
    pub fn present(&self) -> impl Iterator<Item = (DateKind, &str)> + '_ {
        self.iter().filter_map(|(kind, value)| value.map(|v| (kind, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}

/// Where in the response a field was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// A line item whose description matched.
    LineItem,
    /// A custom field whose name matched.
    CustomField,
    /// A pattern over the recognized text.
    RecognizedText,
    /// The document grand total.
    DocumentTotal,
    /// The vendor block.
    Vendor,
    /// The bill-to block.
    BillTo,
    /// A top-level response field.
    ResponseField,
}

impl fmt::Display for FieldSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldSource::LineItem => "line item",
            FieldSource::CustomField => "custom field",
            FieldSource::RecognizedText => "recognized text",
            FieldSource::DocumentTotal => "document total",
            FieldSource::Vendor => "vendor",
            FieldSource::BillTo => "bill-to",
            FieldSource::ResponseField => "response field",
        };
        f.write_str(name)
    }
}

impl MortgageRecord {
    /// Source that resolved the named field, if it was resolved.
    pub fn source_of(&self, field: &str) -> Option<FieldSource> {
        self.provenance.get(field).copied()
    }

    /// Whether no mortgage fact at all was recovered.
    pub fn is_empty(&self) -> bool {
        let p = &self.parsed_fields;
        p.loan_amount.is_none()
            && p.outstanding_balance.is_none()
            && p.apr.is_none()
            && p.loan_terms.is_none()
            && p.property_address.is_none()
            && p.payment_amount.is_none()
            && p.lender_name.is_none()
            && p.dates.is_empty()
    }
}
