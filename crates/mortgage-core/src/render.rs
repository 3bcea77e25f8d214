//! Plain-text rendering of mortgage records.

use crate::models::record::MortgageRecord;

/// Render a record as a human-readable summary.
///
/// Only present fields produce lines. Currency is shown as `$1,234.56`, the
/// APR as a bare percentage such as `3.75%`.
pub fn render(record: &MortgageRecord) -> String {
    let parsed = &record.parsed_fields;
    let mut output = String::from("=== Mortgage Statement Summary ===\n\n");

    if let Some(lender) = &parsed.lender_name {
        output.push_str(&format!("Lender: {}\n", lender));
    }
    if let Some(amount) = parsed.loan_amount {
        output.push_str(&format!("Original Loan Amount: {}\n", format_currency(amount)));
    }
    if let Some(balance) = parsed.outstanding_balance {
        output.push_str(&format!("Outstanding Balance: {}\n", format_currency(balance)));
    }
    if let Some(apr) = parsed.apr {
        output.push_str(&format!("APR: {}%\n", apr));
    }
    if let Some(terms) = &parsed.loan_terms {
        output.push_str(&format!("Loan Terms: {}\n", terms));
    }
    if let Some(address) = &parsed.property_address {
        output.push_str(&format!("Property Address: {}\n", address));
    }
    if let Some(payment) = parsed.payment_amount {
        output.push_str(&format!("Payment Amount: {}\n", format_currency(payment)));
    }

    if !parsed.dates.is_empty() {
        output.push_str("\n=== Important Dates ===\n");
        for (kind, value) in parsed.dates.present() {
            output.push_str(&format!("{}: {}\n", kind.title(), value));
        }
    }

    if let Some(confidence) = record.confidence_score {
        output.push_str(&format!("\nConfidence Score: {}\n", confidence));
    }

    output
}

/// Format an amount as US currency with thousands separators (`$350,000.00`).
///
/// Negative amounts are prefixed with a minus sign (`-$12.00`).
pub fn format_currency(amount: f64) -> String {
    let s = format!("{:.2}", amount.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    let sign = if amount < 0.0 && s != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, formatted, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{DateSet, ParsedFields};
    use crate::models::response::DocumentResponse;

    fn record(parsed_fields: ParsedFields, confidence_score: Option<f64>) -> MortgageRecord {
        MortgageRecord {
            raw_response: DocumentResponse::default(),
            parsed_fields,
            confidence_score,
            document_type: None,
            provenance: Default::default(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(350000.0), "$350,000.00");
        assert_eq!(format_currency(287450.23), "$287,450.23");
        assert_eq!(format_currency(1620.5), "$1,620.50");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(12.0), "$12.00");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-1234.5), "-$1,234.50");
        assert_eq!(format_currency(1234567890.12), "$1,234,567,890.12");
    }

    #[test]
    fn test_render_full_record() {
        let parsed = ParsedFields {
            lender_name: Some("Test Bank".to_string()),
            loan_amount: Some(350000.0),
            outstanding_balance: Some(287450.23),
            apr: Some(3.75),
            loan_terms: Some("30 year fixed".to_string()),
            property_address: Some("123 Main St, Anytown, ST 12345".to_string()),
            payment_amount: Some(1620.50),
            dates: DateSet {
                statement_date: Some("2024-01-15".to_string()),
                due_date: Some("2024-02-01".to_string()),
                ..DateSet::default()
            },
        };

        let output = render(&record(parsed, Some(0.98)));

        for expected in [
            "Lender: Test Bank",
            "Original Loan Amount: $350,000.00",
            "Outstanding Balance: $287,450.23",
            "APR: 3.75%",
            "Loan Terms: 30 year fixed",
            "Property Address: 123 Main St",
            "Payment Amount: $1,620.50",
            "=== Important Dates ===",
            "Statement Date: 2024-01-15",
            "Due Date: 2024-02-01",
            "Confidence Score: 0.98",
        ] {
            assert!(output.contains(expected), "missing {:?} in:\n{}", expected, output);
        }
        assert!(!output.contains("Payment Date"));
    }

    #[test]
    fn test_render_field_order() {
        let parsed = ParsedFields {
            lender_name: Some("Lender".to_string()),
            payment_amount: Some(10.0),
            apr: Some(4.0),
            ..ParsedFields::default()
        };

        let output = render(&record(parsed, None));
        let lender = output.find("Lender:").unwrap();
        let apr = output.find("APR:").unwrap();
        let payment = output.find("Payment Amount:").unwrap();
        assert!(lender < apr && apr < payment);
        assert!(output.contains("APR: 4%"));
    }

    #[test]
    fn test_render_empty_record() {
        let output = render(&record(ParsedFields::default(), None));
        assert_eq!(output, "=== Mortgage Statement Summary ===\n\n");
    }

    #[test]
    fn test_render_zero_is_shown() {
        let parsed = ParsedFields {
            loan_amount: Some(0.0),
            ..ParsedFields::default()
        };

        let output = render(&record(parsed, None));
        assert!(output.contains("Original Loan Amount: $0.00"));
    }
}
