//! End-to-end normalization of service responses.

use mortgage_core::{DateKind, DocumentResponse, FieldSource, analyze, normalize, render};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

fn response(value: serde_json::Value) -> DocumentResponse {
    serde_json::from_value(value).unwrap()
}

#[test]
fn text_scenario_with_total_fallback() {
    let record = normalize(response(json!({
        "ocr_text": "APR: 3.75% Loan Term: 30 year fixed",
        "total": 287450.23
    })));
    let fields = &record.parsed_fields;

    assert_eq!(fields.apr, Some(3.75));
    assert!(fields.loan_terms.as_deref().unwrap().contains("30 year"));
    assert_eq!(fields.outstanding_balance, Some(287450.23));
    assert_eq!(fields.loan_amount, None);
    assert_eq!(record.source_of("outstanding_balance"), Some(FieldSource::DocumentTotal));
    assert!(!record.warnings.is_empty());
}

#[test]
fn principal_balance_line_item() {
    let record = normalize(response(json!({
        "line_items": [{"description": "Principal Balance", "total": 287450.23}]
    })));

    assert_eq!(record.parsed_fields.outstanding_balance, Some(287450.23));
    assert_eq!(record.source_of("outstanding_balance"), Some(FieldSource::LineItem));
}

#[test]
fn interest_rate_custom_field() {
    let record = normalize(response(json!({
        "custom_fields": [{"name": "Interest Rate", "value": "4.25%"}]
    })));

    assert_eq!(record.parsed_fields.apr, Some(4.25));
    assert_eq!(record.source_of("apr"), Some(FieldSource::CustomField));
}

#[test]
fn line_item_beats_custom_field_for_loan_amount() {
    let record = normalize(response(json!({
        "line_items": [{"description": "Original Loan Amount", "total": 350000.0}],
        "custom_fields": [{"name": "Loan Amount", "value": "$1,000.00"}]
    })));

    assert_eq!(record.parsed_fields.loan_amount, Some(350000.0));
}

#[test]
fn uppercase_line_item_matches() {
    let record = normalize(response(json!({
        "line_items": [{"description": "UNPAID PRINCIPAL BALANCE", "total": "$12,500.00"}]
    })));

    assert_eq!(record.parsed_fields.outstanding_balance, Some(12500.0));
}

#[test]
fn zero_total_without_line_item_leaves_balance_absent() {
    let record = normalize(response(json!({"total": 0})));

    assert_eq!(record.parsed_fields.outstanding_balance, None);
    assert_eq!(record.parsed_fields.payment_amount, Some(0.0));
}

#[test]
fn nulls_everywhere_are_tolerated() {
    let record = normalize(response(json!({
        "ocr_text": null,
        "line_items": null,
        "custom_fields": null,
        "vendor": null,
        "bill_to": null,
        "total": null,
        "date": null,
        "due_date": null
    })));

    assert!(record.is_empty());
}

#[test]
fn raw_response_is_kept_as_received() {
    let input = json!({
        "confidence": "0.9",
        "date": {"raw": "Jan"},
        "ocr_text": "x",
        "total": "n/a"
    });

    let record = normalize(DocumentResponse::from_value(input.clone()).unwrap());

    assert_eq!(record.parsed_fields.payment_amount, None);
    assert_eq!(serde_json::to_value(&record.raw_response).unwrap(), input);
    assert_eq!(serde_json::to_value(&record).unwrap()["raw_response"], input);
}

#[test]
fn numeric_labels_do_not_reject_the_document() {
    let record = normalize(
        DocumentResponse::from_json(
            r#"{
                "line_items": [{"description": 2024, "total": 5}],
                "custom_fields": [{"name": 7, "value": "x"}, {"name": "APR", "value": "4.25%"}]
            }"#,
        )
        .unwrap(),
    );

    assert_eq!(record.parsed_fields.apr, Some(4.25));
    assert_eq!(record.raw_response.line_items[0].description, "2024");
}

#[test]
fn serialized_record_has_all_date_keys() {
    let record = normalize(DocumentResponse::default());
    let value = serde_json::to_value(&record).unwrap();
    let dates = value["parsed_fields"]["dates"].as_object().unwrap();

    for kind in DateKind::ALL {
        assert!(dates.contains_key(kind.key()), "missing {}", kind.key());
    }
}

#[test]
fn full_statement_renders_and_analyzes() {
    let record = normalize(response(json!({
        "ocr_text": "Interest Rate: 3.25%\nLoan Term: 360 months\nPayment Date: 03/01/2024",
        "total": 1620.50,
        "date": "2024-02-01",
        "due_date": "2024-03-01",
        "confidence": 0.97,
        "vendor": {"name": "First National Mortgage", "address": "1 Bank Plaza, Metro, ST 10001"},
        "line_items": [
            {"description": "Original Loan Amount", "total": 400000.0},
            {"description": "Principal Balance", "total": 300000.0}
        ]
    })));

    let output = render(&record);
    assert!(output.contains("Lender: First National Mortgage"));
    assert!(output.contains("Original Loan Amount: $400,000.00"));
    assert!(output.contains("Outstanding Balance: $300,000.00"));
    assert!(output.contains("APR: 3.25%"));
    assert!(output.contains("Loan Terms: 360 months"));
    assert!(output.contains("Payment Date: 03/01/2024"));
    assert!(output.contains("Confidence Score: 0.97"));

    let analysis = analyze(&record);
    assert_eq!(analysis.principal_paid, Some(100000.0));
    assert_eq!(analysis.equity_percentage, Some(25.0));
}

fn arb_response() -> impl Strategy<Value = DocumentResponse> {
    (
        ".{0,200}",
        prop::collection::vec((".{0,40}", prop::option::of(-1.0e9f64..1.0e9)), 0..4),
        prop::option::of(-1.0e9f64..1.0e9),
        prop::option::of("[0-9/-]{0,12}"),
    )
        .prop_map(|(text, items, total, date)| {
            serde_json::from_value(json!({
                "ocr_text": text,
                "line_items": items
                    .into_iter()
                    .map(|(description, total)| json!({"description": description, "total": total}))
                    .collect::<Vec<_>>(),
                "total": total,
                "date": date,
            }))
            .unwrap()
        })
}

proptest! {
    #[test]
    fn normalize_never_panics_and_keeps_date_keys(response in arb_response()) {
        let record = normalize(response);
        let value = serde_json::to_value(&record).unwrap();
        let dates = value["parsed_fields"]["dates"].as_object().unwrap();
        prop_assert_eq!(dates.len(), 4);
    }

    #[test]
    fn normalize_is_idempotent(response in arb_response()) {
        let first = normalize(response.clone());
        let second = normalize(response);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn arbitrary_text_never_panics(text in "\\PC*") {
        let record = normalize(DocumentResponse {
            recognized_text: text,
            ..DocumentResponse::default()
        });
        let _ = render(&record);
    }
}
