//! Output formatting shared by the process, normalize and batch commands.

use mortgage_core::statement::rules::normalize_date;
use mortgage_core::{DateKind, MortgageRecord, analyze, render};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text summary
    Text,
    /// JSON record
    Json,
    /// CSV row with header
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

/// Options that shape a formatted record.
#[derive(Clone, Copy, Debug)]
pub struct FormatOptions {
    pub format: OutputFormat,
    pub pretty_json: bool,
    pub analyze: bool,
}

/// CSV columns, in order.
pub const CSV_HEADER: [&str; 12] = [
    "lender_name",
    "loan_amount",
    "outstanding_balance",
    "apr",
    "loan_terms",
    "property_address",
    "payment_amount",
    "statement_date",
    "due_date",
    "payment_date",
    "loan_origination_date",
    "confidence_score",
];

pub fn format_record(record: &MortgageRecord, options: FormatOptions) -> anyhow::Result<String> {
    match options.format {
        OutputFormat::Text => Ok(format_text(record, options.analyze)),
        OutputFormat::Json => to_json(record, options.pretty_json),
        OutputFormat::Csv => format_csv(record),
    }
}

pub fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}

fn format_text(record: &MortgageRecord, with_analysis: bool) -> String {
    let mut output = render(record);

    if with_analysis {
        let analysis = analyze(record);
        if !analysis.is_empty() {
            output.push_str(&analysis.render(record.parsed_fields.apr));
        }
    }

    for warning in &record.warnings {
        output.push_str(&format!("\nNote: {}\n", warning));
    }

    output
}

fn format_csv(record: &MortgageRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;
    wtr.write_record(csv_row(record))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// One CSV row for a record; dates are rewritten as ISO when they parse.
pub fn csv_row(record: &MortgageRecord) -> Vec<String> {
    let parsed = &record.parsed_fields;
    let number = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    let text = |v: &Option<String>| v.clone().unwrap_or_default();

    let mut row = vec![
        text(&parsed.lender_name),
        number(parsed.loan_amount),
        number(parsed.outstanding_balance),
        number(parsed.apr),
        text(&parsed.loan_terms),
        text(&parsed.property_address),
        number(parsed.payment_amount),
    ];

    for kind in DateKind::ALL {
        row.push(iso_date(parsed.dates.get(kind)));
    }

    row.push(number(record.confidence_score));
    row
}

fn iso_date(value: Option<&str>) -> String {
    match value {
        Some(raw) => normalize_date(raw)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| raw.to_string()),
        None => String::new(),
    }
}
