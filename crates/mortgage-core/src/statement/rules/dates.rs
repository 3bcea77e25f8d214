//! Key date extraction for mortgage statements.

use chrono::NaiveDate;
use tracing::debug;

use super::patterns::{DATE_MDY, DATE_YMD, ORIGINATION_DATE_PATTERNS, PAYMENT_DATE_PATTERNS, first_capture};
use crate::models::record::DateSet;
use crate::models::response::DocumentResponse;

/// Builds the fixed four-entry date set.
///
/// Statement and due dates are taken from the response as-is; payment and
/// origination dates only come from labeled tokens in the recognized text.
pub struct DateSetExtractor;

impl DateSetExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, response: &DocumentResponse) -> DateSet {
        let text = &response.recognized_text;

        let dates = DateSet {
            statement_date: response.statement_date.clone(),
            due_date: response.due_date.clone(),
            payment_date: first_capture(&PAYMENT_DATE_PATTERNS, text).map(str::to_string),
            loan_origination_date: first_capture(&ORIGINATION_DATE_PATTERNS, text).map(str::to_string),
        };

        debug!(
            "Resolved {} of 4 dates",
            dates.present().count()
        );

        dates
    }
}

impl Default for DateSetExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract all tracked dates from a response.
pub fn extract_dates(response: &DocumentResponse) -> DateSet {
    DateSetExtractor::new().extract(response)
}

/// Parse a date string into a calendar date.
///
/// Accepts `M/D/YYYY`, `M-D-YY` (month first, as on US statements) and ISO
/// `YYYY-MM-DD`, optionally followed by a time. Returns `None` for anything
/// else, including impossible dates.
pub fn normalize_date(s: &str) -> Option<NaiveDate> {
    if let Some(caps) = DATE_YMD.captures(s) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let caps = DATE_MDY.captures(s)?;
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year = parse_year(&caps[3])?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    if s.len() <= 2 {
        // Two-digit year: 00-50 are 2000s, 51-99 are 1900s
        Some(if year <= 50 { 2000 + year } else { 1900 + year })
    } else {
        Some(year)
    }
}
