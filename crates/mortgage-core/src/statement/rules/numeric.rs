//! Lenient numeric coercion for amounts and rates.

use serde_json::Value;

/// Coerce a loosely typed value into a number.
///
/// Numbers pass through; strings are cleaned with [`parse_number`]; anything
/// else (null, booleans, arrays, objects) is absent.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

/// Parse a decorated numeric string such as `"$1,234.56"`, `"3.75%"` or `" -12 "`.
///
/// Dollar signs, thousands separators, percent signs and whitespace are
/// stripped. Any other residue makes the value absent.
pub fn parse_number(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%') && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    // `f64::from_str` also accepts "inf", "nan" and exponents; only plain
    // decimals are numbers here.
    if !cleaned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
    {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
