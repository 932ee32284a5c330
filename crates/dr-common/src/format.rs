//! Cell value formatting.
//!
//! Converts a raw JSON cell value into display text according to the
//! column type. Formatting never fails: values of an unexpected shape are
//! passed through as text.

use crate::model::ColumnType;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Text produced for values that cannot be parsed as a date.
pub const INVALID_DATE: &str = "Invalid Date";

/// Format a cell value for display.
///
/// `None` and JSON `null` both render as an empty string.
pub fn format_cell(value: Option<&Value>, column_type: ColumnType) -> String {
    let value = match value {
        None | Some(Value::Null) => return String::new(),
        Some(v) => v,
    };

    match column_type {
        ColumnType::Percentage => match value.as_f64() {
            Some(n) => format_percentage(n),
            None => format!("{}%", display_text(value)),
        },
        ColumnType::Number => match value.as_f64() {
            Some(n) => format_number(n),
            None => display_text(value),
        },
        ColumnType::Date => format_date(value),
        ColumnType::Text => display_text(value),
    }
}

/// Format a number with exactly one fractional digit followed by `%`.
///
/// Exact ties round away from zero (`12.25` gives `12.3%`).
pub fn format_percentage(n: f64) -> String {
    format!("{}%", to_fixed(n, 1))
}

/// Fixed-point text with `digits` fractional digits, computed from the exact
/// binary value with ties rounded away from zero.
fn to_fixed(n: f64, digits: i32) -> String {
    let precision = digits as usize;
    if !n.is_finite() {
        return format!("{:.*}", precision, n);
    }
    let scale = 10f64.powi(digits);
    let scaled = n * scale;
    // An exact tie must be a multiple of 2^-(digits+1), which scales without error.
    let exact_tie = (n * 2f64.powi(digits + 1)).fract() == 0.0 && scaled.fract().abs() == 0.5;
    if exact_tie {
        format!("{:.*}", precision, scaled.round() / scale)
    } else {
        format!("{:.*}", precision, n)
    }
}

/// Format a number with grouped thousands and at most three fractional digits.
///
/// Rounds the shortest decimal form of `n` half away from zero.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let (int_part, frac_part) = round_shortest(n.abs(), 3);
    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3 + 5);
    if n.is_sign_negative() {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(&frac_part);
    }
    out
}

/// Split the shortest decimal form of a non-negative `n` into integer and
/// fractional digits, rounded to at most `max_fraction` digits with trailing
/// zeros removed.
fn round_shortest(n: f64, max_fraction: usize) -> (String, String) {
    let shortest = n.to_string();
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((&shortest, ""));
    if frac_part.len() <= max_fraction {
        return (
            int_part.to_string(),
            frac_part.trim_end_matches('0').to_string(),
        );
    }

    let round_up = frac_part.as_bytes()[max_fraction] >= b'5';
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(max_fraction))
        .collect();
    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - max_fraction;
    let int_part: String = digits[..split].iter().map(|&d| d as char).collect();
    let frac_part: String = digits[split..].iter().map(|&d| d as char).collect();
    (int_part, frac_part.trim_end_matches('0').to_string())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a date-like value as `M/D/YYYY`.
///
/// Accepts RFC 3339 timestamps, common date and date-time layouts, and
/// numeric epoch milliseconds. Rendering uses UTC.
pub fn format_date(value: &Value) -> String {
    match parse_date(value) {
        Some(dt) => dt.format("%-m/%-d/%Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            Utc.timestamp_millis_opt(millis).single()
        }
        Value::String(s) => parse_date_str(s.trim()),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for layout in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
            return Some(naive.and_utc());
        }
    }
    for layout in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, layout) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

/// Render a JSON value the way a browser stringifies it.
///
/// Strings lose their quotes, arrays join their elements with commas,
/// objects collapse to `[object Object]`.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_text)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// JavaScript `String(n)`: whole floats drop their `.0`, and the plain decimal
/// form is used between `1e-6` and `1e21`.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
        Some(f) if n.is_f64() && (1e-6..1e21).contains(&f.abs()) => f.to_string(),
        _ => n.to_string(),
    }
}
