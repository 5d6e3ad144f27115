//! Canonical textual form of [`Value`]s.
//!
//! The read path (driver value -> record text) and the write path
//! (record value -> SQL literal) both go through [`to_literal`], so a
//! sequencer value read from a row renders identically when it is later
//! spliced back into a `WHERE` predicate.

use crate::core::value::Value;

/// Renders `value` as text. With `quote` set, strings and byte sequences are
/// wrapped in single quotes (embedded quotes doubled) and `Null` becomes the
/// SQL keyword `NULL`; otherwise `Null` renders as the empty string.
pub fn to_literal(value: &Value, quote: bool) -> String {
    match value {
        Value::Int(v) => v.to_string(),
        Value::Uint(v) => v.to_string(),
        Value::Float(v) => format_float(*v),
        Value::Boolean(v) => v.to_string(),
        Value::String(s) => text_literal(s, quote),
        Value::Bytes(b) => text_literal(&String::from_utf8_lossy(b), quote),
        Value::Null if quote => "NULL".to_string(),
        Value::Null => String::new(),
    }
}

/// Quotes `s` as a SQL string literal.
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

fn text_literal(s: &str, quote: bool) -> String {
    if quote {
        quote_string(s)
    } else {
        s.to_string()
    }
}

/// Scientific notation with the shortest round-tripping mantissa and a signed,
/// two-digit minimum exponent: `1.5E+00`, `1.2345E+03`, `2.5E-07`.
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v.is_sign_positive() { "+Inf" } else { "-Inf" }.to_string();
    }

    let raw = format!("{v:E}");
    let Some((mantissa, exponent)) = raw.split_once('E') else {
        return raw;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}E{sign}{:02}", exponent.unsigned_abs())
}

/// True when `text` reads as a plain number and can therefore be spliced into
/// SQL without quoting.
pub fn is_numeric_literal(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }
    if text.parse::<i64>().is_ok() || text.parse::<u64>().is_ok() {
        return true;
    }
    text.parse::<f64>().map(|f| f.is_finite()).unwrap_or(false)
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
}
