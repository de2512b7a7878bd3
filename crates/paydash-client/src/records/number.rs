use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parses a display amount such as `₹1,234.50`.
///
/// Every character outside `[0-9.-]` is dropped first, then the longest
/// leading decimal literal is read. Text with no literal, or one that does
/// not fit a finite `f64`, yields `0.0`.
pub fn parse_amount(raw: &str) -> f64 {
    let cleansed = raw
        .chars()
        .filter(|character| character.is_ascii_digit() || matches!(character, '.' | '-'))
        .collect::<String>();
    parse_float_prefix(&cleansed).unwrap_or(0.0)
}

/// Reads the longest leading float literal (`[+-]digits[.digits][e[+-]digits]`)
/// after leading whitespace. Trailing garbage is ignored.
pub fn parse_float_prefix(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0usize;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let integer_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digit_count = end - integer_start;

    if bytes.get(end) == Some(&b'.') {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while bytes.get(fraction_end).is_some_and(u8::is_ascii_digit) {
            fraction_end += 1;
        }
        let fraction_digits = fraction_end - fraction_start;
        if digit_count > 0 || fraction_digits > 0 {
            end = fraction_end;
            digit_count += fraction_digits;
        }
    }

    if digit_count == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits_start = exponent_end;
        while bytes.get(exponent_end).is_some_and(u8::is_ascii_digit) {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits_start {
            end = exponent_end;
        }
    }

    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

/// Coerces a loosely typed JSON value to a number, `0.0` when it is not one.
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().filter(|parsed| parsed.is_finite()),
        Value::String(text) => parse_float_prefix(text),
        _ => None,
    }
    .unwrap_or(0.0)
}

pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let coerced = coerce_number(&value);
    if coerced == 0.0 && !is_blank_or_zero(&value) {
        tracing::warn!(raw = %value, "non-numeric rate field counted as 0");
    }
    Ok(coerced)
}

pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn is_blank_or_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty() || parse_float_prefix(text).is_some(),
        Value::Number(_) => true,
        _ => false,
    }
}
