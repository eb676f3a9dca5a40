//! Lenient readers for host-supplied JSON scalars.
//!
//! Hosts that localize their settings into the page stringify every scalar,
//! so `"8"`, `8` and `"8px"` all have to read as the same number.

use serde_json::Value;

/// Reads a JSON number or the leading integer of a string (`"-8px"` -> -8).
pub(crate) fn lenient_integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(text) => leading_integer(text),
        _ => None,
    }
}

/// A minimum length read the way `Number(value)` coerces it. Anything that is
/// not a positive number (null, `""`, `"8px"`, objects) admits every length.
pub(crate) fn length_threshold(value: &Value) -> usize {
    let number = match value {
        Value::Bool(true) => 1.0,
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) if !text.trim().is_empty() => {
            text.trim().parse::<f64>().unwrap_or(0.0)
        }
        _ => 0.0,
    };
    if number.is_nan() || number <= 0.0 {
        0
    } else if number >= usize::MAX as f64 {
        usize::MAX
    } else {
        number.ceil() as usize
    }
}

/// `value || default` for numbers: zero, empty and non-numeric fall back.
pub(crate) fn truthy_integer(value: Option<&Value>, default: i64) -> i64 {
    lenient_integer(value)
        .filter(|number| *number != 0)
        .unwrap_or(default)
}

pub(crate) fn truthy_string(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        _ => default.to_string(),
    }
}

/// Only a literal `true` or the string `"1"` enable a flag.
pub(crate) fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(enabled)) => *enabled,
        Some(Value::String(text)) => text == "1",
        _ => false,
    }
}

pub(crate) fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
