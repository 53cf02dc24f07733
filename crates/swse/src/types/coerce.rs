//! Lenient coercions between loosely typed rules values.
//!
//! None of these functions fail: text that does not read as a number is
//! passed through unchanged, matching how authored rules data is consumed.

use crate::types::Value;

/// Coerce a value toward a number.
///
/// - lists sum their elements (falling back to text if any element is not
///   numeric)
/// - `Empty` becomes 0
/// - structured `{ "value": ... }` maps unwrap recursively
/// - booleans become 0 or 1
/// - text is read by its leading numeric prefix (`"5 kg"` is 5); text without
///   one is returned unchanged
pub fn to_number(value: &Value) -> Value {
    match value {
        Value::Empty => Value::Number(0.0),
        Value::Bool(b) => Value::Number(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => Value::Number(*n),
        Value::String(s) => match numeric_prefix(s) {
            Some(n) => Value::Number(n),
            None => value.clone(),
        },
        Value::List(items) => {
            let mut total = 0.0;
            for item in items {
                match to_number(item) {
                    Value::Number(n) => total += n,
                    _ => return Value::String(value.to_string()),
                }
            }
            Value::Number(total)
        }
        Value::Map(map) => match map.get("value") {
            Some(inner) => to_number(inner),
            None => Value::Number(0.0),
        },
    }
}

/// Coerce a value to a boolean.
///
/// Numbers are true when positive; text is true for `"true"` or `"t"` in any
/// case; structured maps unwrap when their inner value is set.
pub fn to_boolean(value: &Value) -> bool {
    match value {
        Value::Empty | Value::List(_) => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n > 0.0,
        Value::String(s) => {
            let lower = s.to_lowercase();
            lower == "true" || lower == "t"
        }
        Value::Map(map) => match map.get("value") {
            Some(inner) if !inner.is_falsy() => to_boolean(inner),
            _ => false,
        },
    }
}

/// The number a value stands for in arithmetic, if it stands for one at all.
///
/// Text must read as a number in full (surrounding whitespace aside); the
/// empty string counts as zero.
pub fn as_arithmetic(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) if !n.is_nan() => Some(*n),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => strict_number(s),
        Value::Number(_) | Value::Empty | Value::List(_) | Value::Map(_) => None,
    }
}

/// Read the leading decimal number of `text`, ignoring leading whitespace and
/// anything after the number.
pub fn numeric_prefix(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let len = decimal_len(trimmed, true);
    if len == 0 {
        return None;
    }
    trimmed[..len].parse().ok()
}

/// Read the leading integer of `text`, ignoring anything after it.
pub fn integer_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let len = decimal_len(trimmed, false);
    if len == 0 {
        return None;
    }
    trimmed[..len].parse().ok()
}

/// Read `text` as a number only if the whole of it is one.
pub fn strict_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    if decimal_len(trimmed, true) != trimmed.len() {
        return None;
    }
    trimmed.parse().ok()
}

/// Length in bytes of the signed decimal at the start of `text`, or 0 if there
/// is none.
fn decimal_len(text: &str, allow_fraction: bool) -> usize {
    let bytes = text.as_bytes();
    let mut index = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        index += 1;
    }
    let digits_start = index;
    while bytes.get(index).is_some_and(u8::is_ascii_digit) {
        index += 1;
    }
    let mut digits = index - digits_start;
    if allow_fraction && bytes.get(index) == Some(&b'.') {
        let fraction_start = index + 1;
        let mut end = fraction_start;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        if end > fraction_start {
            digits += end - fraction_start;
            index = end;
        }
    }
    if digits == 0 { 0 } else { index }
}
