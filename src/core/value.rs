//! Raw field values and their numeric coercion.
//!
//! Entity data arrives as loosely-typed JSON: numbers, numeric strings, empty
//! strings, nulls, and the occasional boolean. [`RawValue`] keeps the original
//! shape so untouched fields pass through unchanged, and [`RawValue::to_number`]
//! applies the loose-number rules used when gathering statistics and bucketing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One raw field value as supplied by the caller.
///
/// An absent key is the "undefined" case and is represented by the record
/// simply not containing the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    /// Arrays and objects. Never numeric.
    Other(serde_json::Value),
}

impl RawValue {
    /// Build a numeric value from an `f64`.
    ///
    /// JSON numbers cannot hold non-finite values, so those are kept as their
    /// textual spelling, which coerces back to the same number.
    pub fn from_f64(value: f64) -> Self {
        match serde_json::Number::from_f64(value) {
            Some(number) => Self::Number(number),
            None if value.is_nan() => Self::Text("NaN".to_string()),
            None if value > 0.0 => Self::Text("Infinity".to_string()),
            None => Self::Text("-Infinity".to_string()),
        }
    }

    /// Null and the empty string count as missing. They never reach coercion.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Coerce to a number, returning `None` when the result is not-a-number.
    ///
    /// Callers check [`RawValue::is_missing`] first; coercing a missing value
    /// here gives `None` for null and `Some(0.0)` for an empty string.
    pub fn to_number(&self) -> Option<f64> {
        let number = match self {
            Self::Null | Self::Other(_) => return None,
            Self::Bool(flag) => f64::from(u8::from(*flag)),
            Self::Number(number) => number.as_f64()?,
            Self::Text(text) => parse_numeric_text(text)?,
        };
        (!number.is_nan()).then_some(number)
    }

    /// Missing-aware coercion: `None` for missing and non-numeric values alike.
    pub fn valid_number(&self) -> Option<f64> {
        if self.is_missing() {
            return None;
        }
        self.to_number()
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => write!(f, "{text}"),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Parse a numeric string the way a loose `Number(...)` conversion does.
fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    if let Some(value) = parse_radix_literal(trimmed) {
        return value;
    }

    // Rust's float parser also accepts "inf" and "nan"; only plain decimal
    // literals are numeric here.
    let is_decimal_literal = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        && trimmed.chars().any(|c| c.is_ascii_digit());
    if !is_decimal_literal {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// `0x`, `0o` and `0b` prefixed integers. Signs are not allowed with a prefix.
///
/// Returns `None` when the text carries no radix prefix, and `Some(None)` when
/// it does but the digits are invalid.
fn parse_radix_literal(text: &str) -> Option<Option<f64>> {
    let lower = text.to_ascii_lowercase();
    let (digits, radix) = if let Some(rest) = lower.strip_prefix("0x") {
        (rest.to_string(), 16)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (rest.to_string(), 8)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (rest.to_string(), 2)
    } else {
        return None;
    };

    if digits.is_empty() {
        return Some(None);
    }
    let parsed = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values() {
        assert!(RawValue::Null.is_missing());
        assert!(RawValue::from("").is_missing());
        assert!(!RawValue::from(" ").is_missing());
        assert!(!RawValue::from(0_i64).is_missing());
        assert!(!RawValue::from(false).is_missing());
    }

    #[test]
    fn test_numbers_and_numeric_strings() {
        assert_eq!(RawValue::from(42_i64).to_number(), Some(42.0));
        assert_eq!(RawValue::from(-2.5).to_number(), Some(-2.5));
        assert_eq!(RawValue::from("17").to_number(), Some(17.0));
        assert_eq!(RawValue::from("  3.5 ").to_number(), Some(3.5));
        assert_eq!(RawValue::from(".5").to_number(), Some(0.5));
        assert_eq!(RawValue::from("1e3").to_number(), Some(1000.0));
        assert_eq!(RawValue::from("0x1F").to_number(), Some(31.0));
        assert_eq!(RawValue::from("0b101").to_number(), Some(5.0));
        assert_eq!(RawValue::from("0o17").to_number(), Some(15.0));
    }

    #[test]
    fn test_whitespace_only_string_is_zero() {
        assert_eq!(RawValue::from("   ").to_number(), Some(0.0));
        assert_eq!(RawValue::from("   ").valid_number(), Some(0.0));
    }

    #[test]
    fn test_non_numeric_values() {
        assert_eq!(RawValue::from("abc").to_number(), None);
        assert_eq!(RawValue::from("12abc").to_number(), None);
        assert_eq!(RawValue::from("nan").to_number(), None);
        assert_eq!(RawValue::from("inf").to_number(), None);
        assert_eq!(RawValue::from("NaN").to_number(), None);
        assert_eq!(RawValue::from("0x").to_number(), None);
        assert_eq!(RawValue::from("0xZZ").to_number(), None);
        assert_eq!(RawValue::from("-").to_number(), None);
        assert_eq!(RawValue::Other(serde_json::json!([1])).to_number(), None);
        assert_eq!(RawValue::Null.to_number(), None);
    }

    #[test]
    fn test_booleans_and_infinity() {
        assert_eq!(RawValue::from(true).to_number(), Some(1.0));
        assert_eq!(RawValue::from(false).to_number(), Some(0.0));
        assert_eq!(RawValue::from("Infinity").to_number(), Some(f64::INFINITY));
        assert_eq!(RawValue::from("-Infinity").to_number(), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_valid_number_skips_missing() {
        assert_eq!(RawValue::Null.valid_number(), None);
        assert_eq!(RawValue::from("").valid_number(), None);
        assert_eq!(RawValue::from("8").valid_number(), Some(8.0));
    }

    #[test]
    fn test_from_f64_non_finite_round_trips_through_text() {
        assert_eq!(RawValue::from_f64(f64::NAN), RawValue::from("NaN"));
        assert_eq!(
            RawValue::from_f64(f64::INFINITY).to_number(),
            Some(f64::INFINITY)
        );
        assert_eq!(RawValue::from_f64(f64::NAN).valid_number(), None);
    }

    #[test]
    fn test_deserialize_untagged_shapes() {
        let values: Vec<RawValue> =
            serde_json::from_str(r#"[null, true, 3, 2.5, "x", [1, 2], {"a": 1}]"#).unwrap();
        assert_eq!(values[0], RawValue::Null);
        assert_eq!(values[1], RawValue::Bool(true));
        assert_eq!(values[2], RawValue::from(3_i64));
        assert_eq!(values[3].to_number(), Some(2.5));
        assert_eq!(values[4], RawValue::from("x"));
        assert!(matches!(values[5], RawValue::Other(_)));
        assert!(matches!(values[6], RawValue::Other(_)));
    }

    #[test]
    fn test_integers_serialize_without_fraction() {
        let json = serde_json::to_string(&RawValue::from(10_i64)).unwrap();
        assert_eq!(json, "10");
    }
}
