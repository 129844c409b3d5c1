//! Amount coercion
//!
//! Amounts are typed as free text and coerced on every keystroke. Coercion
//! never fails: text without a numeric prefix becomes NaN, which is carried
//! through the store and the remote sink like any other value.

/// Parses raw amount text into a number.
///
/// Leading whitespace is skipped and the longest decimal literal prefix is
/// used, so `"12.5 usd"` yields `12.5` and `"1e"` yields `1`. Text with no
/// numeric prefix yields NaN.
pub fn parse_amount(raw: &str) -> f64 {
    let text = raw.trim_start();
    let prefix = literal_prefix(text);

    if prefix.is_empty() {
        return infinity_prefix(text).unwrap_or(f64::NAN);
    }

    prefix.parse::<f64>().unwrap_or(f64::NAN)
}

/// Compares two amounts by value, treating NaN as equal to NaN
pub fn same_amount(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Formats an amount the way it is shown in an input field
pub fn format_amount(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    format!("{}", value)
}

/// Returns the longest prefix of `text` that is a decimal literal
fn literal_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return "";
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &text[..end]
}

fn infinity_prefix(text: &str) -> Option<f64> {
    let (sign, rest) = match text.as_bytes().first() {
        Some(b'-') => (-1.0, &text[1..]),
        Some(b'+') => (1.0, &text[1..]),
        _ => (1.0, text),
    };
    rest.starts_with("Infinity").then_some(sign * f64::INFINITY)
}

/// Serde codec for amounts that may hold NaN.
///
/// Non-finite values are written as `null` and `null` reads back as NaN.
pub mod serde_amount {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_decimal() {
        assert_eq!(parse_amount("42.5"), 42.5);
        assert_eq!(parse_amount("600"), 600.0);
        assert_eq!(parse_amount("-3"), -3.0);
        assert_eq!(parse_amount(".5"), 0.5);
    }

    #[test]
    fn test_parse_partial_input() {
        // States a user passes through while typing
        assert_eq!(parse_amount("1."), 1.0);
        assert_eq!(parse_amount("1e"), 1.0);
        assert_eq!(parse_amount("1e-"), 1.0);
        assert_eq!(parse_amount("2e3"), 2000.0);
        assert!(parse_amount("-").is_nan());
        assert!(parse_amount(".").is_nan());
        assert!(parse_amount("").is_nan());
    }

    #[test]
    fn test_parse_uses_numeric_prefix() {
        assert_eq!(parse_amount("  12.5 usd"), 12.5);
        assert_eq!(parse_amount("7abc"), 7.0);
    }

    #[test]
    fn test_parse_non_numeric_is_nan() {
        assert!(parse_amount("abc").is_nan());
        assert!(parse_amount("$5").is_nan());
    }

    #[test]
    fn test_nan_stable_under_reparse() {
        let first = parse_amount("abc");
        let text = format_amount(first);
        assert!(parse_amount(&text).is_nan());
    }

    #[test]
    fn test_parse_infinity() {
        assert_eq!(parse_amount("Infinity"), f64::INFINITY);
        assert_eq!(parse_amount("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_amount("inf").is_nan());
    }

    #[test]
    fn test_same_amount() {
        assert!(same_amount(1.0, 1.0));
        assert!(!same_amount(1.0, 2.0));
        assert!(same_amount(f64::NAN, f64::NAN));
        assert!(!same_amount(f64::NAN, 0.0));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(600.0), "600");
        assert_eq!(format_amount(42.5), "42.5");
        assert_eq!(format_amount(f64::NAN), "NaN");
        assert_eq!(format_amount(f64::NEG_INFINITY), "-Infinity");
    }
}
