//! Field parsing - Turning raw form text into numbers
//!
//! Form fields hold whatever the user typed. Each consumer decides what a
//! blank or garbled field means through one of the combinators below:
//!
//! - `number_or`: unparseable → default
//! - `nonzero_number_or`: unparseable or zero → default (used where a
//!   multiplicative identity is required)
//! - `integer_or`: integer prefix, unparseable → default
//!
//! Parsing is prefix based: `"12abc"` reads as 12 and `"12.7"` as the
//! integer 12, matching how number inputs are read everywhere in the sheet.

/// Parse the leading decimal number of `text`
///
/// Accepts leading whitespace, an optional sign, digits with an optional
/// fraction, and an optional exponent. Returns `None` when no digits are
/// found or the result is not finite.
pub fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
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
        let frac_digits = frac_end - frac_start;
        if digits > 0 || frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts if at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
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

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse the leading signed integer of `text`
pub fn parse_integer(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    s[..end].parse::<i64>().ok()
}

/// Parse a number, falling back to `default` when unparseable
pub fn number_or(text: &str, default: f64) -> f64 {
    parse_number(text).unwrap_or(default)
}

/// Parse a number, falling back to `default` when unparseable or zero
pub fn nonzero_number_or(text: &str, default: f64) -> f64 {
    match parse_number(text) {
        Some(v) if v != 0.0 => v,
        _ => default,
    }
}

/// Parse an integer, falling back to `default` when unparseable
pub fn integer_or(text: &str, default: i64) -> i64 {
    parse_integer(text).unwrap_or(default)
}

/// Round to two decimals, half-up at the 0.01 boundary
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Round to one decimal, half-up
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Format a number in its shortest form (`100`, `12.5`, `-0.25`)
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("-12.5"), Some(-12.5));
        assert_eq!(parse_number("+3"), Some(3.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("5."), Some(5.0));
        assert_eq!(parse_number("  7"), Some(7.0));
    }

    #[test]
    fn test_parse_number_prefix() {
        assert_eq!(parse_number("12abc"), Some(12.0));
        assert_eq!(parse_number("1e3x"), Some(1000.0));
        // Dangling exponent is ignored
        assert_eq!(parse_number("2e"), Some(2.0));
        assert_eq!(parse_number("3.5.1"), Some(3.5));
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("e5"), None);
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("12.7"), Some(12));
        assert_eq!(parse_integer("-4"), Some(-4));
        assert_eq!(parse_integer("  9 apples"), Some(9));
        assert_eq!(parse_integer(".5"), None);
        assert_eq!(parse_integer(""), None);
    }

    #[test]
    fn test_combinators() {
        assert!((number_or("", 0.0) - 0.0).abs() < f64::EPSILON);
        assert!((number_or("0", 5.0) - 0.0).abs() < f64::EPSILON);
        assert!((nonzero_number_or("0", 1.0) - 1.0).abs() < f64::EPSILON);
        assert!((nonzero_number_or("x", 1.0) - 1.0).abs() < f64::EPSILON);
        assert!((nonzero_number_or("1.5", 1.0) - 1.5).abs() < f64::EPSILON);
        assert_eq!(integer_or("abc", 0), 0);
        assert_eq!(integer_or("250", 0), 250);
    }

    #[test]
    fn test_round_cents_half_up() {
        assert!((round_cents(1.005 + 1e-9) - 1.01).abs() < 1e-9);
        assert!((round_cents(2.344) - 2.34).abs() < 1e-9);
        assert!((round_cents(-0.005) - 0.0).abs() < 1e-9);
        assert!((round_cents(-1.006) - (-1.01)).abs() < 1e-9);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-30.0), "-30");
    }
}
