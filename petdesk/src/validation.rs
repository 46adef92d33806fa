//! Input well-formedness checks applied before anything reaches the database.

/// Returns true iff `raw` is an integer greater than zero.
///
/// Surrounding whitespace and a leading `+` are ignored; anything else that is not a digit
/// (`"5abc"`, `"3.5"`, `"-3"`) makes the value invalid. There is no upper bound.
pub fn is_valid_age(raw: &str) -> bool {
    let digits = age_digits(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) && digits.bytes().any(|b| b != b'0')
}

/// Parse a valid age into the stored integer width.
///
/// Returns `None` for invalid input and also for a valid age too large to store as an `i64`;
/// callers tell the two apart with [`is_valid_age`].
pub fn parse_age(raw: &str) -> Option<i64> {
    if is_valid_age(raw) { age_digits(raw).parse().ok() } else { None }
}

fn age_digits(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_prefix('+').unwrap_or(trimmed)
}

/// Returns the trimmed value when it is present and non-empty.
pub fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_ages_are_valid() {
        assert!(is_valid_age("5"));
        assert!(is_valid_age("1"));
        assert!(is_valid_age(" 12 "));
        assert!(is_valid_age("+7"));
        assert!(is_valid_age("007"));
    }

    #[test]
    fn test_large_ages_have_no_upper_bound() {
        assert!(is_valid_age("2147483647"));
        assert!(is_valid_age("2147483648"));
        assert!(is_valid_age("99999999999"));
        assert!(is_valid_age("123456789012345678901234567890"));
    }

    #[test]
    fn test_zero_and_negative_ages_are_invalid() {
        assert!(!is_valid_age("0"));
        assert!(!is_valid_age("000"));
        assert!(!is_valid_age("-3"));
        assert!(!is_valid_age("-0"));
        assert!(!is_valid_age("-2147483649"));
    }

    #[test]
    fn test_non_numeric_ages_are_invalid() {
        assert!(!is_valid_age("abc"));
        assert!(!is_valid_age(""));
        assert!(!is_valid_age("   "));
        assert!(!is_valid_age("+"));
        assert!(!is_valid_age("5abc"));
        assert!(!is_valid_age("3.5"));
        assert!(!is_valid_age("1 000"));
    }

    #[test]
    fn test_parse_age_returns_value() {
        assert_eq!(parse_age("3"), Some(3));
        assert_eq!(parse_age(" +42 "), Some(42));
        assert_eq!(parse_age("2147483648"), Some(2_147_483_648));
        assert_eq!(parse_age("0"), None);
        assert_eq!(parse_age("abc"), None);
        // Valid, but wider than the age column
        assert_eq!(parse_age("99999999999999999999"), None);
    }

    #[test]
    fn test_required() {
        assert_eq!(required(Some(" Rex ")), Some("Rex"));
        assert_eq!(required(Some("   ")), None);
        assert_eq!(required(Some("")), None);
        assert_eq!(required(None), None);
    }
}
