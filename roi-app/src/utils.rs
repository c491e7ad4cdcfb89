use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid number '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a required form value into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
/// Returns `Ok(None)` for empty or whitespace-only input so the caller can
/// decide between a default and a "required" error.
pub fn parse_decimal(s: &str) -> Result<Option<Decimal>, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(None);
    }
    normalized.parse().map(Some).map_err(|e| {
        tracing::debug!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Formats a whole number with comma thousands separators (`18500` → `"18,500"`).
///
/// Fractional digits are kept as they are.
pub fn group_thousands(value: Decimal) -> String {
    let text = value.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Formats a ratio as a whole percentage (`0.7` → `"70%"`).
pub fn percent_display(ratio: Decimal) -> String {
    let percent = roi_core::calculations::common::round_whole(ratio * Decimal::ONE_HUNDRED);
    format!("{percent}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_decimal_accepts_comma_thousands_separator() {
        assert_eq!(parse_decimal("1,234.56").unwrap(), Some(dec!(1234.56)));
        assert_eq!(parse_decimal("1,234,567.89").unwrap(), Some(dec!(1234567.89)));
    }

    #[test]
    fn parse_decimal_trim_whitespace() {
        assert_eq!(parse_decimal("  123.45  ").unwrap(), Some(dec!(123.45)));
    }

    #[test]
    fn parse_decimal_empty_is_none() {
        assert_eq!(parse_decimal("").unwrap(), None);
        assert_eq!(parse_decimal("   ").unwrap(), None);
    }

    #[test]
    fn parse_decimal_invalid_returns_error() {
        let error = parse_decimal("abc").unwrap_err();

        assert!(error.to_string().starts_with("invalid number 'abc'"));
    }

    #[test]
    fn group_thousands_inserts_separators() {
        assert_eq!(group_thousands(dec!(0)), "0");
        assert_eq!(group_thousands(dec!(999)), "999");
        assert_eq!(group_thousands(dec!(1000)), "1,000");
        assert_eq!(group_thousands(dec!(18500)), "18,500");
        assert_eq!(group_thousands(dec!(1234567)), "1,234,567");
    }

    #[test]
    fn group_thousands_keeps_fraction_and_sign() {
        assert_eq!(group_thousands(dec!(1032.75)), "1,032.75");
        assert_eq!(group_thousands(dec!(-2500)), "-2,500");
    }

    #[test]
    fn percent_display_rounds_to_whole_percent() {
        assert_eq!(percent_display(dec!(0.7)), "70%");
        assert_eq!(percent_display(dec!(0.5)), "50%");
        assert_eq!(percent_display(dec!(1.265625)), "127%");
    }
}
