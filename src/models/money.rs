//! Parsing and formatting of monetary amounts
//!
//! Amounts are plain `f64` values. Sums are accumulated at full precision and
//! rounded to two decimals only when they are formatted for display.

use std::fmt;

/// Parse a non-negative amount from user input
///
/// Accepts formats: "10.50", "$10.50", "10", "1,250.00"
pub fn parse_amount(s: &str) -> Result<f64, AmountParseError> {
    let trimmed = s.trim();
    let cleaned: String = trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() {
        return Err(AmountParseError::InvalidFormat(s.to_string()));
    }

    let value: f64 = cleaned
        .parse()
        .map_err(|_| AmountParseError::InvalidFormat(s.to_string()))?;

    if !value.is_finite() {
        return Err(AmountParseError::InvalidFormat(s.to_string()));
    }
    if value < 0.0 {
        return Err(AmountParseError::Negative(s.to_string()));
    }

    Ok(value)
}

/// Check that a stored amount is usable (finite and non-negative)
pub fn validate_amount(value: f64) -> Result<(), AmountParseError> {
    if !value.is_finite() {
        return Err(AmountParseError::InvalidFormat(value.to_string()));
    }
    if value < 0.0 {
        return Err(AmountParseError::Negative(value.to_string()));
    }
    Ok(())
}

/// Format an amount with a currency symbol, e.g. `$1600.00`
pub fn format_amount(value: f64, symbol: &str) -> String {
    if value < 0.0 {
        format!("-{}{:.2}", symbol, value.abs())
    } else {
        format!("{}{:.2}", symbol, value)
    }
}

/// Format an amount with an explicit sign, e.g. `+$2300.00` / `-$150.00`
pub fn format_signed(value: f64, symbol: &str) -> String {
    let sign = if value >= 0.0 { '+' } else { '-' };
    format!("{}{}{:.2}", sign, symbol, value.abs())
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    InvalidFormat(String),
    Negative(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
            AmountParseError::Negative(s) => write!(f, "Amount cannot be negative: {}", s),
        }
    }
}

impl std::error::Error for AmountParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(parse_amount("10.50").unwrap(), 10.5);
        assert_eq!(parse_amount("$10.50").unwrap(), 10.5);
        assert_eq!(parse_amount("10").unwrap(), 10.0);
        assert_eq!(parse_amount(" 1,250.00 ").unwrap(), 1250.0);
        assert_eq!(parse_amount("0").unwrap(), 0.0);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            parse_amount("-5"),
            Err(AmountParseError::Negative(_))
        ));
        assert!(matches!(
            parse_amount("abc"),
            Err(AmountParseError::InvalidFormat(_))
        ));
        assert!(parse_amount("").is_err());
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn test_format() {
        assert_eq!(format_amount(1600.0, "$"), "$1600.00");
        assert_eq!(format_amount(0.005, "$"), "$0.01");
        assert_eq!(format_amount(-12.5, "$"), "-$12.50");
        assert_eq!(format_signed(2300.0, "$"), "+$2300.00");
        assert_eq!(format_signed(-150.0, "€"), "-€150.00");
    }

    #[test]
    fn test_rounding_only_at_format_time() {
        let total: f64 = [0.1, 0.2].iter().sum();
        assert_ne!(total, 0.3);
        assert_eq!(format_amount(total, "$"), "$0.30");
    }
}
