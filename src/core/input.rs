//! Validation of user-entered values.

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Please enter an amount")]
    BlankAmount,

    #[error("Please enter your email")]
    BlankEmail,

    #[error("Please fill in all fields")]
    BlankCredentials,

    #[error("Unsupported currency: {0}")]
    UnknownCurrency(String),
}

/// Parses an amount typed by the user.
///
/// Anything other than digits and `.` is dropped first. Nothing left is a
/// blank amount; whatever still fails to parse becomes `0.0`.
pub fn parse_amount(input: &str) -> Result<f64, InputError> {
    let filtered: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if filtered.is_empty() {
        return Err(InputError::BlankAmount);
    }
    match filtered.parse::<f64>() {
        Ok(value) => Ok(value),
        Err(e) => {
            debug!("Amount '{}' did not parse ({}), using 0", input, e);
            Ok(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_plain_numbers() {
        assert_eq!(parse_amount("100").unwrap(), 100.0);
        assert_eq!(parse_amount("12.5").unwrap(), 12.5);
        assert_eq!(parse_amount(".5").unwrap(), 0.5);
    }

    #[test]
    fn test_parse_amount_blank_is_rejected() {
        assert_eq!(parse_amount(""), Err(InputError::BlankAmount));
        assert_eq!(parse_amount("   "), Err(InputError::BlankAmount));
    }

    #[test]
    fn test_parse_amount_nothing_left_after_filter_is_blank() {
        assert_eq!(parse_amount("abc"), Err(InputError::BlankAmount));
        assert_eq!(parse_amount("-,€"), Err(InputError::BlankAmount));
    }

    #[test]
    fn test_parse_amount_drops_foreign_characters() {
        assert_eq!(parse_amount("1,000").unwrap(), 1000.0);
        assert_eq!(parse_amount("-42").unwrap(), 42.0);
        assert_eq!(parse_amount("€ 9.99").unwrap(), 9.99);
    }

    #[test]
    fn test_parse_amount_falls_back_to_zero() {
        assert_eq!(parse_amount("1.2.3").unwrap(), 0.0);
        assert_eq!(parse_amount(".").unwrap(), 0.0);
    }
}
