use std::num::IntErrorKind;

use thiserror::Error;

/// Amounts are plain signed integers. Balances, records, seeds and command
/// output all use the same unit; there is no currency or fractional part.
pub type Amount = i64;

/// Parse a whole-number amount such as "500" or "-50".
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    input.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ParseAmountError::OutOfRange(input.to_string())
        }
        _ => ParseAmountError::InvalidFormat(input.to_string()),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAmountError {
    #[error("invalid amount format: '{0}'")]
    InvalidFormat(String),

    #[error("amount out of range: '{0}'")]
    OutOfRange(String),
}
