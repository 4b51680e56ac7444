//! Money amounts on the wire.
//!
//! The backend sends and expects prices as decimal strings (`"4.50"`).
//! Amounts are held as [`Decimal`] so sums stay exact; binary floats are
//! never involved.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Errors that can occur while parsing a wire amount.
#[derive(Debug, Error, PartialEq)]
pub enum AmountError {
    /// The string was not a decimal number.
    #[error("invalid amount {0:?}")]
    Invalid(String),
}

/// Parses a decimal string amount as received from the backend.
///
/// # Errors
///
/// - [`AmountError::Invalid`]: the string was not a decimal number.
pub fn parse_amount(raw: &str) -> Result<Decimal, AmountError> {
    raw.trim()
        .parse()
        .map_err(|_| AmountError::Invalid(raw.to_owned()))
}

/// Rounds an amount to cents, half away from zero.
#[must_use]
pub fn to_cents(amount: Decimal) -> Decimal {
    let mut cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    cents
}

/// Formats an amount with exactly two decimal places, as order totals are
/// submitted and displayed.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    to_cents(amount).to_string()
}
