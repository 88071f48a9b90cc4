//! Money handling - fixed-point amounts stored as two-decimal strings.
//!
//! Prices and payments live in the database as text such as `"10.00"`. Every
//! calculation goes through [`Decimal`] so no binary floating point is involved;
//! rounding to two places happens only when a value is formatted for display.

use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Number of fractional digits kept for money values.
pub const MONEY_SCALE: u32 = 2;

/// Exclusive upper bound for a single amount: ten digits, two of them fractional.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Parses a decimal string such as `"10"`, `"10.5"` or `" 10.50 "`.
///
/// # Errors
/// Returns [`Error::Validation`] on `field` if the text is empty or not a decimal number.
pub fn parse_decimal(field: &str, text: &str) -> Result<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }

    Decimal::from_str(trimmed)
        .map_err(|e| Error::validation(field, format!("'{trimmed}' is not a decimal number ({e})")))
}

/// Parses a money amount: a non-negative decimal below [`MAX_AMOUNT`] with at
/// most two fractional digits.
///
/// Trailing zeros beyond the second place are tolerated (`"10.500"` is fine).
pub fn parse_amount(field: &str, text: &str) -> Result<Decimal> {
    let value = parse_decimal(field, text)?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(Error::validation(field, "must not be negative"));
    }
    if value.normalize().scale() > MONEY_SCALE {
        return Err(Error::validation(
            field,
            "must have at most two decimal places",
        ));
    }
    if value >= MAX_AMOUNT {
        return Err(Error::validation(
            field,
            format!("must be less than {MAX_AMOUNT}"),
        ));
    }

    Ok(value)
}

/// Canonical storage representation, always two decimal places.
#[must_use]
pub fn to_storage(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(MONEY_SCALE))
}

/// Formats an amount in rupees, e.g. `₹80.00` or `-₹5.50`.
#[must_use]
pub fn format_rupees(value: Decimal) -> String {
    let rounded = value.round_dp(MONEY_SCALE);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-₹{:.2}", rounded.abs())
    } else {
        format!("₹{:.2}", rounded.abs())
    }
}

/// Value of `jars` at `price` each, `None` on overflow.
#[must_use]
pub fn jars_value(jars: i64, price: Decimal) -> Option<Decimal> {
    Decimal::from(jars).checked_mul(price)
}

/// Sum of `amounts`, `None` on overflow.
pub fn checked_sum<I>(amounts: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, Decimal::checked_add)
}
