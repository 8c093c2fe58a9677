//! Money and quantity arithmetic using rust_decimal for precision
//!
//! All calculations are done on `Decimal` internally; rounding happens only
//! at the point of writing a display string or an outbound `f64`, so
//! repeated edits of the same field stay idempotent. Monetary amounts and
//! base-unit quantities round to 2 decimal places, purchase-unit quantities
//! to 4.

use rust_decimal::prelude::*;
use std::str::FromStr;

/// Rounding for monetary values and base-unit quantities (half-up)
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounding for purchase-unit quantities (half-up)
pub const QTY_DECIMAL_PLACES: u32 = 4;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Tolerance for purchase-unit quantity comparisons (0.0001)
pub const QTY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 4);

/// Convert f64 to Decimal for calculation
///
/// Input should be validated at the boundary. If NaN/Infinity somehow
/// reaches here, logs an error and returns ZERO to avoid silent corruption
/// in monetary calculations.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_money_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 4 decimal places
#[inline]
pub fn to_qty_f64(value: Decimal) -> f64 {
    round_qty(value).to_f64().unwrap_or_default()
}

/// Round to 2 decimal places, half-up
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to 4 decimal places, half-up
#[inline]
pub fn round_qty(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(QTY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Tolerant numeric parsing of a field value
///
/// Trims whitespace; empty strings and anything non-numeric (including the
/// literal "NaN" a broken form can produce) read as `None`. Callers treat
/// `None` as zero for multiplication and skip the step for division.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    // Forms sometimes emit thousands separators
    let cleaned: String = trimmed.chars().filter(|c| *c != ',' && *c != ' ').collect();
    Decimal::from_str(&cleaned)
        .ok()
        .or_else(|| Decimal::from_scientific(&cleaned).ok())
}

/// Parse a field value, treating a missing value as zero
#[inline]
pub fn parse_amount_or_zero(raw: &str) -> Decimal {
    parse_amount(raw).unwrap_or(Decimal::ZERO)
}

/// Display string for a monetary value (2 dp, trailing zeros trimmed)
pub fn format_money(value: Decimal) -> String {
    round_money(value).normalize().to_string()
}

/// Display string for a purchase-unit quantity (4 dp, trailing zeros trimmed)
pub fn format_qty(value: Decimal) -> String {
    round_qty(value).normalize().to_string()
}
