//! Money calculation utilities using rust_decimal for precision
//!
//! All totals are computed in `Decimal` internally, then converted to
//! `f64` for storage and serialization. Display strings are rounded to
//! two decimal places; the stored value is the unrounded sum.

use rust_decimal::prelude::*;
use shared::models::OrderLineItem;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert an f64 price to Decimal for calculation
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::warn!(value, "Non-finite amount coerced to zero");
        Decimal::ZERO
    })
}

/// Convert a Decimal back to f64 for storage/serialization
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// price × quantity for one line item
pub fn line_total(item: &OrderLineItem) -> Decimal {
    to_decimal(item.price) * Decimal::from(item.quantity)
}

/// Σ price × quantity over all line items
pub fn order_total(items: &[OrderLineItem]) -> Decimal {
    items.iter().map(line_total).sum()
}

/// Format an amount for customer-facing text: `$12.34`
pub fn format_usd(amount: Decimal) -> String {
    format!("${:.2}", to_f64(amount))
}

#[cfg(test)]
mod tests;
