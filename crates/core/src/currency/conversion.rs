//! Currency conversion arithmetic.
//!
//! Rounding strategy:
//! - `Up`/`Down` first snap the product to an integer (ceiling/floor)
//! - The result is then always rounded to 2 decimal places, midpoint away from zero,
//!   and carries exactly 2 decimal places (`50` becomes `50.00`)

use exconv_shared::RoundingMode;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Decimal places of every converted amount.
pub const FINAL_DECIMAL_PLACES: u32 = 2;

/// Applies `mode` and the final 2-decimal rounding to a raw product.
#[must_use]
pub fn apply_rounding(value: Decimal, mode: RoundingMode) -> Decimal {
    let pre_rounded = match mode {
        RoundingMode::None => value,
        RoundingMode::Up => value.ceil(),
        RoundingMode::Down => value.floor(),
    };
    let mut rounded = pre_rounded
        .round_dp_with_strategy(FINAL_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(FINAL_DECIMAL_PLACES);
    rounded
}

/// Converts an amount using the given exchange rate and rounding mode.
///
/// Returns `None` if `amount * rate` overflows `Decimal`.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal, mode: RoundingMode) -> Option<Decimal> {
    amount
        .checked_mul(rate)
        .map(|converted| apply_rounding(converted, mode))
}
