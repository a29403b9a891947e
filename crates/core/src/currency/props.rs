//! Property-based tests for currency conversion.
//!
//! - Property 1: No-rounding mode matches the 2-decimal product
//! - Property 2: Up/Down produce integers bracketing the raw product
//! - Property 3: Rounding mode switches leave no residual state
//! - Property 4: Lookups never derive a missing pair

use exconv_shared::RoundingMode;
use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use super::converter::CurrencyConverter;
use super::error::CurrencyError;
use super::source::StaticRateSource;

/// Strategy to generate decimal amounts (-1,000,000.00 to 1,000,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate rounding modes.
fn rounding_mode() -> impl Strategy<Value = RoundingMode> {
    prop_oneof![
        Just(RoundingMode::None),
        Just(RoundingMode::Up),
        Just(RoundingMode::Down),
    ]
}

/// Strategy to generate three-letter currency codes.
fn currency_code() -> impl Strategy<Value = String> {
    "[A-Z]{3}"
}

fn converter(rate: Decimal) -> CurrencyConverter<StaticRateSource> {
    let source = StaticRateSource::with_base("EUR", [("GBP", rate)]).unwrap();
    CurrencyConverter::with_source(source)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Property 1: No-rounding mode matches the 2-decimal product
    // =========================================================================

    /// *For any* amount and rate, `None` mode SHALL return `amount * rate`
    /// rounded to 2 decimal places, midpoint away from zero.
    #[test]
    fn prop_no_round_is_two_decimal_product(amount in amount(), rate in positive_rate()) {
        let result = converter(rate).convert(amount, "EUR", "GBP").unwrap();
        let expected = (amount * rate)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        prop_assert_eq!(result, expected);
        prop_assert!(result.scale() <= 2, "Result {} has more than 2 decimals", result);
    }

    // =========================================================================
    // Property 2: Up/Down produce integers bracketing the raw product
    // =========================================================================

    /// *For any* amount and rate, `Up` SHALL return an integer >= the raw product.
    #[test]
    fn prop_round_up_is_integer_ceiling(amount in amount(), rate in positive_rate()) {
        let mut conv = converter(rate);
        conv.set_round_up();
        let result = conv.convert(amount, "EUR", "GBP").unwrap();
        prop_assert!(result.fract().is_zero(), "Result {} is not an integer", result);
        prop_assert!(result >= amount * rate);
    }

    /// *For any* amount and rate, `Down` SHALL return an integer <= the raw product.
    #[test]
    fn prop_round_down_is_integer_floor(amount in amount(), rate in positive_rate()) {
        let mut conv = converter(rate);
        conv.set_round_down();
        let result = conv.convert(amount, "EUR", "GBP").unwrap();
        prop_assert!(result.fract().is_zero(), "Result {} is not an integer", result);
        prop_assert!(result <= amount * rate);
    }

    /// *For any* amount and rate, Down <= None <= Up.
    #[test]
    fn prop_modes_are_ordered(amount in amount(), rate in positive_rate()) {
        let mut conv = converter(rate);
        let none = conv.convert(amount, "EUR", "GBP").unwrap();
        conv.set_round_up();
        let up = conv.convert(amount, "EUR", "GBP").unwrap();
        conv.set_round_down();
        let down = conv.convert(amount, "EUR", "GBP").unwrap();

        prop_assert!(down <= none && none <= up, "{} <= {} <= {} violated", down, none, up);
        prop_assert!(up - down <= Decimal::ONE);
    }

    // =========================================================================
    // Property 3: Rounding mode switches leave no residual state
    // =========================================================================

    /// *For any* sequence of mode switches, the converter SHALL behave exactly
    /// like a fresh converter set to the last mode.
    #[test]
    fn prop_last_mode_wins(
        modes in prop::collection::vec(rounding_mode(), 1..8),
        amount in amount(),
        rate in positive_rate(),
    ) {
        let mut switched = converter(rate);
        for mode in &modes {
            match mode {
                RoundingMode::None => switched.set_no_round(),
                RoundingMode::Up => switched.set_round_up(),
                RoundingMode::Down => switched.set_round_down(),
            }
        }

        let last = *modes.last().unwrap();
        let mut fresh = converter(rate);
        fresh.set_rounding(last);

        prop_assert_eq!(switched.rounding(), last);
        prop_assert_eq!(
            switched.convert(amount, "EUR", "GBP").unwrap(),
            fresh.convert(amount, "EUR", "GBP").unwrap()
        );
    }

    // =========================================================================
    // Property 4: Lookups never derive a missing pair
    // =========================================================================

    /// *For any* `from` that is not a base currency, conversion SHALL fail
    /// with `MissingCurrencyRate`, whatever `to` is.
    #[test]
    fn prop_unknown_base_fails(from in currency_code(), to in currency_code(), rate in positive_rate()) {
        prop_assume!(from != "EUR");
        let err = converter(rate).convert(Decimal::ONE_HUNDRED, &from, &to).unwrap_err();
        prop_assert_eq!(err, CurrencyError::missing_rate(from, to));
    }

    /// *For any* target absent from the base's rates, conversion SHALL fail
    /// with `MissingCurrencyRate`.
    #[test]
    fn prop_unknown_target_fails(to in currency_code(), rate in positive_rate()) {
        prop_assume!(to != "GBP");
        let err = converter(rate).convert(Decimal::ONE_HUNDRED, "EUR", &to).unwrap_err();
        prop_assert_eq!(err, CurrencyError::missing_rate("EUR", to));
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use rust_decimal_macros::dec;

    // =========================================================================
    // Sample table {EUR: {USD: 1.5, GBP: 0.5}} - Specific Examples
    // =========================================================================

    fn sample() -> CurrencyConverter<StaticRateSource> {
        let source =
            StaticRateSource::with_base("EUR", [("USD", dec!(1.5)), ("GBP", dec!(0.5))]).unwrap();
        CurrencyConverter::with_source(source)
    }

    /// 99 EUR at 0.5 = 49.5 GBP; Up gives 50, Down gives 49, None gives 49.50.
    #[test]
    fn test_half_unit_product_by_mode() {
        let mut conv = sample();
        assert_eq!(conv.convert(dec!(99), "EUR", "GBP").unwrap(), dec!(49.50));
        conv.set_round_up();
        assert_eq!(conv.convert(dec!(99), "EUR", "GBP").unwrap(), dec!(50));
        conv.set_round_down();
        assert_eq!(conv.convert(dec!(99), "EUR", "GBP").unwrap(), dec!(49));
    }

    /// USD is only a target, never a base.
    #[test]
    fn test_target_is_not_a_base() {
        let conv = sample();
        assert_eq!(
            conv.convert(dec!(100), "USD", "GBP").unwrap_err(),
            CurrencyError::missing_rate("USD", "GBP")
        );
    }
}
