//! Currency converter: rate lookup plus rounding policy.

use exconv_shared::RoundingMode;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::conversion::convert_amount;
use super::ecb::EcbRateSource;
use super::error::CurrencyError;
use super::source::RateSource;

/// Outcome of a single conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    /// Amount in the source currency.
    pub amount: Decimal,
    /// Source currency code.
    pub from: String,
    /// Target currency code.
    pub to: String,
    /// Rate used (1 `from` = rate `to`).
    pub rate: Decimal,
    /// Rounding mode in effect.
    pub rounding: RoundingMode,
    /// Converted, rounded amount in the target currency.
    pub result: Decimal,
}

/// Converts amounts between currencies using rates from a [`RateSource`].
///
/// The rate table is pulled from the source on every conversion and never
/// stored here. The only state is the rounding mode, which applies to
/// conversions made after it is set.
///
/// # Example
///
/// ```
/// use exconv_core::currency::{CurrencyConverter, StaticRateSource};
/// use rust_decimal_macros::dec;
///
/// let source = StaticRateSource::with_base("EUR", [("GBP", dec!(0.5))]).unwrap();
/// let mut converter = CurrencyConverter::with_source(source);
/// assert_eq!(converter.convert(dec!(100), "EUR", "GBP").unwrap(), dec!(50.00));
///
/// converter.set_round_up();
/// assert_eq!(converter.convert(dec!(99), "EUR", "GBP").unwrap(), dec!(50));
/// ```
#[derive(Debug, Clone)]
pub struct CurrencyConverter<S = EcbRateSource> {
    rates_src: S,
    rounding: RoundingMode,
}

impl CurrencyConverter<EcbRateSource> {
    /// Creates a converter backed by the default ECB rate source.
    ///
    /// No request is made until the first conversion.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(EcbRateSource::default())
    }
}

impl Default for CurrencyConverter<EcbRateSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RateSource> CurrencyConverter<S> {
    /// Creates a converter using `source`.
    ///
    /// Pass `&source` or an `Arc` to share one source between converters.
    #[must_use]
    pub fn with_source(source: S) -> Self {
        Self {
            rates_src: source,
            rounding: RoundingMode::None,
        }
    }

    /// Creates a converter from an optional source.
    ///
    /// Without a source, `S::default()` is bound. With `eager_init`, the
    /// source is queried once before returning.
    ///
    /// # Errors
    ///
    /// Returns the source's error if `eager_init` is set and the source
    /// cannot produce a rate table.
    pub fn with_options(source: Option<S>, eager_init: bool) -> Result<Self, CurrencyError>
    where
        S: Default,
    {
        let converter = Self::with_source(source.unwrap_or_default());
        if eager_init {
            converter.init()?;
        }
        Ok(converter)
    }

    /// Queries the source once to surface fetch failures early.
    ///
    /// # Errors
    ///
    /// Returns the source's error unchanged.
    pub fn init(&self) -> Result<(), CurrencyError> {
        self.rates_src.get_rates().map(|_| ())
    }

    /// Converts `amount` from `from` to `to`, rounded per the current mode.
    ///
    /// # Errors
    ///
    /// - [`CurrencyError::RateSourceUnavailable`] if the source fails
    /// - [`CurrencyError::MissingCurrencyRate`] if `from` is not a base
    ///   currency of the table, or `to` is not among its targets
    /// - [`CurrencyError::InvalidRate`] if the product is not representable
    pub fn convert(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal, CurrencyError> {
        self.convert_detailed(amount, from, to)
            .map(|conversion| conversion.result)
    }

    /// Like [`convert`](Self::convert), returning the rate and mode used.
    ///
    /// # Errors
    ///
    /// Same as [`convert`](Self::convert).
    pub fn convert_detailed(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
    ) -> Result<Conversion, CurrencyError> {
        let rates = self.rates_src.get_rates()?;
        let rate = rates.rate(from, to)?;

        let result = convert_amount(amount, rate, self.rounding)
            .ok_or_else(|| CurrencyError::invalid_rate(to, rate.to_string()))?;

        debug!(%amount, from, to, %rate, rounding = %self.rounding, %result, "converted amount");

        Ok(Conversion {
            amount,
            from: from.to_string(),
            to: to.to_string(),
            rate,
            rounding: self.rounding,
            result,
        })
    }

    /// Round converted amounts up to the nearest integer.
    pub fn set_round_up(&mut self) {
        self.rounding = RoundingMode::Up;
    }

    /// Round converted amounts down to the nearest integer.
    pub fn set_round_down(&mut self) {
        self.rounding = RoundingMode::Down;
    }

    /// Disable integer pre-rounding.
    pub fn set_no_round(&mut self) {
        self.rounding = RoundingMode::None;
    }

    /// Sets the rounding mode.
    pub fn set_rounding(&mut self, mode: RoundingMode) {
        self.rounding = mode;
    }

    /// Current rounding mode.
    #[must_use]
    pub const fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// The rate source this converter reads from.
    #[must_use]
    pub const fn rates_src(&self) -> &S {
        &self.rates_src
    }
}
