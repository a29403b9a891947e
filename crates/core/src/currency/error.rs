//! Currency conversion error types.

use thiserror::Error;

/// Errors raised by rate sources and the converter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// The rate source could not produce a rate table.
    #[error("rate source unavailable: {0}")]
    RateSourceUnavailable(String),

    /// The base currency, or the target within it, is absent from the table.
    #[error("Missing currency rate {from}:{to}")]
    MissingCurrencyRate {
        /// Currency converted from.
        from: String,
        /// Currency converted to.
        to: String,
    },

    /// A rate is non-numeric, non-positive, or outside the representable range.
    #[error("invalid rate for {currency}: {value}")]
    InvalidRate {
        /// Currency the rate belongs to.
        currency: String,
        /// Offending value, as received.
        value: String,
    },
}

impl CurrencyError {
    /// Create a rate source unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::RateSourceUnavailable(msg.into())
    }

    /// Create a missing currency rate error.
    #[must_use]
    pub fn missing_rate(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::MissingCurrencyRate {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create an invalid rate error.
    #[must_use]
    pub fn invalid_rate(currency: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidRate {
            currency: currency.into(),
            value: value.into(),
        }
    }
}

impl From<CurrencyError> for exconv_shared::AppError {
    fn from(err: CurrencyError) -> Self {
        match err {
            CurrencyError::RateSourceUnavailable(msg) => Self::RateSourceUnavailable(msg),
            CurrencyError::MissingCurrencyRate { from, to } => {
                Self::MissingRate(format!("{from}:{to}"))
            }
            CurrencyError::InvalidRate { currency, value } => {
                Self::InvalidRate(format!("{currency}: {value}"))
            }
        }
    }
}
