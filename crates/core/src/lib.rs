//! Currency conversion engine for exconv.
//!
//! Converts monetary amounts between currencies using rates from a pluggable
//! source. All arithmetic uses `rust_decimal::Decimal`.
//!
//! # Modules
//!
//! - `currency` - Rate sources, rate tables, rounding, and the converter

pub mod currency;

pub use currency::{
    Conversion, CurrencyConverter, CurrencyError, EcbRateSource, RateSource, RateTable,
    RoundingMode, StaticRateSource,
};
