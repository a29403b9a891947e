//! Multi-currency conversion: rate sources, rate tables, and the converter.

pub mod conversion;
pub mod converter;
pub mod ecb;
pub mod error;
pub mod source;
pub mod table;

#[cfg(test)]
mod props;

pub use conversion::{FINAL_DECIMAL_PLACES, apply_rounding, convert_amount};
pub use converter::{Conversion, CurrencyConverter};
pub use ecb::{ECB_BASE_CURRENCY, ECB_DAILY_URL, EcbRateSource, parse_document};
pub use error::CurrencyError;
pub use exconv_shared::RoundingMode;
pub use source::{RateSource, StaticRateSource};
pub use table::RateTable;
