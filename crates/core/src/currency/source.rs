//! Pluggable sources of exchange rates.

use std::sync::Arc;

use rust_decimal::Decimal;

use super::error::CurrencyError;
use super::table::RateTable;

/// Supplies a snapshot of exchange rates on demand.
///
/// Implementations may fetch on every call or cache a previous snapshot;
/// callers must not assume either. A source that cannot produce a table
/// fails with [`CurrencyError::RateSourceUnavailable`] and never returns an
/// empty or partial table in its place.
#[cfg_attr(test, mockall::automock)]
pub trait RateSource {
    /// Returns the current rate table.
    fn get_rates(&self) -> Result<RateTable, CurrencyError>;
}

impl<S: RateSource + ?Sized> RateSource for &S {
    fn get_rates(&self) -> Result<RateTable, CurrencyError> {
        (**self).get_rates()
    }
}

impl<S: RateSource + ?Sized> RateSource for Box<S> {
    fn get_rates(&self) -> Result<RateTable, CurrencyError> {
        (**self).get_rates()
    }
}

impl<S: RateSource + ?Sized> RateSource for Arc<S> {
    fn get_rates(&self) -> Result<RateTable, CurrencyError> {
        (**self).get_rates()
    }
}

/// In-memory rate source returning a fixed table.
#[derive(Debug, Clone, Default)]
pub struct StaticRateSource {
    table: RateTable,
}

impl StaticRateSource {
    /// Creates a source serving `table`.
    #[must_use]
    pub const fn new(table: RateTable) -> Self {
        Self { table }
    }

    /// Creates a source with one base currency and its target rates.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::InvalidRate`] if any rate is not positive.
    pub fn with_base<I, K>(base: impl Into<String>, rates: I) -> Result<Self, CurrencyError>
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: Into<String>,
    {
        RateTable::with_base(base, rates).map(Self::new)
    }

    /// The table this source serves.
    #[must_use]
    pub const fn table(&self) -> &RateTable {
        &self.table
    }
}

impl RateSource for StaticRateSource {
    fn get_rates(&self) -> Result<RateTable, CurrencyError> {
        Ok(self.table.clone())
    }
}

impl From<RateTable> for StaticRateSource {
    fn from(table: RateTable) -> Self {
        Self::new(table)
    }
}
