//! Rate table: base currency → target currency → rate.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::CurrencyError;

/// Snapshot of exchange rates keyed by base currency, then target currency.
///
/// `1 base = rate target`. Every stored rate is strictly positive; the
/// insertion methods reject anything else with [`CurrencyError::InvalidRate`].
/// No rate is ever derived: a pair is available only if it was inserted
/// under that exact base.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RateTable {
    rates: HashMap<String, HashMap<String, Decimal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    as_of: Option<NaiveDate>,
}

impl RateTable {
    /// Creates an empty rate table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with a single base currency and its target rates.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::InvalidRate`] if any rate is not positive.
    pub fn with_base<I, K>(base: impl Into<String>, rates: I) -> Result<Self, CurrencyError>
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: Into<String>,
    {
        let base = base.into();
        let mut table = Self::new();
        // A base with no targets is still a known base.
        table.rates.entry(base.clone()).or_default();
        for (target, rate) in rates {
            table.insert(base.clone(), target, rate)?;
        }
        Ok(table)
    }

    /// Sets the reference date of the snapshot.
    #[must_use]
    pub fn with_as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Inserts or replaces a rate, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::InvalidRate`] if `rate` is not positive.
    pub fn insert(
        &mut self,
        base: impl Into<String>,
        target: impl Into<String>,
        rate: Decimal,
    ) -> Result<Option<Decimal>, CurrencyError> {
        let target = target.into();
        if rate <= Decimal::ZERO {
            return Err(CurrencyError::invalid_rate(target, rate.to_string()));
        }
        Ok(self
            .rates
            .entry(base.into())
            .or_default()
            .insert(target, rate))
    }

    /// Looks up the rate for `from → to`.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::MissingCurrencyRate`] if `from` is not a base
    /// currency of this table, or `to` is not among its targets.
    pub fn rate(&self, from: &str, to: &str) -> Result<Decimal, CurrencyError> {
        self.rates
            .get(from)
            .ok_or_else(|| CurrencyError::missing_rate(from, to))?
            .get(to)
            .copied()
            .ok_or_else(|| CurrencyError::missing_rate(from, to))
    }

    /// Returns the target rates for a base currency.
    #[must_use]
    pub fn base(&self, base: &str) -> Option<&HashMap<String, Decimal>> {
        self.rates.get(base)
    }

    /// Iterates over the base currencies.
    pub fn bases(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    /// Reference date of the snapshot, if the source supplied one.
    #[must_use]
    pub const fn as_of(&self) -> Option<NaiveDate> {
        self.as_of
    }

    /// Total number of rates across all base currencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.values().map(HashMap::len).sum()
    }

    /// Returns true if the table holds no rates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
