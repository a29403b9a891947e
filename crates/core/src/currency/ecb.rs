//! Rate source backed by the European Central Bank daily reference rates.
//!
//! The feed is a single XML document quoting every currency against EUR:
//!
//! ```text
//! <gesmes:Envelope>
//!   <Cube>
//!     <Cube time="2024-01-05">
//!       <Cube currency="USD" rate="1.0921"/>
//!       <Cube currency="JPY" rate="158.17"/>
//!       ...
//! ```
//!
//! It is turned into a [`RateTable`] whose only base currency is EUR. No
//! other base is derived from it.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use exconv_shared::FeedConfig;
use moka::sync::Cache;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::error::CurrencyError;
use super::source::RateSource;
use super::table::RateTable;

/// URL of the ECB daily reference rate document.
pub const ECB_DAILY_URL: &str = exconv_shared::config::DEFAULT_FEED_URL;

/// Currency the ECB document quotes against.
pub const ECB_BASE_CURRENCY: &str = "EUR";

/// Snapshot cache key: a document is only reusable for the same base.
type SnapshotKey = (String, String);

/// Rate source fetching the ECB daily reference rates over HTTP.
///
/// Fetching is blocking. There is no retry, and no timeout unless one is
/// configured with [`EcbRateSource::with_timeout`]. A fetched snapshot is
/// reused until its TTL expires; failed fetches are never cached.
///
/// Clones share the HTTP client and the snapshot cache.
#[derive(Clone)]
pub struct EcbRateSource {
    url: String,
    base_currency: String,
    timeout: Option<Duration>,
    client: Result<reqwest::blocking::Client, CurrencyError>,
    cache: Option<Cache<SnapshotKey, Arc<RateTable>>>,
}

impl EcbRateSource {
    /// Default time-to-live of a fetched snapshot (1 hour).
    pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

    /// Creates a source for the public ECB feed with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_url(ECB_DAILY_URL)
    }

    /// Creates a source reading an ECB-format document from `url`.
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            base_currency: ECB_BASE_CURRENCY.to_string(),
            timeout: None,
            client: build_client(None),
            cache: build_cache(Self::DEFAULT_CACHE_TTL_SECS),
        }
    }

    /// Creates a source from feed configuration.
    #[must_use]
    pub fn from_config(config: &FeedConfig) -> Self {
        let source = Self::with_url(config.url.clone())
            .with_base_currency(config.base_currency.clone())
            .with_cache_ttl(config.cache_ttl_secs);
        match config.timeout_secs {
            Some(secs) => source.with_timeout(Duration::from_secs(secs)),
            None => source,
        }
    }

    /// Sets the currency the document's rates are quoted against.
    #[must_use]
    pub fn with_base_currency(mut self, base_currency: impl Into<String>) -> Self {
        self.base_currency = base_currency.into();
        self
    }

    /// Sets a request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self.client = build_client(self.timeout);
        self
    }

    /// Sets how long a fetched snapshot is reused. Zero disables caching.
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl_secs: u64) -> Self {
        self.cache = build_cache(ttl_secs);
        self
    }

    /// URL of the rate document.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Currency the document's rates are quoted against.
    #[must_use]
    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    /// Request timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns true if fetched snapshots are reused.
    #[must_use]
    pub const fn is_caching(&self) -> bool {
        self.cache.is_some()
    }

    /// Drops the cached snapshot so the next call fetches again.
    pub fn invalidate(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate(&self.cache_key());
        }
    }

    fn cache_key(&self) -> SnapshotKey {
        (self.url.clone(), self.base_currency.clone())
    }

    fn fetch(&self) -> Result<RateTable, CurrencyError> {
        debug!(url = %self.url, "fetching exchange rates");

        let client = self.client.as_ref().map_err(Clone::clone)?;

        let body = client
            .get(&self.url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::text)
            .map_err(|e| CurrencyError::unavailable(format!("failed to fetch {}: {e}", self.url)))?;

        let table = parse_document(&body, &self.base_currency)?;
        info!(
            url = %self.url,
            rates = table.len(),
            as_of = ?table.as_of(),
            "fetched exchange rates"
        );
        Ok(table)
    }
}

impl Default for EcbRateSource {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EcbRateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcbRateSource")
            .field("url", &self.url)
            .field("base_currency", &self.base_currency)
            .field("timeout", &self.timeout)
            .field("caching", &self.is_caching())
            .finish()
    }
}

impl RateSource for EcbRateSource {
    fn get_rates(&self) -> Result<RateTable, CurrencyError> {
        let Some(cache) = &self.cache else {
            return self.fetch();
        };

        cache
            .try_get_with(self.cache_key(), || self.fetch().map(Arc::new))
            .map(|table| table.as_ref().clone())
            .map_err(|err| err.as_ref().clone())
    }
}

fn build_client(timeout: Option<Duration>) -> Result<reqwest::blocking::Client, CurrencyError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CurrencyError::unavailable(format!("failed to build HTTP client: {e}")))
}

fn build_cache(ttl_secs: u64) -> Option<Cache<SnapshotKey, Arc<RateTable>>> {
    (ttl_secs > 0).then(|| {
        Cache::builder()
            .max_capacity(16)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build()
    })
}

#[derive(Debug, Default)]
struct CubeAttributes {
    currency: Option<String>,
    rate: Option<String>,
    time: Option<String>,
}

fn malformed(err: impl std::fmt::Display) -> CurrencyError {
    CurrencyError::unavailable(format!("malformed rate document: {err}"))
}

fn cube_attributes(element: &BytesStart<'_>) -> Result<CubeAttributes, CurrencyError> {
    let mut attrs = CubeAttributes::default();
    for attr in element.attributes() {
        let attr = attr.map_err(malformed)?;
        let value = attr.unescape_value().map_err(malformed)?.into_owned();
        match attr.key.local_name().as_ref() {
            b"currency" => attrs.currency = Some(value),
            b"rate" => attrs.rate = Some(value),
            b"time" => attrs.time = Some(value),
            _ => {}
        }
    }
    Ok(attrs)
}

/// Parses an ECB-format reference rate document.
///
/// Every `Cube` element carrying `currency` and `rate` attributes becomes one
/// `base → currency` entry; a `time` attribute becomes the table's reference
/// date.
///
/// # Errors
///
/// - [`CurrencyError::RateSourceUnavailable`] if the XML is malformed, the
///   reference date is unreadable, or the document holds no rates.
/// - [`CurrencyError::InvalidRate`] if a rate is missing, non-numeric, or not
///   positive.
pub fn parse_document(xml: &str, base_currency: &str) -> Result<RateTable, CurrencyError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut table = RateTable::new();
    let mut as_of = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element) | Event::Empty(element))
                if element.local_name().as_ref() == b"Cube" =>
            {
                let attrs = cube_attributes(&element)?;

                if let Some(time) = attrs.time {
                    let date = NaiveDate::parse_from_str(&time, "%Y-%m-%d").map_err(|e| {
                        CurrencyError::unavailable(format!("invalid reference date {time}: {e}"))
                    })?;
                    as_of = Some(date);
                }

                match (attrs.currency, attrs.rate) {
                    (Some(currency), Some(raw)) => {
                        let rate = Decimal::from_str_exact(raw.trim())
                            .map_err(|_| CurrencyError::invalid_rate(currency.clone(), raw))?;
                        table.insert(base_currency, currency, rate)?;
                    }
                    (Some(currency), None) => {
                        return Err(CurrencyError::invalid_rate(currency, ""));
                    }
                    (None, Some(raw)) => {
                        return Err(malformed(format!("rate {raw} without currency")));
                    }
                    (None, None) => {}
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                return Err(malformed(format!(
                    "{err} at byte {}",
                    reader.buffer_position()
                )));
            }
        }
    }

    if table.is_empty() {
        return Err(CurrencyError::unavailable("rate document contained no rates"));
    }

    Ok(match as_of {
        Some(date) => table.with_as_of(date),
        None => table,
    })
}
