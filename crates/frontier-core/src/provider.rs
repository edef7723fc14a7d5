//! Collaborator traits for raw data acquisition.
//!
//! The analytics core never performs I/O. Historical series and quote
//! attributes come from implementations of these traits:
//!
//! - [`HistoryProvider`]: Price and dividend series for a symbol over a range
//! - [`QuoteProvider`]: Static quote attributes for a symbol
//!
//! Network access, on-disk caching, timeouts and retries are the provider's
//! responsibility. Calls are blocking from the caller's point of view.

use std::collections::HashMap;

use thiserror::Error;

use crate::types::{DateRange, DividendRecord, PriceRecord, Quote};

/// Error reported by a data collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider has no data for the symbol.
    #[error("not found: {0}")]
    NotFound(String),

    /// The fetch itself failed (network, disk, upstream service).
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The provider returned data that could not be interpreted.
    #[error("malformed data: {0}")]
    Malformed(String),
}

/// Source of historical price and dividend series.
///
/// Implementations should return records newest-first; consumers sort
/// defensively but rely on the records covering exactly `range`.
pub trait HistoryProvider {
    /// Monthly price records for `symbol` within `range`.
    fn price_history(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<Vec<PriceRecord>, ProviderError>;

    /// Dividend payments for `symbol` within `range`.
    fn dividend_history(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<Vec<DividendRecord>, ProviderError>;
}

/// Source of static quote attributes.
pub trait QuoteProvider {
    /// Current quote for `symbol`.
    fn quote(&self, symbol: &str) -> Result<Quote, ProviderError>;
}

impl<T: HistoryProvider + ?Sized> HistoryProvider for &T {
    fn price_history(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<Vec<PriceRecord>, ProviderError> {
        (**self).price_history(symbol, range)
    }

    fn dividend_history(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<Vec<DividendRecord>, ProviderError> {
        (**self).dividend_history(symbol, range)
    }
}

impl<T: QuoteProvider + ?Sized> QuoteProvider for &T {
    fn quote(&self, symbol: &str) -> Result<Quote, ProviderError> {
        (**self).quote(symbol)
    }
}

/// A provider backed by in-memory tables.
///
/// Symbols are matched case-insensitively. Series are filtered to the
/// requested range and returned newest-first.
///
/// # Example
///
/// ```rust
/// use frontier_core::prelude::*;
///
/// let d = |m| Date::from_ymd(2024, m, 1).unwrap();
/// let provider = InMemoryProvider::new()
///     .with_prices("aapl", vec![
///         PriceRecord::from_adjusted_close(d(1), 100.0),
///         PriceRecord::from_adjusted_close(d(2), 110.0),
///     ])
///     .with_quote("AAPL", Quote::new("Apple Inc.", 110.0));
///
/// let range = DateRange::new(d(1), d(12)).unwrap();
/// let prices = provider.price_history("AAPL", range).unwrap();
/// assert_eq!(prices[0].adjusted_close, 110.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    prices: HashMap<String, Vec<PriceRecord>>,
    dividends: HashMap<String, Vec<DividendRecord>>,
    quotes: HashMap<String, Quote>,
}

impl InMemoryProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the price series for a symbol, replacing any previous one.
    #[must_use]
    pub fn with_prices(mut self, symbol: &str, records: Vec<PriceRecord>) -> Self {
        self.insert_prices(symbol, records);
        self
    }

    /// Registers the dividend series for a symbol, replacing any previous one.
    #[must_use]
    pub fn with_dividends(mut self, symbol: &str, records: Vec<DividendRecord>) -> Self {
        self.insert_dividends(symbol, records);
        self
    }

    /// Registers a quote for a symbol.
    #[must_use]
    pub fn with_quote(mut self, symbol: &str, quote: Quote) -> Self {
        self.insert_quote(symbol, quote);
        self
    }

    /// Registers the price series for a symbol.
    pub fn insert_prices(&mut self, symbol: &str, records: Vec<PriceRecord>) {
        self.prices.insert(normalize(symbol), records);
    }

    /// Registers the dividend series for a symbol.
    pub fn insert_dividends(&mut self, symbol: &str, records: Vec<DividendRecord>) {
        self.dividends.insert(normalize(symbol), records);
    }

    /// Registers a quote for a symbol.
    pub fn insert_quote(&mut self, symbol: &str, quote: Quote) {
        self.quotes.insert(normalize(symbol), quote);
    }
}

impl HistoryProvider for InMemoryProvider {
    fn price_history(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<Vec<PriceRecord>, ProviderError> {
        let records = self
            .prices
            .get(&normalize(symbol))
            .ok_or_else(|| ProviderError::NotFound(format!("price history for {symbol}")))?;

        let mut selected: Vec<PriceRecord> = records
            .iter()
            .filter(|r| range.contains(r.date))
            .copied()
            .collect();
        selected.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(selected)
    }

    fn dividend_history(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<Vec<DividendRecord>, ProviderError> {
        let records = self
            .dividends
            .get(&normalize(symbol))
            .ok_or_else(|| ProviderError::NotFound(format!("dividend history for {symbol}")))?;

        let mut selected: Vec<DividendRecord> = records
            .iter()
            .filter(|r| range.contains(r.date))
            .copied()
            .collect();
        selected.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(selected)
    }
}

impl QuoteProvider for InMemoryProvider {
    fn quote(&self, symbol: &str) -> Result<Quote, ProviderError> {
        self.quotes
            .get(&normalize(symbol))
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("quote for {symbol}")))
    }
}

fn normalize(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
