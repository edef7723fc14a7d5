//! Price and dividend history for one symbol over one date range.
//!
//! Both series are fetched on first use and memoized. A failed fetch leaves
//! the series empty so that a later call can try again.

use std::fmt;

use frontier_core::{DateRange, DividendRecord, HistoryProvider, PriceRecord, ProviderError};
use once_cell::unsync::OnceCell;
use tracing::{debug, warn};

use crate::error::{PortfolioError, PortfolioResult};

/// Minimum number of prices needed to form one return.
const MIN_PRICES: usize = 2;

/// Minimum number of calendar years needed for a growth rate.
const MIN_DIVIDEND_YEARS: usize = 2;

/// Historical series for a symbol, ordered newest-first.
pub struct AssetHistory {
    symbol: String,
    range: DateRange,
    prices: OnceCell<Vec<PriceRecord>>,
    dividends: OnceCell<Vec<DividendRecord>>,
}

impl AssetHistory {
    /// Creates an unloaded history. The symbol is upper-cased.
    #[must_use]
    pub fn new(symbol: &str, range: DateRange) -> Self {
        Self {
            symbol: symbol.trim().to_uppercase(),
            range,
            prices: OnceCell::new(),
            dividends: OnceCell::new(),
        }
    }

    /// Creates a history from records already in hand.
    #[must_use]
    pub fn from_records(
        symbol: &str,
        range: DateRange,
        mut prices: Vec<PriceRecord>,
        mut dividends: Vec<DividendRecord>,
    ) -> Self {
        sort_newest_first(&mut prices, |p| p.date);
        sort_newest_first(&mut dividends, |d| d.date);
        Self {
            symbol: symbol.trim().to_uppercase(),
            range,
            prices: OnceCell::with_value(prices),
            dividends: OnceCell::with_value(dividends),
        }
    }

    /// Upper-cased ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The window this history covers.
    #[must_use]
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Returns true once the price series has been populated.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.prices.get().is_some()
    }

    /// Price records, newest first, fetched on first call.
    pub fn prices(&self, provider: &dyn HistoryProvider) -> PortfolioResult<&[PriceRecord]> {
        self.prices
            .get_or_try_init(|| {
                let mut records = provider
                    .price_history(&self.symbol, self.range)
                    .map_err(|e| self.fetch_failed("price", &e))?;
                debug!(
                    symbol = %self.symbol,
                    range = %self.range,
                    count = records.len(),
                    "loaded price history"
                );
                sort_newest_first(&mut records, |p| p.date);
                Ok(records)
            })
            .map(Vec::as_slice)
    }

    /// Dividend records, newest first, fetched on first call.
    pub fn dividends(&self, provider: &dyn HistoryProvider) -> PortfolioResult<&[DividendRecord]> {
        self.dividends
            .get_or_try_init(|| {
                let mut records = provider
                    .dividend_history(&self.symbol, self.range)
                    .map_err(|e| self.fetch_failed("dividend", &e))?;
                debug!(
                    symbol = %self.symbol,
                    range = %self.range,
                    count = records.len(),
                    "loaded dividend history"
                );
                sort_newest_first(&mut records, |d| d.date);
                Ok(records)
            })
            .map(Vec::as_slice)
    }

    /// Monthly percentage returns, newest first.
    ///
    /// `r[i] = (adj[i] / adj[i+1] - 1) * 100`, so the result has one fewer
    /// element than the price series.
    pub fn monthly_returns(&self, provider: &dyn HistoryProvider) -> PortfolioResult<Vec<f64>> {
        let prices = self.prices(provider)?;
        if prices.len() < MIN_PRICES {
            return Err(PortfolioError::insufficient_history(
                &self.symbol,
                MIN_PRICES,
                prices.len(),
            ));
        }

        prices
            .windows(2)
            .map(|pair| {
                let (current, previous) = (pair[0].adjusted_close, pair[1].adjusted_close);
                if previous <= 0.0 {
                    return Err(PortfolioError::data_unavailable(
                        &self.symbol,
                        format!("non-positive adjusted close on {}", pair[1].date),
                    ));
                }
                Ok((current / previous - 1.0) * 100.0)
            })
            .collect()
    }

    /// Average year-over-year dividend growth in percent.
    ///
    /// Dividends are summed per calendar year; the oldest year only serves as
    /// the base for the first growth figure.
    pub fn average_dividend_growth_rate(
        &self,
        provider: &dyn HistoryProvider,
    ) -> PortfolioResult<f64> {
        let yearly = dividends_by_year(self.dividends(provider)?);
        if yearly.len() < MIN_DIVIDEND_YEARS {
            return Err(PortfolioError::insufficient_history(
                &self.symbol,
                MIN_DIVIDEND_YEARS,
                yearly.len(),
            ));
        }

        let mut total = 0.0;
        for pair in yearly.windows(2) {
            let (current, previous) = (pair[0].1, pair[1].1);
            if previous == 0.0 {
                return Err(PortfolioError::data_unavailable(
                    &self.symbol,
                    format!("zero dividend total in {}", pair[1].0),
                ));
            }
            total += (current / previous - 1.0) * 100.0;
        }
        Ok(total / (yearly.len() - 1) as f64)
    }

    fn fetch_failed(&self, series: &str, err: &ProviderError) -> PortfolioError {
        warn!(symbol = %self.symbol, range = %self.range, error = %err, "{series} fetch failed");
        PortfolioError::data_unavailable(&self.symbol, err.to_string())
    }
}

impl fmt::Debug for AssetHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetHistory")
            .field("symbol", &self.symbol)
            .field("range", &self.range)
            .field("prices", &self.prices.get().map(Vec::len))
            .field("dividends", &self.dividends.get().map(Vec::len))
            .finish()
    }
}

fn sort_newest_first<T, F>(records: &mut [T], date: F)
where
    F: Fn(&T) -> frontier_core::Date,
{
    records.sort_by(|a, b| date(b).cmp(&date(a)));
}

/// Sums dividends per calendar year, keeping years in first-seen order.
fn dividends_by_year(dividends: &[DividendRecord]) -> Vec<(i32, f64)> {
    let mut yearly: Vec<(i32, f64)> = Vec::new();
    for dividend in dividends {
        let year = dividend.date.year();
        match yearly.iter_mut().find(|(y, _)| *y == year) {
            Some((_, sum)) => *sum += dividend.amount,
            None => yearly.push((year, dividend.amount)),
        }
    }
    yearly
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use frontier_core::{Date, InMemoryProvider};
    use std::cell::Cell;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn range() -> DateRange {
        DateRange::new(date(2020, 1, 1), date(2023, 1, 1)).unwrap()
    }

    fn prices(closes: &[(Date, f64)]) -> Vec<PriceRecord> {
        closes
            .iter()
            .map(|&(d, c)| PriceRecord::from_adjusted_close(d, c))
            .collect()
    }

    struct CountingProvider {
        inner: InMemoryProvider,
        calls: Cell<usize>,
    }

    impl HistoryProvider for CountingProvider {
        fn price_history(
            &self,
            symbol: &str,
            range: DateRange,
        ) -> Result<Vec<PriceRecord>, ProviderError> {
            self.calls.set(self.calls.get() + 1);
            self.inner.price_history(symbol, range)
        }

        fn dividend_history(
            &self,
            symbol: &str,
            range: DateRange,
        ) -> Result<Vec<DividendRecord>, ProviderError> {
            self.calls.set(self.calls.get() + 1);
            self.inner.dividend_history(symbol, range)
        }
    }

    #[test]
    fn test_monthly_returns_newest_first() {
        let provider = InMemoryProvider::new().with_prices(
            "ACME",
            prices(&[
                (date(2022, 3, 1), 110.0),
                (date(2022, 2, 1), 100.0),
                (date(2022, 1, 1), 120.0),
            ]),
        );
        let history = AssetHistory::new("acme", range());
        let returns = history.monthly_returns(&provider).unwrap();

        assert_eq!(history.symbol(), "ACME");
        assert_eq!(returns.len(), 2);
        assert_relative_eq!(returns[0], 10.0, epsilon = 1e-10);
        assert_relative_eq!(returns[1], -16.666_666_666_666_668, epsilon = 1e-10);
    }

    #[test]
    fn test_records_are_sorted_on_load() {
        let provider = InMemoryProvider::new().with_prices(
            "ACME",
            prices(&[
                (date(2022, 1, 1), 120.0),
                (date(2022, 3, 1), 110.0),
                (date(2022, 2, 1), 100.0),
            ]),
        );
        let history = AssetHistory::new("ACME", range());
        let loaded = history.prices(&provider).unwrap();
        assert_eq!(loaded[0].date, date(2022, 3, 1));
        assert_eq!(loaded[2].date, date(2022, 1, 1));
    }

    #[test]
    fn test_single_price_is_insufficient() {
        let provider =
            InMemoryProvider::new().with_prices("ACME", prices(&[(date(2022, 1, 1), 100.0)]));
        let history = AssetHistory::new("ACME", range());
        assert_eq!(
            history.monthly_returns(&provider).unwrap_err(),
            PortfolioError::insufficient_history("ACME", 2, 1)
        );
    }

    #[test]
    fn test_series_fetched_once() {
        let provider = CountingProvider {
            inner: InMemoryProvider::new().with_prices(
                "ACME",
                prices(&[(date(2022, 2, 1), 101.0), (date(2022, 1, 1), 100.0)]),
            ),
            calls: Cell::new(0),
        };
        let history = AssetHistory::new("ACME", range());
        assert!(!history.is_loaded());

        history.monthly_returns(&provider).unwrap();
        history.monthly_returns(&provider).unwrap();
        assert!(history.is_loaded());
        assert_eq!(provider.calls.get(), 1);
    }

    #[test]
    fn test_failed_fetch_can_retry() {
        let mut provider = InMemoryProvider::new();
        let history = AssetHistory::new("ACME", range());

        let err = history.prices(&provider).unwrap_err();
        assert!(matches!(err, PortfolioError::DataUnavailable { ref symbol, .. } if symbol == "ACME"));
        assert!(!history.is_loaded());

        provider.insert_prices("ACME", prices(&[(date(2022, 1, 1), 100.0)]));
        assert_eq!(history.prices(&provider).unwrap().len(), 1);
    }

    #[test]
    fn test_non_positive_close_rejected() {
        let provider = InMemoryProvider::new().with_prices(
            "ACME",
            prices(&[(date(2022, 2, 1), 10.0), (date(2022, 1, 1), 0.0)]),
        );
        let history = AssetHistory::new("ACME", range());
        assert!(matches!(
            history.monthly_returns(&provider),
            Err(PortfolioError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_dividend_growth() {
        // 2020: 1.0, 2021: 1.1, 2022: 1.21 -> 10% growth each year
        let dividends = vec![
            DividendRecord::new(date(2020, 6, 1), 0.5),
            DividendRecord::new(date(2020, 12, 1), 0.5),
            DividendRecord::new(date(2021, 6, 1), 1.1),
            DividendRecord::new(date(2022, 6, 1), 0.605),
            DividendRecord::new(date(2022, 12, 1), 0.605),
        ];
        let provider = InMemoryProvider::new().with_dividends("ACME", dividends);
        let history = AssetHistory::new("ACME", range());
        let growth = history.average_dividend_growth_rate(&provider).unwrap();
        assert_relative_eq!(growth, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_dividend_growth_needs_two_years() {
        let dividends = vec![
            DividendRecord::new(date(2022, 3, 1), 0.5),
            DividendRecord::new(date(2022, 9, 1), 0.5),
        ];
        let provider = InMemoryProvider::new().with_dividends("ACME", dividends);
        let history = AssetHistory::new("ACME", range());
        assert!(matches!(
            history.average_dividend_growth_rate(&provider),
            Err(PortfolioError::InsufficientHistory { actual: 1, .. })
        ));
    }

    #[test]
    fn test_from_records() {
        let history = AssetHistory::from_records(
            "acme",
            range(),
            prices(&[(date(2022, 1, 1), 100.0), (date(2022, 2, 1), 105.0)]),
            Vec::new(),
        );
        let provider = InMemoryProvider::new();
        assert!(history.is_loaded());
        assert_eq!(history.symbol(), "ACME");
        assert_eq!(history.prices(&provider).unwrap()[0].date, date(2022, 2, 1));
        // The empty provider is never asked; both series came in with the history.
        assert!(history.dividends(&provider).unwrap().is_empty());
        let returns = history.monthly_returns(&provider).unwrap();
        assert_relative_eq!(returns[0], 5.0, epsilon = 1e-10);
    }
}
