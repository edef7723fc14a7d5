//! The analytics context: data provider, history cache, configuration and
//! valuation date.

use std::rc::Rc;

use frontier_core::{Date, DateRange, HistoryProvider, QuoteProvider};

use crate::asset::Security;
use crate::cache::HistoryCache;
use crate::config::AnalyticsConfig;
use crate::error::{PortfolioError, PortfolioResult};
use crate::history::AssetHistory;

/// Dispersion statistics need at least this many monthly returns.
pub const MIN_RETURN_PERIODS: usize = 2;

/// Context shared by every asset and portfolio computation.
///
/// Lookback windows resolve against [`MarketData::as_of`], so two contexts
/// with the same provider and date give identical results.
///
/// # Example
///
/// ```rust
/// use frontier_core::prelude::*;
/// use frontier_portfolio::MarketData;
///
/// let provider = InMemoryProvider::new();
/// let as_of = Date::from_ymd(2024, 6, 30).unwrap();
/// let market = MarketData::new(&provider).with_as_of(as_of);
///
/// let window = market.window(3).unwrap();
/// assert_eq!(window.start(), Date::from_ymd(2021, 6, 30).unwrap());
/// ```
pub struct MarketData<'a> {
    provider: &'a dyn HistoryProvider,
    cache: HistoryCache,
    config: AnalyticsConfig,
    as_of: Date,
}

impl<'a> MarketData<'a> {
    /// Creates a context valued today with the default configuration.
    #[must_use]
    pub fn new(provider: &'a dyn HistoryProvider) -> Self {
        Self {
            provider,
            cache: HistoryCache::new(),
            config: AnalyticsConfig::default(),
            as_of: Date::today(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: AnalyticsConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the valuation date.
    #[must_use]
    pub fn with_as_of(mut self, as_of: Date) -> Self {
        self.as_of = as_of;
        self
    }

    /// Reuses an existing cache.
    #[must_use]
    pub fn with_cache(mut self, cache: HistoryCache) -> Self {
        self.cache = cache;
        self
    }

    /// Analytics configuration.
    #[must_use]
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Valuation date.
    #[must_use]
    pub fn as_of(&self) -> Date {
        self.as_of
    }

    /// The history cache.
    #[must_use]
    pub fn cache(&self) -> &HistoryCache {
        &self.cache
    }

    /// Consumes the context, keeping the cache for a later one.
    #[must_use]
    pub fn into_cache(self) -> HistoryCache {
        self.cache
    }

    /// The data provider.
    #[must_use]
    pub fn provider(&self) -> &'a dyn HistoryProvider {
        self.provider
    }

    /// The trailing window of `years` ending at the valuation date.
    pub fn window(&self, years: u32) -> PortfolioResult<DateRange> {
        Ok(DateRange::trailing_years(self.as_of, years)?)
    }

    /// Lookback used when a caller does not choose one.
    #[must_use]
    pub fn default_years(&self) -> u32 {
        self.config.default_years
    }

    /// The trailing window of [`MarketData::default_years`].
    pub fn default_window(&self) -> PortfolioResult<DateRange> {
        self.window(self.config.default_years)
    }

    /// Loads the configured benchmark index.
    ///
    /// # Errors
    ///
    /// Returns `DataUnavailable` if `quotes` has no usable quote for it.
    pub fn benchmark(&self, quotes: &dyn QuoteProvider) -> PortfolioResult<Security> {
        Security::benchmark(&self.config.benchmark_symbol, quotes)
    }

    /// Loads the configured risk-free proxy.
    ///
    /// # Errors
    ///
    /// Returns `DataUnavailable` if `quotes` has no usable quote for it.
    pub fn risk_free(&self, quotes: &dyn QuoteProvider) -> PortfolioResult<Security> {
        Security::risk_free(&self.config.risk_free_symbol, quotes)
    }

    /// Cached history for `symbol` over `range`.
    pub fn history(&self, symbol: &str, range: DateRange) -> Rc<AssetHistory> {
        self.cache.get_or_create(symbol, range)
    }

    /// Monthly percent returns for `symbol` over the trailing window.
    pub fn monthly_returns(&self, symbol: &str, years: u32) -> PortfolioResult<Vec<f64>> {
        let range = self.window(years)?;
        self.history(symbol, range).monthly_returns(self.provider)
    }

    /// Monthly returns with enough periods for a dispersion statistic.
    pub(crate) fn dispersion_returns(&self, symbol: &str, years: u32) -> PortfolioResult<Vec<f64>> {
        let returns = self.monthly_returns(symbol, years)?;
        if returns.len() < MIN_RETURN_PERIODS {
            return Err(PortfolioError::insufficient_history(
                symbol.trim().to_uppercase(),
                MIN_RETURN_PERIODS,
                returns.len(),
            ));
        }
        Ok(returns)
    }
}

impl std::fmt::Debug for MarketData<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketData")
            .field("cache", &self.cache)
            .field("config", &self.config)
            .field("as_of", &self.as_of)
            .finish_non_exhaustive()
    }
}
