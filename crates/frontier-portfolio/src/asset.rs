//! Assets and their history-derived analytics.
//!
//! Every metric takes the [`MarketData`] context and a lookback window in
//! years. Units follow the return series: monthly percent for dispersion
//! and Sharpe ratio, annual percent for [`Asset::annual_return`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use frontier_core::{AssetRole, Quote, QuoteProvider};
use frontier_math::{regression, statistics, MathError};

use crate::error::{PortfolioError, PortfolioResult};
use crate::history::AssetHistory;
use crate::market::MarketData;

/// Anything with a symbol and therefore a resolvable price history.
pub trait Asset {
    /// Upper-cased ticker symbol.
    fn symbol(&self) -> &str;

    /// Role in the analysis.
    fn role(&self) -> AssetRole {
        AssetRole::Ordinary
    }

    /// Quote attributes, if loaded.
    fn quote(&self) -> Option<&Quote> {
        None
    }

    /// History over the trailing `years` window.
    fn history(&self, market: &MarketData<'_>, years: u32) -> PortfolioResult<Rc<AssetHistory>> {
        let range = market.window(years)?;
        Ok(market.history(self.symbol(), range))
    }

    /// Monthly percent returns, newest first.
    fn monthly_returns(&self, market: &MarketData<'_>, years: u32) -> PortfolioResult<Vec<f64>> {
        market.monthly_returns(self.symbol(), years)
    }

    /// Standard deviation of monthly returns (monthly percent).
    fn standard_deviation(&self, market: &MarketData<'_>, years: u32) -> PortfolioResult<f64> {
        let returns = market.dispersion_returns(self.symbol(), years)?;
        Ok(statistics::standard_deviation(&returns)?)
    }

    /// Population variance of monthly returns.
    fn variance(&self, market: &MarketData<'_>, years: u32) -> PortfolioResult<f64> {
        let returns = market.dispersion_returns(self.symbol(), years)?;
        Ok(statistics::variance(&returns)?)
    }

    /// Compounded annual return in percent.
    ///
    /// A risk-free asset reports its quoted yield instead.
    fn annual_return(&self, market: &MarketData<'_>, years: u32) -> PortfolioResult<f64> {
        if self.role() == AssetRole::RiskFree {
            return self.quote().map(|q| q.price).ok_or_else(|| {
                PortfolioError::data_unavailable(self.symbol(), "risk-free asset has no quote")
            });
        }
        let returns = self.monthly_returns(market, years)?;
        let monthly = statistics::geometric_mean_of_percents(&returns)?;
        Ok(statistics::monthly_to_annual_rate(monthly))
    }

    /// Regression slope of this asset's returns on the benchmark's.
    fn beta(
        &self,
        market: &MarketData<'_>,
        years: u32,
        benchmark: &dyn Asset,
    ) -> PortfolioResult<f64> {
        let market_returns = market.dispersion_returns(benchmark.symbol(), years)?;
        let own_returns = market.dispersion_returns(self.symbol(), years)?;
        Ok(regression::beta(&market_returns, &own_returns)?)
    }

    /// Monthly excess return over the risk-free rate per unit of volatility.
    ///
    /// The asset side compounds historical returns while the risk-free side
    /// uses the current annual rate.
    fn sharpe_ratio(
        &self,
        market: &MarketData<'_>,
        risk_free: &dyn Asset,
        years: u32,
    ) -> PortfolioResult<f64> {
        let returns = market.dispersion_returns(self.symbol(), years)?;
        let average = statistics::geometric_mean_of_percents(&returns)?;
        let std_dev = statistics::standard_deviation(&returns)?;
        let risk_free_rate = risk_free.annual_return(market, years)?;
        excess_per_unit_risk(average, risk_free_rate, std_dev)
    }
}

/// `(a2m(average) - a2m(risk_free)) / std_dev`, shared with portfolios.
pub(crate) fn excess_per_unit_risk(
    average: f64,
    risk_free_rate: f64,
    std_dev: f64,
) -> PortfolioResult<f64> {
    if std_dev == 0.0 {
        return Err(MathError::DivisionByZero { value: std_dev }.into());
    }
    let excess = statistics::annual_to_monthly_rate(average)
        - statistics::annual_to_monthly_rate(risk_free_rate);
    Ok(excess / std_dev)
}

/// A ticker-identified asset with its quote.
///
/// Securities compare and hash by symbol only.
#[derive(Clone)]
pub struct Security {
    symbol: String,
    role: AssetRole,
    quote: Quote,
}

impl Security {
    /// Creates a security from a quote already in hand.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuote` if the quote has non-finite fields or a
    /// negative price.
    pub fn new(symbol: &str, role: AssetRole, quote: Quote) -> PortfolioResult<Self> {
        let symbol = symbol.trim().to_uppercase();
        quote
            .validate()
            .map_err(|reason| PortfolioError::invalid_quote(&symbol, reason))?;
        Ok(Self {
            symbol,
            role,
            quote,
        })
    }

    /// Loads the quote for `symbol` from the provider.
    ///
    /// # Errors
    ///
    /// Returns `DataUnavailable` if the provider fails or the quote is
    /// malformed.
    pub fn load(
        symbol: &str,
        role: AssetRole,
        provider: &dyn QuoteProvider,
    ) -> PortfolioResult<Self> {
        let quote = provider
            .quote(symbol)
            .map_err(|e| PortfolioError::data_unavailable(symbol.trim().to_uppercase(), e.to_string()))?;
        Self::new(symbol, role, quote).map_err(|e| match e {
            PortfolioError::InvalidQuote { symbol, reason } => {
                PortfolioError::DataUnavailable { symbol, reason }
            }
            other => other,
        })
    }

    /// Loads an ordinary stock.
    pub fn stock(symbol: &str, provider: &dyn QuoteProvider) -> PortfolioResult<Self> {
        Self::load(symbol, AssetRole::Ordinary, provider)
    }

    /// Loads a benchmark index.
    pub fn benchmark(symbol: &str, provider: &dyn QuoteProvider) -> PortfolioResult<Self> {
        Self::load(symbol, AssetRole::Benchmark, provider)
    }

    /// Loads a risk-free proxy.
    pub fn risk_free(symbol: &str, provider: &dyn QuoteProvider) -> PortfolioResult<Self> {
        Self::load(symbol, AssetRole::RiskFree, provider)
    }

    /// Display name from the quote.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.quote.name
    }

    /// The loaded quote.
    #[must_use]
    pub fn quote_data(&self) -> &Quote {
        &self.quote
    }
}

impl Asset for Security {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn role(&self) -> AssetRole {
        self.role
    }

    fn quote(&self) -> Option<&Quote> {
        Some(&self.quote)
    }
}

impl PartialEq for Security {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl Eq for Security {}

impl Hash for Security {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
    }
}

impl fmt::Debug for Security {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Security")
            .field("symbol", &self.symbol)
            .field("role", &self.role)
            .field("name", &self.quote.name)
            .finish()
    }
}

impl fmt::Display for Security {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.symbol, self.role)
    }
}
