//! Risk and return aggregates over a portfolio's positions.
//!
//! Every method resolves per-asset data through [`MarketData`]. If any
//! held asset lacks data the whole aggregate fails; no partial sums are
//! returned.

use frontier_core::QuoteProvider;
use frontier_math::{regression, statistics, Matrix};

use super::Portfolio;
use crate::asset::{excess_per_unit_risk, Asset};
use crate::error::{PortfolioError, PortfolioResult};
use crate::market::MarketData;

/// Headline figures over the configured lookback, benchmark and risk-free
/// proxy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortfolioSummary {
    /// Lookback in years.
    pub years: u32,
    /// Annual percent.
    pub annual_return: f64,
    /// Monthly percent.
    pub standard_deviation: f64,
    /// Against `AnalyticsConfig::benchmark_symbol`.
    pub beta: f64,
    /// Against `AnalyticsConfig::risk_free_symbol`.
    pub sharpe_ratio: f64,
}

impl Portfolio {
    /// Return, volatility, beta and Sharpe ratio using the context's
    /// configured defaults. The benchmark and risk-free quotes come from
    /// `quotes`.
    pub fn summary(
        &self,
        market: &MarketData<'_>,
        quotes: &dyn QuoteProvider,
    ) -> PortfolioResult<PortfolioSummary> {
        let years = market.default_years();
        let benchmark = market.benchmark(quotes)?;
        let risk_free = market.risk_free(quotes)?;
        Ok(PortfolioSummary {
            years,
            annual_return: self.annual_return(market, years)?,
            standard_deviation: self.standard_deviation(market, years)?,
            beta: self.beta(market, years, &benchmark)?,
            sharpe_ratio: self.sharpe_ratio(market, &risk_free, years)?,
        })
    }

    /// Weighted sum of per-asset annual returns (annual percent).
    pub fn annual_return(&self, market: &MarketData<'_>, years: u32) -> PortfolioResult<f64> {
        self.ensure_not_empty()?;
        let mut total = 0.0;
        for position in self.positions() {
            total += position.weight * position.security.annual_return(market, years)?;
        }
        Ok(total)
    }

    /// Weighted sum of per-asset betas against `benchmark`.
    pub fn beta(
        &self,
        market: &MarketData<'_>,
        years: u32,
        benchmark: &dyn Asset,
    ) -> PortfolioResult<f64> {
        self.ensure_not_empty()?;
        let mut total = 0.0;
        for position in self.positions() {
            total += position.weight * position.security.beta(market, years, benchmark)?;
        }
        Ok(total)
    }

    /// Population covariance of monthly returns, in insertion order.
    pub fn covariance_matrix(&self, market: &MarketData<'_>, years: u32) -> PortfolioResult<Matrix> {
        self.pairwise_matrix(market, years, statistics::covariance)
    }

    /// Correlation of monthly returns, in insertion order.
    pub fn correlation_matrix(
        &self,
        market: &MarketData<'_>,
        years: u32,
    ) -> PortfolioResult<Matrix> {
        self.pairwise_matrix(market, years, regression::correlation)
    }

    /// Column vector of per-asset annual returns.
    pub fn expected_returns(&self, market: &MarketData<'_>, years: u32) -> PortfolioResult<Matrix> {
        self.ensure_not_empty()?;
        let returns = self
            .securities()
            .map(|s| s.annual_return(market, years))
            .collect::<PortfolioResult<Vec<_>>>()?;
        Ok(Matrix::column_vector(&returns)?)
    }

    /// Portfolio variance `wᵗ Σ w` in squared monthly percent.
    pub fn variance(&self, market: &MarketData<'_>, years: u32) -> PortfolioResult<f64> {
        let covariance = self.covariance_matrix(market, years)?;
        let weights: Vec<f64> = self.positions().iter().map(|p| p.weight).collect();
        let row = Matrix::row_vector(&weights)?;
        let column = Matrix::column_vector(&weights)?;
        Ok(row.multiply(&covariance)?.multiply(&column)?.scalar()?)
    }

    /// Square root of [`Portfolio::variance`].
    ///
    /// Rounding can leave a fully hedged variance a hair below zero; such
    /// values are treated as zero.
    pub fn standard_deviation(&self, market: &MarketData<'_>, years: u32) -> PortfolioResult<f64> {
        Ok(self.variance(market, years)?.max(0.0).sqrt())
    }

    /// Sharpe ratio from the portfolio's annual return and volatility.
    pub fn sharpe_ratio(
        &self,
        market: &MarketData<'_>,
        risk_free: &dyn Asset,
        years: u32,
    ) -> PortfolioResult<f64> {
        let annual = self.annual_return(market, years)?;
        let std_dev = self.standard_deviation(market, years)?;
        let risk_free_rate = risk_free.annual_return(market, years)?;
        excess_per_unit_risk(annual, risk_free_rate, std_dev)
    }

    /// Highest per-asset annual return, floored at zero.
    pub fn max_asset_return(&self, market: &MarketData<'_>, years: u32) -> PortfolioResult<f64> {
        let mut max = 0.0_f64;
        for security in self.securities() {
            max = max.max(security.annual_return(market, years)?);
        }
        Ok(max)
    }

    /// Highest per-asset monthly standard deviation.
    pub fn max_standard_deviation(
        &self,
        market: &MarketData<'_>,
        years: u32,
    ) -> PortfolioResult<f64> {
        let mut max = 0.0_f64;
        for security in self.securities() {
            max = max.max(security.standard_deviation(market, years)?);
        }
        Ok(max)
    }

    pub(crate) fn ensure_not_empty(&self) -> PortfolioResult<()> {
        if self.is_empty() {
            return Err(PortfolioError::EmptyPortfolio);
        }
        Ok(())
    }

    /// Monthly return series of every held asset, in insertion order.
    pub(crate) fn return_series(
        &self,
        market: &MarketData<'_>,
        years: u32,
    ) -> PortfolioResult<Vec<Vec<f64>>> {
        self.ensure_not_empty()?;
        self.securities()
            .map(|s| market.dispersion_returns(s.symbol(), years))
            .collect()
    }

    fn pairwise_matrix<F>(
        &self,
        market: &MarketData<'_>,
        years: u32,
        f: F,
    ) -> PortfolioResult<Matrix>
    where
        F: Fn(&[f64], &[f64]) -> frontier_math::MathResult<f64>,
    {
        let series = self.return_series(market, years)?;
        let rows = series
            .iter()
            .map(|x| {
                series
                    .iter()
                    .map(|y| f(x.as_slice(), y.as_slice()))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Matrix::from_rows(&rows)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Security;
    use crate::config::AnalyticsConfig;
    use approx::assert_relative_eq;
    use frontier_core::{AssetRole, Date, InMemoryProvider, PriceRecord, Quote};

    fn as_of() -> Date {
        Date::from_ymd(2024, 6, 30).unwrap()
    }

    /// Builds newest-first closes whose monthly returns equal `returns`.
    fn closes_for(returns: &[f64]) -> Vec<PriceRecord> {
        let mut levels = vec![100.0];
        for r in returns.iter().rev() {
            let last = *levels.last().unwrap();
            levels.push(last * (1.0 + r / 100.0));
        }
        levels
            .iter()
            .rev()
            .enumerate()
            .map(|(i, &c)| {
                let month = 6 - i as u32;
                PriceRecord::from_adjusted_close(Date::from_ymd(2024, month, 1).unwrap(), c)
            })
            .collect()
    }

    fn security(symbol: &str) -> Security {
        Security::new(symbol, AssetRole::Ordinary, Quote::new(symbol, 100.0)).unwrap()
    }

    fn provider() -> InMemoryProvider {
        InMemoryProvider::new()
            .with_prices("X", closes_for(&[2.0, -1.0, 3.0, 0.0]))
            .with_prices("Y", closes_for(&[1.0, 1.0, -2.0, 4.0]))
    }

    #[test]
    fn test_generated_returns() {
        let provider = provider();
        let market = MarketData::new(&provider).with_as_of(as_of());
        let returns = market.monthly_returns("X", 1).unwrap();
        for (actual, expected) in returns.iter().zip([2.0, -1.0, 3.0, 0.0]) {
            assert_relative_eq!(*actual, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_covariance_matrix() {
        let provider = provider();
        let market = MarketData::new(&provider).with_as_of(as_of());
        let portfolio = Portfolio::builder("XY")
            .add(security("X"), 0.5)
            .add(security("Y"), 0.5)
            .build();

        let cov = portfolio.covariance_matrix(&market, 1).unwrap();
        assert_relative_eq!(cov[(0, 0)], 3.6875, epsilon = 1e-9);
        assert_relative_eq!(cov[(1, 1)], 4.5, epsilon = 1e-9);
        assert_relative_eq!(cov[(0, 1)], -1.6875, epsilon = 1e-9);
        assert_relative_eq!(cov[(1, 0)], -1.6875, epsilon = 1e-9);
    }

    #[test]
    fn test_two_asset_variance() {
        let provider = provider();
        let market = MarketData::new(&provider).with_as_of(as_of());
        let portfolio = Portfolio::builder("XY")
            .add(security("X"), 0.5)
            .add(security("Y"), 0.5)
            .build();

        let expected = 0.25 * 3.6875 + 0.25 * 4.5 + 2.0 * 0.25 * -1.6875;
        assert_relative_eq!(portfolio.variance(&market, 1).unwrap(), expected, epsilon = 1e-9);
        assert_relative_eq!(
            portfolio.standard_deviation(&market, 1).unwrap(),
            expected.sqrt(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_correlation_matrix_diagonal() {
        let provider = provider();
        let market = MarketData::new(&provider).with_as_of(as_of());
        let portfolio = Portfolio::builder("XY")
            .add(security("X"), 0.5)
            .add(security("Y"), 0.5)
            .build();

        let corr = portfolio.correlation_matrix(&market, 1).unwrap();
        assert_relative_eq!(corr[(0, 0)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(corr[(1, 1)], 1.0, epsilon = 1e-12);
        let expected = -1.6875 / (3.6875_f64.sqrt() * 4.5_f64.sqrt());
        assert_relative_eq!(corr[(0, 1)], expected, epsilon = 1e-9);
    }

    #[test]
    fn test_weighted_annual_return() {
        let provider = provider();
        let market = MarketData::new(&provider).with_as_of(as_of());
        let x = security("X");
        let y = security("Y");
        let rx = x.annual_return(&market, 1).unwrap();
        let ry = y.annual_return(&market, 1).unwrap();

        let portfolio = Portfolio::builder("XY").add(x, 0.25).add(y, 0.75).build();
        assert_relative_eq!(
            portfolio.annual_return(&market, 1).unwrap(),
            0.25 * rx + 0.75 * ry,
            epsilon = 1e-9
        );

        let expected = portfolio.expected_returns(&market, 1).unwrap();
        assert_eq!(expected.shape(), (2, 1));
        assert_relative_eq!(expected[(1, 0)], ry, epsilon = 1e-12);
        assert_relative_eq!(
            portfolio.max_asset_return(&market, 1).unwrap(),
            rx.max(ry).max(0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_max_standard_deviation() {
        let provider = provider();
        let market = MarketData::new(&provider).with_as_of(as_of());
        let portfolio = Portfolio::builder("XY")
            .add(security("X"), 0.5)
            .add(security("Y"), 0.5)
            .build();
        assert_relative_eq!(
            portfolio.max_standard_deviation(&market, 1).unwrap(),
            4.5_f64.sqrt(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_summary_uses_configured_defaults() {
        let provider = provider()
            .with_quote("X", Quote::new("X", 100.0))
            .with_quote("Y", Quote::new("Y", 100.0))
            .with_quote("^TNX", Quote::new("10Y Treasury", 4.0))
            .with_quote("^IRX", Quote::new("13W Treasury", 5.0));
        let portfolio = Portfolio::builder("XY")
            .add(security("X"), 0.5)
            .add(security("Y"), 0.5)
            .build();
        let config = AnalyticsConfig::default().with_default_years(1).with_benchmark("X");
        let market = MarketData::new(&provider).with_as_of(as_of()).with_config(config.clone());

        let summary = portfolio.summary(&market, &provider).unwrap();
        assert_eq!(summary.years, 1);
        let x = Security::benchmark("X", &provider).unwrap();
        assert_relative_eq!(summary.beta, portfolio.beta(&market, 1, &x).unwrap(), epsilon = 1e-12);
        assert_relative_eq!(
            summary.annual_return,
            portfolio.annual_return(&market, 1).unwrap(),
            epsilon = 1e-12
        );

        let market = MarketData::new(&provider)
            .with_as_of(as_of())
            .with_config(config.clone().with_benchmark("Y"));
        let against_y = portfolio.summary(&market, &provider).unwrap();
        assert!((against_y.beta - summary.beta).abs() > 1e-6);

        let market = MarketData::new(&provider)
            .with_as_of(as_of())
            .with_config(config.with_risk_free("^IRX"));
        let higher_rate = portfolio.summary(&market, &provider).unwrap();
        assert!(higher_rate.sharpe_ratio < summary.sharpe_ratio);
        assert_relative_eq!(higher_rate.beta, summary.beta, epsilon = 1e-12);
    }

    #[test]
    fn test_summary_needs_reference_quotes() {
        let provider = provider();
        let market = MarketData::new(&provider).with_as_of(as_of());
        let portfolio = Portfolio::builder("X").add(security("X"), 1.0).build();
        assert!(matches!(
            portfolio.summary(&market, &provider),
            Err(PortfolioError::DataUnavailable { ref symbol, .. }) if symbol == "^GSPC"
        ));
    }

    #[test]
    fn test_empty_portfolio() {
        let provider = provider();
        let market = MarketData::new(&provider).with_as_of(as_of());
        let portfolio = Portfolio::new("Empty");
        assert_eq!(
            portfolio.variance(&market, 1).unwrap_err(),
            PortfolioError::EmptyPortfolio
        );
        assert_eq!(
            portfolio.annual_return(&market, 1).unwrap_err(),
            PortfolioError::EmptyPortfolio
        );
    }

    #[test]
    fn test_missing_asset_fails_whole_aggregate() {
        let provider = provider();
        let market = MarketData::new(&provider).with_as_of(as_of());
        let portfolio = Portfolio::builder("XZ")
            .add(security("X"), 0.5)
            .add(security("Z"), 0.5)
            .build();
        assert!(matches!(
            portfolio.variance(&market, 1),
            Err(PortfolioError::DataUnavailable { ref symbol, .. }) if symbol == "Z"
        ));
    }
}
