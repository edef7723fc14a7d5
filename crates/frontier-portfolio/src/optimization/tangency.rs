//! Tangency (optimal risky) portfolio.
//!
//! Weights come from Cramer's rule on the risk-adjusted covariance system
//! `Σ' = Σ × Corr`: column `i` of `Σ'` is replaced by the excess returns,
//! the determinants are taken, and each is divided by their sum.

use frontier_math::{DeterminantMethod, Matrix};
use tracing::info;

use crate::asset::Asset;
use crate::error::{PortfolioError, PortfolioResult};
use crate::market::MarketData;
use crate::portfolio::Portfolio;

/// Result of a tangency optimization.
#[derive(Debug, Clone, PartialEq)]
pub struct TangencyPortfolio {
    /// `(symbol, weight)` pairs in portfolio order; weights sum to 1.
    pub weights: Vec<(String, f64)>,
    /// Risk-free rate used, in annual percent.
    pub risk_free_rate: f64,
}

impl TangencyPortfolio {
    /// Weight of `symbol`, if present.
    #[must_use]
    pub fn weight(&self, symbol: &str) -> Option<f64> {
        let symbol = symbol.trim().to_uppercase();
        self.weights
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, w)| *w)
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().map(|(_, w)| w).sum()
    }
}

/// Tangency weights from covariance, correlation and excess returns.
///
/// # Errors
///
/// - `Math` on shape mismatches
/// - `SingularCovariance` when the determinants sum to less than `tolerance`
pub fn tangency_weights(
    covariance: &Matrix,
    correlation: &Matrix,
    excess_returns: &[f64],
    method: DeterminantMethod,
    tolerance: f64,
) -> PortfolioResult<Vec<f64>> {
    let adjusted = covariance.multiply(correlation)?;

    let determinants = (0..excess_returns.len())
        .map(|i| {
            adjusted
                .replace_column(i, excess_returns)?
                .determinant_with(method)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let total: f64 = determinants.iter().sum();
    if total.abs() < tolerance {
        return Err(PortfolioError::SingularCovariance);
    }
    Ok(determinants.iter().map(|d| d / total).collect())
}

impl Portfolio {
    /// Replaces the weights with the tangency portfolio for `risk_free`.
    ///
    /// Weights are only written once the whole computation has succeeded.
    pub fn optimize_tangency(
        &mut self,
        market: &MarketData<'_>,
        risk_free: &dyn Asset,
        years: u32,
    ) -> PortfolioResult<TangencyPortfolio> {
        let risk_free_rate = risk_free.annual_return(market, years)?;
        let covariance = self.covariance_matrix(market, years)?;
        let correlation = self.correlation_matrix(market, years)?;
        let excess = self
            .securities()
            .map(|s| Ok(s.annual_return(market, years)? - risk_free_rate))
            .collect::<PortfolioResult<Vec<_>>>()?;

        let config = market.config();
        let weights = tangency_weights(
            &covariance,
            &correlation,
            &excess,
            config.determinant_method,
            config.singular_tolerance,
        )?;
        self.replace_weights(&weights);

        info!(
            portfolio = %self.name(),
            assets = weights.len(),
            risk_free_rate,
            "tangency portfolio optimized"
        );

        Ok(TangencyPortfolio {
            weights: self
                .weights()
                .into_iter()
                .map(|(s, w)| (s.to_string(), w))
                .collect(),
            risk_free_rate,
        })
    }
}
