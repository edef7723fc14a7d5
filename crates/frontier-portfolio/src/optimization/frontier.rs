//! Markowitz efficient frontier.
//!
//! With covariance `Σ`, expected returns `μ` and the unit vector `1`:
//!
//! ```text
//! A = 1ᵗ Σ⁻¹ 1    B = 1ᵗ Σ⁻¹ μ    C = μᵗ Σ⁻¹ μ    D = AC - B²
//! σ²(μp) = (A μp² - 2B μp + C) / D
//! ```
//!
//! The curve is swept over the configured target-return grid.

use frontier_math::{DeterminantMethod, Matrix};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::asset::Asset;
use crate::config::FrontierGrid;
use crate::error::{PortfolioError, PortfolioResult};
use crate::market::MarketData;
use crate::portfolio::Portfolio;

/// A point in (risk, return) space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrontierPoint {
    /// Standard deviation, monthly percent.
    pub std_dev: f64,
    /// Expected return, annual percent.
    pub expected_return: f64,
}

/// The frontier curve and the scalars that define it.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontierCurve {
    /// `1ᵗ Σ⁻¹ 1`.
    pub a: f64,
    /// `1ᵗ Σ⁻¹ μ`.
    pub b: f64,
    /// `μᵗ Σ⁻¹ μ`.
    pub c: f64,
    /// `AC - B²`.
    pub d: f64,
    /// Grid points with non-negative variance, in ascending return order.
    pub points: Vec<FrontierPoint>,
    /// Weights of the global minimum-variance portfolio, `Σ⁻¹ 1 / A`.
    pub minimum_variance_weights: Vec<f64>,
}

impl FrontierCurve {
    /// Minimum variance attainable at target return `target`.
    #[must_use]
    pub fn variance_at(&self, target: f64) -> f64 {
        (self.a * target * target - 2.0 * self.b * target + self.c) / self.d
    }

    /// The global minimum-variance point `(sqrt(1/A), B/A)`.
    #[must_use]
    pub fn minimum_variance_point(&self) -> FrontierPoint {
        FrontierPoint {
            std_dev: (1.0 / self.a).sqrt(),
            expected_return: self.b / self.a,
        }
    }
}

/// Per-asset scatter point next to the frontier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPoint {
    /// Asset symbol.
    pub symbol: String,
    /// Standard deviation, monthly percent.
    pub std_dev: f64,
    /// Annual return in percent.
    pub annual_return: f64,
}

/// Efficient frontier of a portfolio's assets.
#[derive(Debug, Clone, PartialEq)]
pub struct EfficientFrontier {
    /// The curve.
    pub curve: FrontierCurve,
    /// The individual assets.
    pub assets: Vec<AssetPoint>,
}

impl EfficientFrontier {
    /// Curve points in ascending return order.
    #[must_use]
    pub fn points(&self) -> &[FrontierPoint] {
        &self.curve.points
    }

    /// Global minimum-variance weights keyed by symbol.
    #[must_use]
    pub fn minimum_variance_portfolio(&self) -> Vec<(&str, f64)> {
        self.assets
            .iter()
            .zip(&self.curve.minimum_variance_weights)
            .map(|(a, &w)| (a.symbol.as_str(), w))
            .collect()
    }
}

/// Computes the frontier for covariance `covariance` and expected returns
/// `expected` (an n×1 column).
///
/// # Errors
///
/// Returns `SingularCovariance` if `Σ` cannot be inverted or `D` is within
/// `tolerance` of zero.
pub fn frontier_curve(
    covariance: &Matrix,
    expected: &Matrix,
    grid: &FrontierGrid,
    method: DeterminantMethod,
    tolerance: f64,
) -> PortfolioResult<FrontierCurve> {
    let inverse = covariance
        .inverse_with(method, tolerance)
        .map_err(PortfolioError::from_covariance_solve)?;
    let ones = Matrix::filled(expected.rows(), 1, 1.0);

    let inverse_ones = inverse.multiply(&ones)?;
    let inverse_mu = inverse.multiply(expected)?;
    let a = ones.transpose().multiply(&inverse_ones)?.scalar()?;
    let b = ones.transpose().multiply(&inverse_mu)?.scalar()?;
    let c = expected.transpose().multiply(&inverse_mu)?.scalar()?;
    let d = a * c - b * b;
    if d.abs() < tolerance || a.abs() < tolerance {
        return Err(PortfolioError::SingularCovariance);
    }

    let mut curve = FrontierCurve {
        a,
        b,
        c,
        d,
        points: Vec::with_capacity(grid.points),
        minimum_variance_weights: inverse_ones.scale(1.0 / a).to_rows().concat(),
    };
    curve.points = grid
        .target_returns()
        .into_iter()
        .filter_map(|target| {
            let variance = curve.variance_at(target);
            (variance >= 0.0).then_some(FrontierPoint {
                std_dev: variance.sqrt(),
                expected_return: target,
            })
        })
        .collect();
    Ok(curve)
}

impl Portfolio {
    /// Efficient frontier of the held assets. Weights are not touched.
    pub fn efficient_frontier(
        &self,
        market: &MarketData<'_>,
        years: u32,
    ) -> PortfolioResult<EfficientFrontier> {
        let covariance = self.covariance_matrix(market, years)?;
        let expected = self.expected_returns(market, years)?;

        let config = market.config();
        let curve = frontier_curve(
            &covariance,
            &expected,
            &config.frontier,
            config.determinant_method,
            config.singular_tolerance,
        )?;

        let assets = self
            .securities()
            .enumerate()
            .map(|(i, s)| {
                Ok(AssetPoint {
                    symbol: s.symbol().to_string(),
                    std_dev: s.standard_deviation(market, years)?,
                    annual_return: expected[(i, 0)],
                })
            })
            .collect::<PortfolioResult<Vec<_>>>()?;

        info!(
            portfolio = %self.name(),
            assets = assets.len(),
            points = curve.points.len(),
            "efficient frontier computed"
        );
        Ok(EfficientFrontier { curve, assets })
    }
}
