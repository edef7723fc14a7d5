//! Configuration for asset and portfolio analytics.

use frontier_core::types::symbols;
use frontier_math::matrix::{DeterminantMethod, DEFAULT_SINGULAR_TOLERANCE};
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};

/// Default lookback window in years.
pub const DEFAULT_YEARS: u32 = 3;

/// Grid of target returns swept by the efficient frontier.
///
/// Point `i` is `(i - points/2 + 1) · step`, so the default 700 points at
/// 0.1 cover -34.9% to 35.0%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontierGrid {
    /// Number of target returns.
    pub points: usize,
    /// Spacing between consecutive targets, in percent.
    pub step: f64,
}

impl Default for FrontierGrid {
    fn default() -> Self {
        Self {
            points: 700,
            step: 0.1,
        }
    }
}

impl FrontierGrid {
    /// Target returns in ascending order.
    #[must_use]
    pub fn target_returns(&self) -> Vec<f64> {
        let offset = (self.points / 2) as f64 - 1.0;
        (0..self.points)
            .map(|i| (i as f64 - offset) * self.step)
            .collect()
    }
}

/// Configuration for analytics computation.
///
/// # Example
///
/// ```rust
/// use frontier_portfolio::AnalyticsConfig;
///
/// let config = AnalyticsConfig::from_toml_str(r#"
///     default_years = 5
///
///     [frontier]
///     points = 200
/// "#).unwrap();
/// assert_eq!(config.default_years, 5);
/// assert_eq!(config.frontier.points, 200);
/// assert_eq!(config.frontier.step, 0.1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Lookback window used when a caller does not choose one.
    pub default_years: u32,

    /// Target-return grid for the efficient frontier.
    pub frontier: FrontierGrid,

    /// Determinants below this magnitude count as singular.
    pub singular_tolerance: f64,

    /// Algorithm for determinants and inverses in the optimizers.
    pub determinant_method: DeterminantMethod,

    /// Benchmark index symbol.
    pub benchmark_symbol: String,

    /// Risk-free proxy symbol.
    pub risk_free_symbol: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_years: DEFAULT_YEARS,
            frontier: FrontierGrid::default(),
            singular_tolerance: DEFAULT_SINGULAR_TOLERANCE,
            determinant_method: DeterminantMethod::Cofactor,
            benchmark_symbol: symbols::SP_500.to_string(),
            risk_free_symbol: symbols::TEN_YEAR_TREASURY.to_string(),
        }
    }
}

impl AnalyticsConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> PortfolioResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| PortfolioError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the default lookback window.
    #[must_use]
    pub fn with_default_years(mut self, years: u32) -> Self {
        self.default_years = years;
        self
    }

    /// Sets the frontier grid.
    #[must_use]
    pub fn with_frontier(mut self, points: usize, step: f64) -> Self {
        self.frontier = FrontierGrid { points, step };
        self
    }

    /// Sets the singularity tolerance.
    #[must_use]
    pub fn with_singular_tolerance(mut self, tolerance: f64) -> Self {
        self.singular_tolerance = tolerance;
        self
    }

    /// Sets the determinant algorithm.
    #[must_use]
    pub fn with_determinant_method(mut self, method: DeterminantMethod) -> Self {
        self.determinant_method = method;
        self
    }

    /// Sets the benchmark symbol.
    #[must_use]
    pub fn with_benchmark(mut self, symbol: impl Into<String>) -> Self {
        self.benchmark_symbol = symbol.into();
        self
    }

    /// Sets the risk-free symbol.
    #[must_use]
    pub fn with_risk_free(mut self, symbol: impl Into<String>) -> Self {
        self.risk_free_symbol = symbol.into();
        self
    }

    /// Checks the settings for values the optimizers cannot use.
    pub fn validate(&self) -> PortfolioResult<()> {
        if self.frontier.points == 0 {
            return Err(PortfolioError::config("frontier.points must be positive"));
        }
        if !self.frontier.step.is_finite() || self.frontier.step <= 0.0 {
            return Err(PortfolioError::config(format!(
                "frontier.step must be a positive number, got {}",
                self.frontier.step
            )));
        }
        if !self.singular_tolerance.is_finite() || self.singular_tolerance < 0.0 {
            return Err(PortfolioError::config(format!(
                "singular_tolerance must be non-negative, got {}",
                self.singular_tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.default_years, 3);
        assert_eq!(config.frontier.points, 700);
        assert_eq!(config.singular_tolerance, 1e-9);
        assert_eq!(config.determinant_method, DeterminantMethod::Cofactor);
        assert_eq!(config.benchmark_symbol, "^GSPC");
        assert_eq!(config.risk_free_symbol, "^TNX");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = AnalyticsConfig::new()
            .with_default_years(5)
            .with_frontier(100, 0.5)
            .with_determinant_method(DeterminantMethod::Lu)
            .with_benchmark("^NDX");
        assert_eq!(config.default_years, 5);
        assert_eq!(config.frontier.points, 100);
        assert_eq!(config.determinant_method, DeterminantMethod::Lu);
        assert_eq!(config.benchmark_symbol, "^NDX");
    }

    #[test]
    fn test_default_grid_range() {
        let grid = FrontierGrid::default().target_returns();
        assert_eq!(grid.len(), 700);
        assert_relative_eq!(grid[0], -34.9, epsilon = 1e-9);
        assert_relative_eq!(grid[699], 35.0, epsilon = 1e-9);
        assert_relative_eq!(grid[349], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_toml_parsing() {
        let config = AnalyticsConfig::from_toml_str(
            r#"
            determinant_method = "lu"
            singular_tolerance = 1e-12
            risk_free_symbol = "^IRX"
            "#,
        )
        .unwrap();
        assert_eq!(config.determinant_method, DeterminantMethod::Lu);
        assert_eq!(config.singular_tolerance, 1e-12);
        assert_eq!(config.risk_free_symbol, "^IRX");
        assert_eq!(config.default_years, 3);
    }

    #[test]
    fn test_toml_validation() {
        let err = AnalyticsConfig::from_toml_str("[frontier]\npoints = 0").unwrap_err();
        assert!(matches!(err, PortfolioError::Config { .. }));

        let err = AnalyticsConfig::from_toml_str("[frontier]\nstep = -0.1").unwrap_err();
        assert!(err.to_string().contains("step"));

        assert!(AnalyticsConfig::from_toml_str("default_years = \"three\"").is_err());
    }
}
