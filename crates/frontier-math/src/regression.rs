//! Simple (univariate) ordinary least squares.
//!
//! `x` is the explanatory series (e.g. benchmark returns), `y` the dependent
//! one (e.g. asset returns). Constant series make the slope undefined and
//! fail with `DivisionByZero` rather than producing NaN.

use crate::error::{MathError, MathResult};
use crate::statistics::{covariance, mean, standard_deviation, variance};

fn nonzero(value: f64) -> MathResult<f64> {
    if value == 0.0 {
        return Err(MathError::DivisionByZero { value });
    }
    Ok(value)
}

/// Regression coefficient: `cov(x, y) / var(x)`.
pub fn beta(x: &[f64], y: &[f64]) -> MathResult<f64> {
    Ok(covariance(x, y)? / nonzero(variance(x)?)?)
}

/// Regression constant: `mean(y) - beta · mean(x)`.
pub fn intercept(x: &[f64], y: &[f64]) -> MathResult<f64> {
    Ok(mean(y)? - beta(x, y)? * mean(x)?)
}

/// Coefficient of determination: `cov(x, y)² / (var(x) · var(y))`.
pub fn r_squared(x: &[f64], y: &[f64]) -> MathResult<f64> {
    let denominator = nonzero(variance(x)? * variance(y)?)?;
    Ok(covariance(x, y)?.powi(2) / denominator)
}

/// Pearson correlation: `cov(x, y) / (σx · σy)`, in `[-1, 1]`.
pub fn correlation(x: &[f64], y: &[f64]) -> MathResult<f64> {
    let denominator = nonzero(standard_deviation(x)? * standard_deviation(y)?)?;
    Ok((covariance(x, y)? / denominator).clamp(-1.0, 1.0))
}
