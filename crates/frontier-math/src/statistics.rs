//! Descriptive statistics over return series.
//!
//! Variance and covariance are population statistics (divide by N). The
//! portfolio formulas downstream depend on this convention.
//!
//! Rates are expressed in percent: a monthly return of `1.5` means 1.5%.

use crate::error::{MathError, MathResult};

fn require_data(data: &[f64]) -> MathResult<()> {
    if data.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    Ok(())
}

/// Arithmetic mean.
pub fn mean(data: &[f64]) -> MathResult<f64> {
    require_data(data)?;
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population variance.
pub fn variance(data: &[f64]) -> MathResult<f64> {
    let m = mean(data)?;
    let sum_sq: f64 = data.iter().map(|x| (x - m).powi(2)).sum();
    Ok(sum_sq / data.len() as f64)
}

/// Population standard deviation.
pub fn standard_deviation(data: &[f64]) -> MathResult<f64> {
    variance(data).map(f64::sqrt)
}

/// Nth root of the product of the raw values.
///
/// Evaluated as `exp(mean(ln|x|))` so long series do not overflow the
/// running product. A zero term makes the result zero.
pub fn geometric_mean(data: &[f64]) -> MathResult<f64> {
    require_data(data)?;
    if data.iter().any(|&x| x == 0.0) {
        return Ok(0.0);
    }
    let negatives = data.iter().filter(|&&x| x < 0.0).count();
    if negatives % 2 == 1 {
        return Err(MathError::invalid_input(
            "geometric mean of values with a negative product",
        ));
    }

    let log_mean = data.iter().map(|x| x.abs().ln()).sum::<f64>() / data.len() as f64;
    let result = log_mean.exp();
    if !result.is_finite() {
        return Err(MathError::invalid_input(format!(
            "geometric mean is not finite ({result})"
        )));
    }
    Ok(result)
}

/// Average per-period percent change equivalent to compounding `data`.
///
/// Each value is a percent change; the result is `(Π(100 + x))^(1/N) - 100`.
///
/// # Example
///
/// ```rust
/// use frontier_math::statistics::geometric_mean_of_percents;
///
/// // +10% then -10% compounds to -1% overall, about -0.5% per period
/// let avg = geometric_mean_of_percents(&[10.0, -10.0]).unwrap();
/// assert!((avg - (99.0_f64.sqrt() * 10.0 - 100.0)).abs() < 1e-12);
/// ```
pub fn geometric_mean_of_percents(data: &[f64]) -> MathResult<f64> {
    require_data(data)?;
    if let Some(x) = data.iter().find(|&&x| x < -100.0) {
        return Err(MathError::invalid_input(format!(
            "percent change {x} is below -100%"
        )));
    }
    geometric_mean(&to_relative_percents(data)).map(|g| g - 100.0)
}

/// Maps percent changes to relative levels, e.g. `-3%` to `97%`.
#[must_use]
pub fn to_relative_percents(data: &[f64]) -> Vec<f64> {
    data.iter().map(|x| 100.0 + x).collect()
}

/// Population covariance.
///
/// Series of different lengths are truncated to the shorter length,
/// keeping the leading elements of each. Callers must order both series the
/// same way (e.g. newest-first) beforehand.
pub fn covariance(x: &[f64], y: &[f64]) -> MathResult<f64> {
    let n = x.len().min(y.len());
    let (x, y) = (&x[..n], &y[..n]);
    let mean_x = mean(x)?;
    let mean_y = mean(y)?;

    let sum: f64 = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| (xi - mean_x) * (yi - mean_y))
        .sum();
    Ok(sum / n as f64)
}

/// Converts an annual percent rate to the equivalent compounded monthly rate.
///
/// Defined for `annual >= -100`.
#[must_use]
pub fn annual_to_monthly_rate(annual: f64) -> f64 {
    ((1.0 + annual / 100.0).powf(1.0 / 12.0) - 1.0) * 100.0
}

/// Converts a monthly percent rate to the equivalent compounded annual rate.
#[must_use]
pub fn monthly_to_annual_rate(monthly: f64) -> f64 {
    ((1.0 + monthly / 100.0).powi(12) - 1.0) * 100.0
}

/// All order-preserving length-`k` subsets of `items`.
///
/// `k == 0` yields a single empty combination; `k > items.len()` yields none.
///
/// # Example
///
/// ```rust
/// use frontier_math::statistics::unique_combinations;
///
/// let combos = unique_combinations(&["A", "B", "C"], 2);
/// assert_eq!(combos, vec![vec!["A", "B"], vec!["A", "C"], vec!["B", "C"]]);
/// ```
pub fn unique_combinations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    let mut results = Vec::new();
    let mut partial = Vec::with_capacity(k);
    combine(items, k, 0, &mut partial, &mut results);
    results
}

fn combine<T: Clone>(
    items: &[T],
    k: usize,
    start: usize,
    partial: &mut Vec<T>,
    results: &mut Vec<Vec<T>>,
) {
    if partial.len() == k {
        results.push(partial.clone());
        return;
    }
    let remaining = k - partial.len();
    if items.len() < remaining {
        return;
    }
    for i in start..=items.len() - remaining {
        partial.push(items[i].clone());
        combine(items, k, i + 1, partial, results);
        partial.pop();
    }
}
