//! Capital allocation line through the risk-free asset.

use frontier_math::MathError;

use super::frontier::FrontierPoint;
use crate::asset::Asset;
use crate::error::PortfolioResult;
use crate::market::MarketData;
use crate::portfolio::Portfolio;

/// Sampled line `return = risk_free_rate + slope · std_dev`.
#[derive(Debug, Clone, PartialEq)]
pub struct CapitalAllocationLine {
    /// Intercept, annual percent.
    pub risk_free_rate: f64,
    /// Excess return per unit of standard deviation.
    pub slope: f64,
    /// Points at integer standard deviations starting from zero.
    pub points: Vec<FrontierPoint>,
}

impl CapitalAllocationLine {
    /// Samples the line at `0, 1, ...` up to `1.1 × max_std_dev`, rounded.
    #[must_use]
    pub fn new(risk_free_rate: f64, slope: f64, max_std_dev: f64) -> Self {
        let len = (max_std_dev * 1.1 + 0.5).max(0.0) as usize;
        let points = (0..len)
            .map(|x| {
                let x = x as f64;
                FrontierPoint {
                    std_dev: x,
                    expected_return: risk_free_rate + slope * x,
                }
            })
            .collect();
        Self {
            risk_free_rate,
            slope,
            points,
        }
    }

    /// Expected return on the line at `std_dev`.
    #[must_use]
    pub fn return_at(&self, std_dev: f64) -> f64 {
        self.risk_free_rate + self.slope * std_dev
    }
}

impl Portfolio {
    /// Line from the risk-free asset through this portfolio's current
    /// (return, volatility) point.
    pub fn capital_allocation_line(
        &self,
        market: &MarketData<'_>,
        risk_free: &dyn Asset,
        years: u32,
    ) -> PortfolioResult<CapitalAllocationLine> {
        let risk_free_rate = risk_free.annual_return(market, years)?;
        let annual = self.annual_return(market, years)?;
        let std_dev = self.standard_deviation(market, years)?;
        if std_dev == 0.0 {
            return Err(MathError::DivisionByZero { value: std_dev }.into());
        }
        let slope = (annual - risk_free_rate) / std_dev;
        let max_std_dev = self.max_standard_deviation(market, years)?;
        Ok(CapitalAllocationLine::new(risk_free_rate, slope, max_std_dev))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sampling() {
        // 1.1 * 4.2 + 0.5 = 5.12 -> 5 points
        let line = CapitalAllocationLine::new(4.0, 0.5, 4.2);
        assert_eq!(line.points.len(), 5);
        assert_eq!(line.points[0].std_dev, 0.0);
        assert_eq!(line.points[0].expected_return, 4.0);
        assert_relative_eq!(line.points[4].expected_return, 6.0);
        assert_relative_eq!(line.return_at(10.0), 9.0);
    }

    #[test]
    fn test_rounds_half_up() {
        // 1.1 * 5.0 + 0.5 = 6.0
        assert_eq!(CapitalAllocationLine::new(0.0, 1.0, 5.0).points.len(), 6);
        assert!(CapitalAllocationLine::new(0.0, 1.0, 0.0).points.is_empty());
    }
}
