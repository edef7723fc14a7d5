//! Property-based tests for portfolio invariants.
//!
//! - A fully weighted single asset carries exactly its own variance
//! - The frontier's minimum sits at `(1/A, B/A)`
//! - Tangency weights sum to one

use approx::assert_relative_eq;
use frontier_core::prelude::*;
use frontier_math::{statistics, DeterminantMethod, Matrix};
use frontier_portfolio::config::FrontierGrid;
use frontier_portfolio::optimization::{frontier_curve, tangency_weights};
use frontier_portfolio::prelude::*;
use proptest::prelude::*;

fn series(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-15.0..15.0f64, len)
}

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
        .map(|(i, &close)| {
            let total = 2024 * 12 + 5 - i as i32;
            let date = Date::from_ymd(total / 12, (total % 12) as u32 + 1, 1).unwrap();
            PriceRecord::from_adjusted_close(date, close)
        })
        .collect()
}

fn covariance(columns: &[Vec<f64>]) -> Matrix {
    let rows: Vec<Vec<f64>> = columns
        .iter()
        .map(|x| {
            columns
                .iter()
                .map(|y| statistics::covariance(x, y).unwrap())
                .collect()
        })
        .collect();
    Matrix::from_rows(&rows).unwrap()
}

proptest! {
    #[test]
    fn single_asset_portfolio_variance(returns in series(11)) {
        let provider = InMemoryProvider::new()
            .with_prices("SOLO", closes_for(&returns))
            .with_quote("SOLO", Quote::new("Solo", 1.0));
        let market = MarketData::new(&provider)
            .with_as_of(Date::from_ymd(2024, 6, 30).unwrap());
        let security = Security::stock("SOLO", &provider).unwrap();
        let asset_variance = security.variance(&market, 1).unwrap();

        let portfolio = Portfolio::builder("Solo").add(security, 1.0).build();
        let variance = portfolio.variance(&market, 1).unwrap();
        prop_assert!((variance - asset_variance).abs() <= 1e-9 * asset_variance.max(1.0));
    }

    #[test]
    fn frontier_minimum_variance(
        a in series(12),
        b in series(12),
        mu in prop::collection::vec(-20.0..20.0f64, 2),
    ) {
        let cov = covariance(&[a, b]);
        let det = cov.determinant().unwrap();
        prop_assume!(det.abs() > 1e-3);
        prop_assume!((mu[0] - mu[1]).abs() > 0.1);

        let expected = Matrix::column_vector(&mu).unwrap();
        let curve = frontier_curve(
            &cov,
            &expected,
            &FrontierGrid::default(),
            DeterminantMethod::Cofactor,
            1e-9,
        );
        prop_assume!(curve.is_ok());
        let curve = curve.unwrap();

        let min = curve.minimum_variance_point();
        let at_min = curve.variance_at(min.expected_return);
        prop_assert!((at_min - 1.0 / curve.a).abs() <= 1e-6 * (1.0 / curve.a).abs().max(1.0));
        let weights = &curve.minimum_variance_weights;
        let total: f64 = weights.iter().sum();
        let scale: f64 = weights.iter().map(|w| w.abs()).sum::<f64>().max(1.0);
        prop_assert!((total - 1.0).abs() < 1e-9 * scale);
    }

    #[test]
    fn tangency_weights_sum_to_one(
        a in series(12),
        b in series(12),
        c in series(12),
        excess in prop::collection::vec(-10.0..10.0f64, 3),
    ) {
        let columns = [a, b, c];
        let cov = covariance(&columns);
        let identity = Matrix::identity(3);
        if let Ok(weights) =
            tangency_weights(&cov, &identity, &excess, DeterminantMethod::Lu, 1e-6)
        {
            let total: f64 = weights.iter().sum();
            let scale: f64 = weights.iter().map(|w| w.abs()).sum::<f64>().max(1.0);
            prop_assert!((total - 1.0).abs() < 1e-9 * scale);
        }
    }
}

#[test]
fn capital_allocation_line_starts_at_risk_free() {
    let line = CapitalAllocationLine::new(3.5, 0.8, 9.0);
    assert_eq!(line.points.len(), 10);
    assert_relative_eq!(line.points[0].expected_return, 3.5);
    assert_relative_eq!(line.points[9].expected_return, 3.5 + 0.8 * 9.0);
}
