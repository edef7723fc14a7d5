//! # Frontier Portfolio
//!
//! Mean-variance analytics over historical return series.
//!
//! This crate provides:
//!
//! - **History**: Lazily fetched, memoized price and dividend series
//! - **Assets**: Volatility, beta, annualized return and Sharpe ratio
//! - **Portfolios**: Weighted aggregates and the covariance quadratic form
//! - **Optimization**: Tangency portfolio, efficient frontier and capital
//!   allocation line
//! - **Estimators**: Earnings- and dividend-based equity premiums
//!
//! ## Units
//!
//! Returns are percentages. Standard deviations and Sharpe ratios are in
//! monthly terms; annual returns are compounded from monthly returns.
//!
//! ## Example
//!
//! ```rust
//! use frontier_core::prelude::*;
//! use frontier_portfolio::prelude::*;
//!
//! let d = |m| Date::from_ymd(2024, m, 1).unwrap();
//! let provider = InMemoryProvider::new()
//!     .with_prices("AAA", vec![
//!         PriceRecord::from_adjusted_close(d(3), 104.0),
//!         PriceRecord::from_adjusted_close(d(2), 101.0),
//!         PriceRecord::from_adjusted_close(d(1), 100.0),
//!     ])
//!     .with_quote("AAA", Quote::new("Triple A", 104.0));
//!
//! let market = MarketData::new(&provider).with_as_of(d(6));
//! let portfolio = Portfolio::builder("Solo")
//!     .add(Security::stock("AAA", &provider)?, 1.0)
//!     .build();
//!
//! let variance = portfolio.variance(&market, 1)?;
//! assert!(variance > 0.0);
//! # Ok::<(), PortfolioError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]

pub mod asset;
pub mod cache;
pub mod config;
pub mod error;
pub mod expected_return;
pub mod history;
pub mod market;
pub mod optimization;
pub mod portfolio;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::asset::{Asset, Security};
    pub use crate::cache::{HistoryCache, HistoryKey};
    pub use crate::config::{AnalyticsConfig, FrontierGrid, DEFAULT_YEARS};
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::expected_return::{
        equity_premium_dividend_based, equity_premium_earnings_based,
    };
    pub use crate::history::AssetHistory;
    pub use crate::market::MarketData;
    pub use crate::optimization::{
        CapitalAllocationLine, EfficientFrontier, FrontierCurve, FrontierPoint,
        TangencyPortfolio,
    };
    pub use crate::portfolio::{Portfolio, PortfolioBuilder, PortfolioSummary, Position};
}

pub use asset::{Asset, Security};
pub use config::AnalyticsConfig;
pub use error::{PortfolioError, PortfolioResult};
pub use market::MarketData;
pub use portfolio::{Portfolio, PortfolioBuilder};
