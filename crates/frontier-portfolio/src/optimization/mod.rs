//! Mean-variance optimization.
//!
//! - [`tangency`]: The optimal risky portfolio for a given risk-free rate
//! - [`frontier`]: The Markowitz minimum-variance frontier
//! - [`allocation`]: The capital allocation line through the risk-free asset
//!
//! Each module exposes a pure function over matrices plus a [`Portfolio`]
//! method that gathers the inputs through [`MarketData`].
//!
//! [`Portfolio`]: crate::Portfolio
//! [`MarketData`]: crate::MarketData

pub mod allocation;
pub mod frontier;
pub mod tangency;

pub use allocation::CapitalAllocationLine;
pub use frontier::{frontier_curve, AssetPoint, EfficientFrontier, FrontierCurve, FrontierPoint};
pub use tangency::{tangency_weights, TangencyPortfolio};
