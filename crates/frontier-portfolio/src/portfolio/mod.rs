//! Portfolio representation and construction.
//!
//! This module provides the core [`Portfolio`] type, its weighted
//! [`Position`]s and [`PortfolioBuilder`] for fluent construction. Risk and
//! return aggregates live in `metrics`.

mod builder;
mod metrics;
#[allow(clippy::module_inception)]
mod portfolio;

pub use builder::PortfolioBuilder;
pub use metrics::PortfolioSummary;
pub use portfolio::{Portfolio, Position};
