//! Portfolio builder for fluent construction.

use crate::asset::Security;

use super::Portfolio;

/// Builder for constructing a [`Portfolio`].
///
/// # Example
///
/// ```rust
/// use frontier_core::prelude::*;
/// use frontier_portfolio::prelude::*;
///
/// let quotes = InMemoryProvider::new()
///     .with_quote("AAPL", Quote::new("Apple Inc.", 190.0))
///     .with_quote("MSFT", Quote::new("Microsoft", 420.0));
///
/// let portfolio = PortfolioBuilder::new()
///     .name("Tech")
///     .add(Security::stock("AAPL", &quotes).unwrap(), 0.6)
///     .add(Security::stock("MSFT", &quotes).unwrap(), 0.4)
///     .build();
///
/// assert_eq!(portfolio.len(), 2);
/// assert!((portfolio.total_weight() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PortfolioBuilder {
    name: Option<String>,
    positions: Vec<(Security, f64)>,
}

impl PortfolioBuilder {
    /// Creates a new portfolio builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the portfolio name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a security at the given weight.
    #[must_use]
    pub fn add(mut self, security: Security, weight: f64) -> Self {
        self.positions.push((security, weight));
        self
    }

    /// Adds several securities at weight zero.
    #[must_use]
    pub fn add_unweighted(mut self, securities: impl IntoIterator<Item = Security>) -> Self {
        self.positions
            .extend(securities.into_iter().map(|s| (s, 0.0)));
        self
    }

    /// Builds the portfolio. Later duplicates replace earlier weights.
    #[must_use]
    pub fn build(self) -> Portfolio {
        let mut portfolio = Portfolio::new(self.name.unwrap_or_else(|| "Portfolio".to_string()));
        for (security, weight) in self.positions {
            portfolio.add(security, weight);
        }
        portfolio
    }
}
