//! Portfolio struct and membership operations.

use crate::asset::{Asset, Security};

/// A security held at a weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// The held security.
    pub security: Security,
    /// Portfolio weight. Unconstrained: may be negative or exceed 1.
    pub weight: f64,
}

/// An ordered, weighted collection of securities.
///
/// Each symbol appears at most once. Insertion order is preserved and fixes
/// the row order of every matrix built from the portfolio.
#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    name: String,
    positions: Vec<Position>,
}

impl Portfolio {
    /// Creates an empty portfolio.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positions: Vec::new(),
        }
    }

    /// Creates a new portfolio builder.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> super::PortfolioBuilder {
        super::PortfolioBuilder::new().name(name)
    }

    /// Portfolio name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a security, or replaces its weight in place if already held.
    pub fn add(&mut self, security: Security, weight: f64) {
        match self.position_mut(security.symbol()) {
            Some(position) => position.weight = weight,
            None => self.positions.push(Position { security, weight }),
        }
    }

    /// Adds a security at weight zero.
    pub fn add_unweighted(&mut self, security: Security) {
        self.add(security, 0.0);
    }

    /// Removes a security, returning its position if it was held.
    pub fn remove(&mut self, symbol: &str) -> Option<Position> {
        let symbol = symbol.trim().to_uppercase();
        let index = self
            .positions
            .iter()
            .position(|p| p.security.symbol() == symbol)?;
        Some(self.positions.remove(index))
    }

    /// Sets the weight of a held security. Returns false if it is not held.
    pub fn set_weight(&mut self, symbol: &str, weight: f64) -> bool {
        match self.position_mut(symbol) {
            Some(position) => {
                position.weight = weight;
                true
            }
            None => false,
        }
    }

    /// Weight of a held security.
    #[must_use]
    pub fn weight(&self, symbol: &str) -> Option<f64> {
        let symbol = symbol.trim().to_uppercase();
        self.positions
            .iter()
            .find(|p| p.security.symbol() == symbol)
            .map(|p| p.weight)
    }

    /// `(symbol, weight)` pairs in insertion order.
    #[must_use]
    pub fn weights(&self) -> Vec<(&str, f64)> {
        self.positions
            .iter()
            .map(|p| (p.security.symbol(), p.weight))
            .collect()
    }

    /// Held securities in insertion order.
    pub fn securities(&self) -> impl Iterator<Item = &Security> {
        self.positions.iter().map(|p| &p.security)
    }

    /// Positions in insertion order.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Number of securities held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.positions.iter().map(|p| p.weight).sum()
    }

    pub(crate) fn replace_weights(&mut self, weights: &[f64]) {
        for (position, &weight) in self.positions.iter_mut().zip(weights) {
            position.weight = weight;
        }
    }

    fn position_mut(&mut self, symbol: &str) -> Option<&mut Position> {
        let symbol = symbol.trim().to_uppercase();
        self.positions
            .iter_mut()
            .find(|p| p.security.symbol() == symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontier_core::{AssetRole, Quote};

    fn security(symbol: &str) -> Security {
        Security::new(symbol, AssetRole::Ordinary, Quote::new(symbol, 100.0)).unwrap()
    }

    #[test]
    fn test_add_preserves_order() {
        let mut portfolio = Portfolio::new("Growth");
        portfolio.add(security("MSFT"), 0.3);
        portfolio.add(security("AAPL"), 0.5);
        portfolio.add(security("GOOG"), 0.2);

        let symbols: Vec<&str> = portfolio.securities().map(|s| s.symbol()).collect();
        assert_eq!(symbols, vec!["MSFT", "AAPL", "GOOG"]);
        assert_eq!(portfolio.name(), "Growth");
    }

    #[test]
    fn test_re_add_replaces_in_place() {
        let mut portfolio = Portfolio::new("Growth");
        portfolio.add(security("MSFT"), 0.3);
        portfolio.add(security("AAPL"), 0.5);
        portfolio.add(security("msft"), 0.7);

        assert_eq!(portfolio.len(), 2);
        assert_eq!(portfolio.weights(), vec![("MSFT", 0.7), ("AAPL", 0.5)]);
    }

    #[test]
    fn test_set_weight() {
        let mut portfolio = Portfolio::new("Growth");
        portfolio.add_unweighted(security("AAPL"));
        assert_eq!(portfolio.weight("AAPL"), Some(0.0));

        assert!(portfolio.set_weight("aapl", 1.5));
        assert_eq!(portfolio.weight("AAPL"), Some(1.5));
        assert!(!portfolio.set_weight("MSFT", 1.0));
        assert_eq!(portfolio.weight("MSFT"), None);
    }

    #[test]
    fn test_remove() {
        let mut portfolio = Portfolio::new("Growth");
        portfolio.add(security("MSFT"), 0.4);
        portfolio.add(security("AAPL"), 0.6);

        let removed = portfolio.remove("msft").unwrap();
        assert_eq!(removed.weight, 0.4);
        assert!(portfolio.remove("MSFT").is_none());
        assert_eq!(portfolio.len(), 1);
        assert_eq!(portfolio.total_weight(), 0.6);
    }

    #[test]
    fn test_empty() {
        let portfolio = Portfolio::new("Empty");
        assert!(portfolio.is_empty());
        assert_eq!(portfolio.total_weight(), 0.0);
        assert!(portfolio.weights().is_empty());
    }
}
