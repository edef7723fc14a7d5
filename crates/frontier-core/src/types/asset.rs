//! Quote attributes and asset roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known ticker symbols.
pub mod symbols {
    /// S&P 500 index, the default benchmark.
    pub const SP_500: &str = "^GSPC";
    /// Dow Jones Industrial Average.
    pub const DOW_JONES: &str = "^DJI";
    /// NASDAQ Composite.
    pub const NASDAQ: &str = "^IXIC";
    /// NASDAQ-100.
    pub const NASDAQ_100: &str = "^NDX";
    /// 10-year Treasury yield, the default risk-free proxy.
    pub const TEN_YEAR_TREASURY: &str = "^TNX";

    /// All benchmark indices, in display order.
    pub const BENCHMARKS: [&str; 4] = [SP_500, DOW_JONES, NASDAQ, NASDAQ_100];
    /// All risk-free proxies.
    pub const RISK_FREE: [&str; 1] = [TEN_YEAR_TREASURY];
}

/// The role an asset plays in an analysis.
///
/// Benchmarks and risk-free proxies are structurally ordinary securities;
/// only the risk-free role changes behavior (its annual return is the
/// current quoted yield).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetRole {
    /// An ordinary portfolio constituent.
    #[default]
    Ordinary,
    /// A market index used as the regression benchmark.
    Benchmark,
    /// A risk-free proxy whose quoted price is its yield in percent.
    RiskFree,
}

impl fmt::Display for AssetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetRole::Ordinary => "ordinary",
            AssetRole::Benchmark => "benchmark",
            AssetRole::RiskFree => "risk-free",
        };
        f.write_str(name)
    }
}

/// Static quote attributes loaded once per security.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Quote {
    /// Display name.
    pub name: String,
    /// Earnings per share.
    pub eps: f64,
    /// Current price. For a risk-free proxy this is the yield in percent.
    pub price: f64,
    /// Annual dividend per share.
    pub dividend_per_share: f64,
    /// Dividend yield in percent.
    pub dividend_yield: f64,
}

impl Quote {
    /// Creates a quote with the given name and price; other fields are zero.
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            ..Self::default()
        }
    }

    /// Sets earnings per share.
    #[must_use]
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Sets the dividend per share and the dividend yield (percent).
    #[must_use]
    pub fn with_dividends(mut self, per_share: f64, yield_pct: f64) -> Self {
        self.dividend_per_share = per_share;
        self.dividend_yield = yield_pct;
        self
    }

    /// Checks that every numeric field is finite and the price is non-negative.
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("eps", self.eps),
            ("price", self.price),
            ("dividend_per_share", self.dividend_per_share),
            ("dividend_yield", self.dividend_yield),
        ];
        if let Some((field, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("{field} is not finite ({value})"));
        }
        if self.price < 0.0 {
            return Err(format!("price is negative ({})", self.price));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_validation() {
        assert!(Quote::new("Apple", 150.0).validate().is_ok());
        assert!(Quote::new("Bad", f64::NAN).validate().is_err());
        assert!(Quote::new("Bad", -1.0).validate().is_err());
        let err = Quote::new("Bad", 1.0).with_eps(f64::INFINITY).validate();
        assert!(err.unwrap_err().contains("eps"));
    }

    #[test]
    fn test_role_default() {
        assert_eq!(AssetRole::default(), AssetRole::Ordinary);
        assert_eq!(AssetRole::RiskFree.to_string(), "risk-free");
    }

    #[test]
    fn test_well_known_symbols() {
        assert_eq!(symbols::BENCHMARKS[0], symbols::SP_500);
        assert!(symbols::RISK_FREE.contains(&"^TNX"));
    }
}
