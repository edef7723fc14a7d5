//! Quote-based expected return estimators for equities.

use crate::asset::{Asset, Security};
use crate::error::{PortfolioError, PortfolioResult};
use crate::market::MarketData;

/// Earnings yield, `eps / price × 100`, in percent.
///
/// # Errors
///
/// Returns `InvalidQuote` if the price is zero.
pub fn equity_premium_earnings_based(security: &Security) -> PortfolioResult<f64> {
    let quote = security.quote_data();
    if quote.price == 0.0 {
        return Err(PortfolioError::invalid_quote(
            security.symbol(),
            "price is zero",
        ));
    }
    Ok(quote.eps / quote.price * 100.0)
}

/// Dividend yield plus average annual dividend growth, in percent.
pub fn equity_premium_dividend_based(
    security: &Security,
    market: &MarketData<'_>,
    years: u32,
) -> PortfolioResult<f64> {
    let history = security.history(market, years)?;
    let growth = history.average_dividend_growth_rate(market.provider())?;
    Ok(security.quote_data().dividend_yield + growth)
}
