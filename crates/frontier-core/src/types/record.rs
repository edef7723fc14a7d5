//! Raw series records delivered by a history provider.

use serde::{Deserialize, Serialize};

use super::Date;

/// One row of a price series.
///
/// Only `adjusted_close` feeds return computation; the remaining fields are
/// carried for callers that display the raw series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Observation date.
    pub date: Date,
    /// Opening price.
    pub open: f64,
    /// Period high.
    pub high: f64,
    /// Period low.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: u64,
    /// Close adjusted for splits and dividends.
    pub adjusted_close: f64,
}

impl PriceRecord {
    /// Creates a record where every price field equals `adjusted_close`.
    #[must_use]
    pub fn from_adjusted_close(date: Date, adjusted_close: f64) -> Self {
        Self {
            date,
            open: adjusted_close,
            high: adjusted_close,
            low: adjusted_close,
            close: adjusted_close,
            volume: 0,
            adjusted_close,
        }
    }
}

/// One dividend payment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DividendRecord {
    /// Payment date.
    pub date: Date,
    /// Amount per share.
    pub amount: f64,
}

impl DividendRecord {
    /// Creates a dividend record.
    #[must_use]
    pub fn new(date: Date, amount: f64) -> Self {
        Self { date, amount }
    }
}
