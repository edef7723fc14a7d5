//! Domain types for portfolio analytics.
//!
//! - [`Date`] / [`DateRange`]: Calendar dates and historical windows
//! - [`PriceRecord`] / [`DividendRecord`]: Raw series rows from a data provider
//! - [`Quote`]: Static quote attributes of a security
//! - [`AssetRole`]: Role tag distinguishing ordinary, benchmark and risk-free assets

mod asset;
mod date;
mod range;
mod record;

pub use asset::{symbols, AssetRole, Quote};
pub use date::Date;
pub use range::DateRange;
pub use record::{DividendRecord, PriceRecord};
