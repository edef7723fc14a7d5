//! # Frontier Core
//!
//! Core types and collaborator traits for the Frontier portfolio analytics library.
//!
//! This crate provides the foundational building blocks used throughout Frontier:
//!
//! - **Types**: `Date`, `DateRange`, price and dividend records, quotes, asset roles
//! - **Providers**: Traits for the data-fetch and quote collaborators, plus an
//!   in-memory implementation for callers that already hold parsed records
//!
//! ## Design Philosophy
//!
//! - **No I/O**: Network access and file caching belong to provider implementations
//! - **Value Types**: Dates and ranges compare by value and work as cache keys
//! - **Explicit Over Implicit**: Units and ordering are part of each type's contract
//!
//! ## Example
//!
//! ```rust
//! use frontier_core::prelude::*;
//!
//! let end = Date::from_ymd(2024, 6, 28).unwrap();
//! let window = DateRange::trailing_years(end, 3).unwrap();
//! assert_eq!(window.start(), Date::from_ymd(2021, 6, 28).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]

pub mod error;
pub mod provider;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::provider::{HistoryProvider, InMemoryProvider, ProviderError, QuoteProvider};
    pub use crate::types::{
        symbols, AssetRole, Date, DateRange, DividendRecord, PriceRecord, Quote,
    };
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use provider::{HistoryProvider, InMemoryProvider, ProviderError, QuoteProvider};
pub use types::{AssetRole, Date, DateRange, DividendRecord, PriceRecord, Quote};
