//! Historical date windows.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Date;
use crate::error::{CoreError, CoreResult};

/// An inclusive historical window `[start, end]`.
///
/// Two ranges are equal iff both endpoints are equal, which makes the range
/// usable as a cache and lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Creates a range from its endpoints.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidRange` if `start` is after `end`.
    pub fn new(start: Date, end: Date) -> CoreResult<Self> {
        if start > end {
            return Err(CoreError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// The window ending at `end` and starting `years` years earlier on the
    /// same month and day.
    pub fn trailing_years(end: Date, years: u32) -> CoreResult<Self> {
        let start = end.add_years(-(years as i32))?;
        Self::new(start, end)
    }

    /// Range start.
    #[must_use]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Range end.
    #[must_use]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Returns true if `date` falls inside the range, endpoints included.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
