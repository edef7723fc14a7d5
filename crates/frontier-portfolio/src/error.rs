//! Error types for asset and portfolio analytics.

use frontier_core::CoreError;
use frontier_math::MathError;
use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during asset and portfolio analytics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// A requested series or quote could not be fetched.
    #[error("Data unavailable for {symbol}: {reason}")]
    DataUnavailable {
        /// The affected symbol.
        symbol: String,
        /// What the provider reported.
        reason: String,
    },

    /// Too few periods to compute a dispersion statistic.
    #[error("Insufficient history for {symbol}: need at least {required} periods, got {actual}")]
    InsufficientHistory {
        /// The affected symbol.
        symbol: String,
        /// Minimum number of periods required.
        required: usize,
        /// Periods actually available.
        actual: usize,
    },

    /// The covariance system has no unique solution.
    #[error("Covariance matrix is singular")]
    SingularCovariance,

    /// Operation needs at least one asset.
    #[error("Portfolio has no assets")]
    EmptyPortfolio,

    /// Quote attributes are missing or malformed.
    #[error("Invalid quote for {symbol}: {reason}")]
    InvalidQuote {
        /// The affected symbol.
        symbol: String,
        /// The problem found.
        reason: String,
    },

    /// Configuration could not be parsed or failed validation.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of the problem.
        reason: String,
    },

    /// Underlying numerical failure.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Invalid date or range.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl PortfolioError {
    /// Creates a data unavailable error.
    #[must_use]
    pub fn data_unavailable(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Creates an insufficient history error.
    #[must_use]
    pub fn insufficient_history(symbol: impl Into<String>, required: usize, actual: usize) -> Self {
        Self::InsufficientHistory {
            symbol: symbol.into(),
            required,
            actual,
        }
    }

    /// Creates an invalid quote error.
    #[must_use]
    pub fn invalid_quote(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidQuote {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Maps a singular-matrix failure onto [`PortfolioError::SingularCovariance`].
    #[must_use]
    pub fn from_covariance_solve(err: MathError) -> Self {
        match err {
            MathError::SingularMatrix => Self::SingularCovariance,
            other => Self::Math(other),
        }
    }
}
