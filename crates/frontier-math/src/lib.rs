//! # Frontier Math
//!
//! Numerical building blocks for the Frontier portfolio analytics library.
//!
//! This crate provides:
//!
//! - **Matrix**: Dense matrix with shape-checked arithmetic, cofactor
//!   determinant, inverse, and row/column substitution
//! - **Linear Algebra**: Partial-pivot LU decomposition for larger systems
//! - **Statistics**: Population moments, covariance, compounded averages,
//!   rate conversions and combinations
//! - **Regression**: Simple (univariate) OLS quantities
//!
//! ## Conventions
//!
//! - Variance and covariance are **population** statistics (divide by N)
//! - Rates are percentages: `5.0` means 5%
//! - Every operation that could divide by zero or mismatch shapes returns a
//!   [`MathError`] instead of NaN

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]

pub mod error;
pub mod linear_algebra;
pub mod matrix;
pub mod regression;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::matrix::{DeterminantMethod, Matrix, DEFAULT_SINGULAR_TOLERANCE};
    pub use crate::regression;
    pub use crate::statistics;
}

pub use error::{MathError, MathResult};
pub use matrix::{DeterminantMethod, Matrix};
