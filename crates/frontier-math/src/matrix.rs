//! Dense matrix with cofactor-based determinant and inverse.
//!
//! [`Matrix`] wraps an `nalgebra::DMatrix<f64>` and exposes the small set of
//! operations the portfolio optimizers need. Every operation is
//! shape-checked and returns a new matrix; nothing mutates in place.
//!
//! # Determinant cost
//!
//! The default determinant uses closed forms up to 3×3 and recursive Laplace
//! expansion above that. This is O(n!) and is only meant for the small
//! covariance matrices of a few-dozen-asset portfolio at most; around 12×12 it
//! already takes noticeable time. Use [`DeterminantMethod::Lu`] for anything
//! larger.

use std::fmt;
use std::ops::Index;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{MathError, MathResult};
use crate::linear_algebra;

/// Default threshold below which a determinant counts as zero.
pub const DEFAULT_SINGULAR_TOLERANCE: f64 = 1e-9;

/// Order above which the cofactor determinant logs a cost warning.
const COFACTOR_WARN_ORDER: usize = 10;

/// Algorithm used for determinants and inverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeterminantMethod {
    /// Closed forms up to 3×3, Laplace expansion above.
    #[default]
    Cofactor,
    /// LU decomposition with partial pivoting.
    Lu,
}

/// A dense `rows × cols` matrix of `f64`.
///
/// # Example
///
/// ```rust
/// use frontier_math::Matrix;
///
/// let a = Matrix::from_rows(&[vec![4.0, 7.0], vec![2.0, 6.0]]).unwrap();
/// assert_eq!(a.determinant().unwrap(), 10.0);
///
/// let product = a.multiply(&a.inverse().unwrap()).unwrap();
/// assert!((product.get(0, 0).unwrap() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: DMatrix<f64>,
}

impl Matrix {
    /// A `rows × cols` matrix of zeros.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0.0)
    }

    /// A `rows × cols` matrix with every element equal to `value`.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        assert!(
            rows > 0 && cols > 0,
            "matrix dimensions must be non-zero, got {rows}x{cols}"
        );
        Self {
            data: DMatrix::from_element(rows, cols, value),
        }
    }

    /// The `n × n` identity matrix.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        assert!(n > 0, "identity matrix order must be non-zero");
        Self {
            data: DMatrix::identity(n, n),
        }
    }

    /// Builds a matrix from row vectors.
    ///
    /// Fails with `InvalidInput` if there are no rows, a row is empty, or the
    /// rows are ragged.
    pub fn from_rows(rows: &[Vec<f64>]) -> MathResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.is_empty() || cols == 0 {
            return Err(MathError::invalid_input("matrix must have at least one row and column"));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(MathError::invalid_input(format!(
                "row {i} has {} elements, expected {cols}",
                row.len()
            )));
        }

        Ok(Self {
            data: DMatrix::from_fn(rows.len(), cols, |r, c| rows[r][c]),
        })
    }

    /// A `1 × n` row vector.
    pub fn row_vector(values: &[f64]) -> MathResult<Self> {
        if values.is_empty() {
            return Err(MathError::invalid_input("vector must not be empty"));
        }
        Ok(Self {
            data: DMatrix::from_row_slice(1, values.len(), values),
        })
    }

    /// An `n × 1` column vector.
    pub fn column_vector(values: &[f64]) -> MathResult<Self> {
        if values.is_empty() {
            return Err(MathError::invalid_input("vector must not be empty"));
        }
        Ok(Self {
            data: DMatrix::from_column_slice(values.len(), 1, values),
        })
    }

    /// Wraps an existing `nalgebra` matrix.
    pub fn from_dmatrix(data: DMatrix<f64>) -> MathResult<Self> {
        if data.is_empty() {
            return Err(MathError::invalid_input("matrix must have at least one row and column"));
        }
        Ok(Self { data })
    }

    /// Borrows the underlying `nalgebra` matrix.
    #[must_use]
    pub fn as_dmatrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Returns `(rows, cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    /// Returns true if rows equal columns.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Element at `(row, col)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    /// Copy of row `row`.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<Vec<f64>> {
        (row < self.rows()).then(|| self.data.row(row).iter().copied().collect())
    }

    /// Copy of column `col`.
    #[must_use]
    pub fn column(&self, col: usize) -> Option<Vec<f64>> {
        (col < self.cols()).then(|| self.data.column(col).iter().copied().collect())
    }

    /// The single entry of a 1×1 matrix.
    pub fn scalar(&self) -> MathResult<f64> {
        if self.shape() != (1, 1) {
            return Err(MathError::dimension_mismatch(self.shape(), (1, 1)));
        }
        Ok(self.data[(0, 0)])
    }

    /// Row-major copy of the elements.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows())
            .map(|r| self.data.row(r).iter().copied().collect())
            .collect()
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// Element-wise sum.
    pub fn add(&self, other: &Matrix) -> MathResult<Matrix> {
        self.check_same_shape(other)?;
        Ok(Self {
            data: &self.data + &other.data,
        })
    }

    /// Adds `value` to every element.
    #[must_use]
    pub fn add_scalar(&self, value: f64) -> Matrix {
        Self {
            data: self.data.add_scalar(value),
        }
    }

    /// Element-wise difference.
    pub fn subtract(&self, other: &Matrix) -> MathResult<Matrix> {
        self.check_same_shape(other)?;
        Ok(Self {
            data: &self.data - &other.data,
        })
    }

    /// Subtracts `value` from every element.
    #[must_use]
    pub fn subtract_scalar(&self, value: f64) -> Matrix {
        Self {
            data: self.data.add_scalar(-value),
        }
    }

    /// Matrix product `self · other`.
    pub fn multiply(&self, other: &Matrix) -> MathResult<Matrix> {
        if self.cols() != other.rows() {
            return Err(MathError::dimension_mismatch(self.shape(), other.shape()));
        }
        Ok(Self {
            data: &self.data * &other.data,
        })
    }

    /// Multiplies every element by `value`.
    #[must_use]
    pub fn scale(&self, value: f64) -> Matrix {
        Self {
            data: &self.data * value,
        }
    }

    /// Divides every element by `value`.
    pub fn divide(&self, value: f64) -> MathResult<Matrix> {
        if value == 0.0 {
            return Err(MathError::DivisionByZero { value });
        }
        Ok(Self {
            data: &self.data / value,
        })
    }

    /// Repeated self-multiplication, `n ≥ 1`.
    pub fn power(&self, n: u32) -> MathResult<Matrix> {
        self.check_square()?;
        if n == 0 {
            return Err(MathError::invalid_input("matrix power must be at least 1"));
        }
        let mut result = self.clone();
        for _ in 1..n {
            result = result.multiply(self)?;
        }
        Ok(result)
    }

    /// Swaps rows and columns.
    #[must_use]
    pub fn transpose(&self) -> Matrix {
        Self {
            data: self.data.transpose(),
        }
    }

    /// Copy with row `row` replaced by `values`.
    pub fn replace_row(&self, row: usize, values: &[f64]) -> MathResult<Matrix> {
        if values.len() != self.cols() {
            return Err(MathError::dimension_mismatch(self.shape(), (1, values.len())));
        }
        if row >= self.rows() {
            return Err(MathError::invalid_input(format!(
                "row {row} out of range for {} rows",
                self.rows()
            )));
        }
        let mut data = self.data.clone();
        for (col, value) in values.iter().enumerate() {
            data[(row, col)] = *value;
        }
        Ok(Self { data })
    }

    /// Copy with column `col` replaced by `values`.
    pub fn replace_column(&self, col: usize, values: &[f64]) -> MathResult<Matrix> {
        if values.len() != self.rows() {
            return Err(MathError::dimension_mismatch(self.shape(), (values.len(), 1)));
        }
        if col >= self.cols() {
            return Err(MathError::invalid_input(format!(
                "column {col} out of range for {} columns",
                self.cols()
            )));
        }
        let mut data = self.data.clone();
        for (row, value) in values.iter().enumerate() {
            data[(row, col)] = *value;
        }
        Ok(Self { data })
    }

    // =========================================================================
    // Determinant and inverse
    // =========================================================================

    /// Determinant by cofactor expansion.
    pub fn determinant(&self) -> MathResult<f64> {
        self.determinant_with(DeterminantMethod::Cofactor)
    }

    /// Determinant using the chosen algorithm.
    pub fn determinant_with(&self, method: DeterminantMethod) -> MathResult<f64> {
        self.check_square()?;
        match method {
            DeterminantMethod::Cofactor => {
                if self.rows() > COFACTOR_WARN_ORDER {
                    warn!(
                        order = self.rows(),
                        "cofactor determinant is factorial in the matrix order"
                    );
                }
                Ok(cofactor_determinant(&self.data))
            }
            DeterminantMethod::Lu => linear_algebra::lu_determinant(&self.data),
        }
    }

    /// Matrix of signed minors: cell `(r, c)` is `(-1)^(r+c) · det(minor(r, c))`.
    pub fn cofactor_matrix(&self) -> MathResult<Matrix> {
        self.check_square()?;
        let n = self.rows();
        if n == 1 {
            return Ok(Self::identity(1));
        }

        let data = DMatrix::from_fn(n, n, |r, c| {
            let sign = if (r + c) % 2 == 0 { 1.0 } else { -1.0 };
            sign * cofactor_determinant(&minor(&self.data, r, c))
        });
        Ok(Self { data })
    }

    /// Inverse as `transpose(cofactors) / det`, with the default tolerance.
    pub fn inverse(&self) -> MathResult<Matrix> {
        self.inverse_with_tolerance(DEFAULT_SINGULAR_TOLERANCE)
    }

    /// Cofactor inverse; fails with `SingularMatrix` when `|det| < tolerance`.
    pub fn inverse_with_tolerance(&self, tolerance: f64) -> MathResult<Matrix> {
        self.inverse_with(DeterminantMethod::Cofactor, tolerance)
    }

    /// Inverse using the chosen algorithm.
    ///
    /// Both algorithms reject matrices whose determinant is below `tolerance`
    /// in absolute value.
    pub fn inverse_with(&self, method: DeterminantMethod, tolerance: f64) -> MathResult<Matrix> {
        let det = self.determinant_with(method)?;
        if det.abs() < tolerance {
            return Err(MathError::SingularMatrix);
        }

        match method {
            DeterminantMethod::Cofactor => self.cofactor_matrix()?.transpose().divide(det),
            DeterminantMethod::Lu => Ok(Self {
                data: linear_algebra::lu_inverse(&self.data)?,
            }),
        }
    }

    fn check_square(&self) -> MathResult<()> {
        if !self.is_square() {
            return Err(MathError::NotSquare {
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(())
    }

    fn check_same_shape(&self, other: &Matrix) -> MathResult<()> {
        if self.shape() != other.shape() {
            return Err(MathError::dimension_mismatch(self.shape(), other.shape()));
        }
        Ok(())
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[index]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows() {
            let row: Vec<String> = self.data.row(r).iter().map(|v| v.to_string()).collect();
            writeln!(f, "[{}]", row.join(", "))?;
        }
        Ok(())
    }
}

/// Copy of `m` without row `row` and column `col`.
fn minor(m: &DMatrix<f64>, row: usize, col: usize) -> DMatrix<f64> {
    m.clone().remove_row(row).remove_column(col)
}

/// Cofactor determinant of a square, non-empty matrix.
fn cofactor_determinant(m: &DMatrix<f64>) -> f64 {
    match m.nrows() {
        0 => 1.0,
        1 => m[(0, 0)],
        2 => m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
        3 => {
            m[(0, 0)] * m[(1, 1)] * m[(2, 2)]
                + m[(0, 1)] * m[(1, 2)] * m[(2, 0)]
                + m[(0, 2)] * m[(1, 0)] * m[(2, 1)]
                - m[(0, 0)] * m[(1, 2)] * m[(2, 1)]
                - m[(0, 1)] * m[(1, 0)] * m[(2, 2)]
                - m[(0, 2)] * m[(1, 1)] * m[(2, 0)]
        }
        n => (0..n)
            .filter(|&col| m[(0, col)] != 0.0)
            .map(|col| {
                let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
                sign * m[(0, col)] * cofactor_determinant(&minor(m, 0, col))
            })
            .sum(),
    }
}
