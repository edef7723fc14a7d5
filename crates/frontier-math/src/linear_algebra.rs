//! LU-based linear algebra.
//!
//! Cubic-time alternatives to the cofactor expansion used by
//! [`Matrix`](crate::Matrix). Results agree with the cofactor method up to
//! rounding; the two can differ in the last few digits.

use crate::error::{MathError, MathResult};
use nalgebra::{DMatrix, DVector};

/// Pivots smaller than this are treated as zero.
const PIVOT_EPSILON: f64 = 1e-15;

/// Result of an LU decomposition with partial pivoting: `P·A = L·U`.
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    /// Unit lower-triangular factor.
    pub l: DMatrix<f64>,
    /// Upper-triangular factor.
    pub u: DMatrix<f64>,
    /// Row permutation: row `i` of `P·A` is row `permutation[i]` of `A`.
    pub permutation: Vec<usize>,
    /// Number of row swaps performed.
    pub swaps: usize,
}

impl LuDecomposition {
    /// Determinant of the decomposed matrix.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        let sign = if self.swaps % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.u.diagonal().iter().product::<f64>()
    }

    /// Solves `A·x = b` using the stored factors.
    pub fn solve(&self, b: &DVector<f64>) -> MathResult<DVector<f64>> {
        let n = self.u.nrows();
        if n != b.len() {
            return Err(MathError::dimension_mismatch((n, n), (b.len(), 1)));
        }

        // Solve Ly = Pb (forward substitution)
        let mut y = DVector::zeros(n);
        for i in 0..n {
            let mut sum = b[self.permutation[i]];
            for j in 0..i {
                sum -= self.l[(i, j)] * y[j];
            }
            y[i] = sum;
        }

        // Solve Ux = y (back substitution)
        let mut x = DVector::zeros(n);
        for i in (0..n).rev() {
            let mut sum = y[i];
            for j in i + 1..n {
                sum -= self.u[(i, j)] * x[j];
            }
            if self.u[(i, i)].abs() < PIVOT_EPSILON {
                return Err(MathError::SingularMatrix);
            }
            x[i] = sum / self.u[(i, i)];
        }

        Ok(x)
    }
}

/// Performs LU decomposition with partial pivoting.
///
/// Returns `SingularMatrix` when a column has no usable pivot.
pub fn lu_decomposition(matrix: &DMatrix<f64>) -> MathResult<LuDecomposition> {
    let n = matrix.nrows();
    if n != matrix.ncols() {
        return Err(MathError::NotSquare {
            rows: n,
            cols: matrix.ncols(),
        });
    }

    let mut l = DMatrix::identity(n, n);
    let mut u = matrix.clone();
    let mut permutation: Vec<usize> = (0..n).collect();
    let mut swaps = 0;

    for k in 0..n {
        let pivot_row = (k..n)
            .max_by(|&a, &b| u[(a, k)].abs().total_cmp(&u[(b, k)].abs()))
            .unwrap_or(k);

        if u[(pivot_row, k)].abs() < PIVOT_EPSILON {
            return Err(MathError::SingularMatrix);
        }

        if pivot_row != k {
            u.swap_rows(k, pivot_row);
            permutation.swap(k, pivot_row);
            for j in 0..k {
                let tmp = l[(k, j)];
                l[(k, j)] = l[(pivot_row, j)];
                l[(pivot_row, j)] = tmp;
            }
            swaps += 1;
        }

        for i in k + 1..n {
            let factor = u[(i, k)] / u[(k, k)];
            l[(i, k)] = factor;

            for j in k..n {
                u[(i, j)] -= factor * u[(k, j)];
            }
        }
    }

    Ok(LuDecomposition {
        l,
        u,
        permutation,
        swaps,
    })
}

/// Determinant via LU decomposition.
///
/// A matrix without a usable pivot has determinant zero.
pub fn lu_determinant(matrix: &DMatrix<f64>) -> MathResult<f64> {
    match lu_decomposition(matrix) {
        Ok(lu) => Ok(lu.determinant()),
        Err(MathError::SingularMatrix) => Ok(0.0),
        Err(e) => Err(e),
    }
}

/// Inverse via LU decomposition, one column solve per unit vector.
pub fn lu_inverse(matrix: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
    let lu = lu_decomposition(matrix)?;
    let n = matrix.nrows();
    let mut inverse = DMatrix::zeros(n, n);

    for j in 0..n {
        let mut e = DVector::zeros(n);
        e[j] = 1.0;
        let column = lu.solve(&e)?;
        inverse.set_column(j, &column);
    }

    Ok(inverse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lu_decomposition() {
        let a = DMatrix::from_row_slice(3, 3, &[2.0, 1.0, 1.0, 4.0, 3.0, 3.0, 8.0, 7.0, 9.0]);

        let lu = lu_decomposition(&a).unwrap();

        // Verify L * U = P * A
        let product = &lu.l * &lu.u;
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(product[(i, j)], a[(lu.permutation[i], j)], epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_lu_needs_pivot() {
        // Zero in the leading position would break elimination without pivoting
        let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        assert_relative_eq!(lu_determinant(&a).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lu_determinant_singular_is_zero() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        assert_eq!(lu_determinant(&a).unwrap(), 0.0);
        assert!(matches!(lu_inverse(&a), Err(MathError::SingularMatrix)));
    }

    #[test]
    fn test_lu_inverse() {
        let a = DMatrix::from_row_slice(2, 2, &[4.0, 7.0, 2.0, 6.0]);
        let inv = lu_inverse(&a).unwrap();
        assert_relative_eq!(inv[(0, 0)], 0.6, epsilon = 1e-12);
        assert_relative_eq!(inv[(0, 1)], -0.7, epsilon = 1e-12);
        assert_relative_eq!(inv[(1, 0)], -0.2, epsilon = 1e-12);
        assert_relative_eq!(inv[(1, 1)], 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_lu_solve() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![5.0, 5.0]);

        let x = lu_decomposition(&a).unwrap().solve(&b).unwrap();

        assert_relative_eq!(x[0], 2.0, epsilon = 1e-10);
        assert_relative_eq!(x[1], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_not_square() {
        let a = DMatrix::from_row_slice(2, 3, &[1.0; 6]);
        assert!(matches!(
            lu_decomposition(&a),
            Err(MathError::NotSquare { rows: 2, cols: 3 })
        ));
    }
}
