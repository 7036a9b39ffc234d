//! Shape-aware solution of the equilibrium system.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::errors::SolveError;

/// How a system is solved, chosen from the matrix shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Square system, solved directly by LU decomposition.
    Direct,
    /// More unknowns than equations; the exact solution of least norm.
    MinimumNorm,
    /// More equations than unknowns; the solution of least squared residual.
    LeastSquares,
}

impl Strategy {
    /// Pick the strategy for a matrix of `rows` equations and `columns` unknowns.
    ///
    /// # Examples
    /// ```
    /// use trussopt::Strategy;
    ///
    /// assert_eq!(Strategy::for_shape(6, 6), Strategy::Direct);
    /// assert_eq!(Strategy::for_shape(6, 7), Strategy::MinimumNorm);
    /// assert_eq!(Strategy::for_shape(6, 5), Strategy::LeastSquares);
    /// ```
    #[must_use]
    pub fn for_shape(rows: usize, columns: usize) -> Self {
        match columns.cmp(&rows) {
            std::cmp::Ordering::Equal => Strategy::Direct,
            std::cmp::Ordering::Greater => Strategy::MinimumNorm,
            std::cmp::Ordering::Less => Strategy::LeastSquares,
        }
    }
}

/// Solve `matrix * x = load` for `x` using the strategy implied by the matrix shape.
///
/// # Errors
///
/// Returns [`SolveError::EmptySystem`] when the matrix has no rows or no columns,
/// [`SolveError::DimensionMismatch`] when `load` does not match the matrix height and
/// [`SolveError::Singular`] when the required factorisation or inverse does not exist.
///
/// # Examples
/// ```
/// use nalgebra::{DMatrix, DVector};
/// use trussopt::solve;
///
/// let matrix = DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 4.0]);
/// let load = DVector::from_column_slice(&[2.0, 2.0]);
/// let x = solve(&matrix, &load).expect("square system solves");
/// assert_eq!(x.as_slice(), &[1.0, 0.5]);
/// ```
pub fn solve(matrix: &DMatrix<f64>, load: &DVector<f64>) -> Result<DVector<f64>, SolveError> {
    let (rows, columns) = matrix.shape();
    if rows == 0 || columns == 0 {
        return Err(SolveError::EmptySystem { rows, columns });
    }
    if load.len() != rows {
        return Err(SolveError::DimensionMismatch {
            rows,
            load: load.len(),
        });
    }
    match Strategy::for_shape(rows, columns) {
        Strategy::Direct => direct_solve(matrix, load),
        Strategy::MinimumNorm => minimum_norm_solve(matrix, load),
        Strategy::LeastSquares => least_squares_solve(matrix, load),
    }
}

/// LU solve of a square system.
fn direct_solve(matrix: &DMatrix<f64>, load: &DVector<f64>) -> Result<DVector<f64>, SolveError> {
    matrix.clone().lu().solve(load).ok_or(SolveError::Singular)
}

/// `Aᵗ (A Aᵗ)⁻¹ b`, computed with an LU solve against the Gram matrix.
fn minimum_norm_solve(
    matrix: &DMatrix<f64>,
    load: &DVector<f64>,
) -> Result<DVector<f64>, SolveError> {
    let transpose = matrix.transpose();
    let gram = matrix * &transpose;
    let weights = gram.lu().solve(load).ok_or(SolveError::Singular)?;
    Ok(transpose * weights)
}

/// `(Aᵗ A)⁻¹ Aᵗ b` through the normal equations.
fn least_squares_solve(
    matrix: &DMatrix<f64>,
    load: &DVector<f64>,
) -> Result<DVector<f64>, SolveError> {
    let transpose = matrix.transpose();
    let normal_inverse = (&transpose * matrix)
        .try_inverse()
        .ok_or(SolveError::Singular)?;
    Ok(normal_inverse * (transpose * load))
}

/// Largest absolute entry of `matrix * solution - load`.
#[must_use]
pub fn residual(matrix: &DMatrix<f64>, solution: &DVector<f64>, load: &DVector<f64>) -> f64 {
    (matrix * solution - load)
        .iter()
        .fold(0.0, |worst: f64, entry| worst.max(entry.abs()))
}
