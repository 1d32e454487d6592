//! Ordinary least squares solver.
//!
//! We solve
//!
//! ```text
//! minimize ‖X β - y‖²
//! ```
//!
//! through the SVD of `X` rather than by inverting `Xᵀ X`. Squaring the design
//! squares its condition number, and raw house features (areas in the hundreds,
//! room counts in single digits) are already poorly scaled.
//!
//! Rank is decided from the singular values with the usual floating-point
//! tolerance `max(n, p) · ε · σ_max`. With
//! `FitMethod::Exact` a rank-deficient design is an error; with
//! `FitMethod::LeastNorm` the small singular values are dropped and the
//! minimum-norm solution is returned.

use nalgebra::{DMatrix, DVector};

use crate::domain::FitMethod;
use crate::error::{RegressionError, RegressionResult};

/// Singular values at or below this count as zero.
pub fn rank_tolerance(x: &DMatrix<f64>, sigma_max: f64) -> f64 {
    let dim = x.nrows().max(x.ncols()) as f64;
    (dim * f64::EPSILON * sigma_max).max(f64::MIN_POSITIVE)
}

/// Least squares solution plus the numerical rank of the design.
#[derive(Debug, Clone)]
pub struct LeastSquares {
    pub beta: DVector<f64>,
    pub rank: usize,
}

/// Solve a least squares problem using SVD.
pub fn solve_least_squares(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    method: FitMethod,
) -> RegressionResult<LeastSquares> {
    if x.nrows() != y.len() {
        return Err(RegressionError::DimensionMismatch {
            what: "least squares right-hand side",
            expected: x.nrows(),
            found: y.len(),
        });
    }
    let p = x.ncols();

    let svd = x.clone().svd(true, true);
    let sigma_max = svd.singular_values.max();
    let tol = rank_tolerance(x, sigma_max);
    let rank = svd.rank(tol);

    if rank < p && method == FitMethod::Exact {
        return Err(RegressionError::SingularMatrix { rank, expected: p });
    }

    let beta = svd
        .solve(y, tol)
        .map_err(|_| RegressionError::SingularMatrix { rank, expected: p })?;
    if !beta.iter().all(|v| v.is_finite()) {
        return Err(RegressionError::SingularMatrix { rank, expected: p });
    }

    Ok(LeastSquares { beta, rank })
}
