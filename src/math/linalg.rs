//! Linear algebra backend for the local weighted least-squares solve.
//!
//! ## Purpose
//!
//! Each local fit reduces to the normal equations XᵀWX β = XᵀWy. This module
//! solves them with nalgebra and reports singular systems instead of
//! papering over them.
//!
//! ## Design notes
//!
//! * Cholesky factorisation of the symmetric normal matrix.
//! * Rank check on the Cholesky pivots relative to the matrix diagonal, so the
//!   test is invariant to how each polynomial column is scaled.
//! * No pseudo-inverse fallback: a rank-deficient local system is a failed fit.
//! * Generic over `FloatLinalg` types (f32 and f64) which delegate to nalgebra.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// ============================================================================
// FloatLinalg Trait
// ============================================================================

/// Helper trait to bridge generic Float types to the nalgebra backend.
pub trait FloatLinalg: Float + 'static {
    /// Solve normal equations XᵀWX β = XᵀWy; `None` if the system is singular.
    fn solve_normal(xtw_x: &[Self], xtw_y: &[Self], n_coeffs: usize) -> Option<Vec<Self>>;
}

impl FloatLinalg for f64 {
    #[inline]
    fn solve_normal(xtw_x: &[Self], xtw_y: &[Self], n_coeffs: usize) -> Option<Vec<Self>> {
        nalgebra_backend::solve_normal_equations(xtw_x, xtw_y, n_coeffs, f64::EPSILON * 1e4)
    }
}

impl FloatLinalg for f32 {
    #[inline]
    fn solve_normal(xtw_x: &[Self], xtw_y: &[Self], n_coeffs: usize) -> Option<Vec<Self>> {
        nalgebra_backend::solve_normal_equations(xtw_x, xtw_y, n_coeffs, f32::EPSILON * 1e2)
    }
}

// ============================================================================
// Nalgebra Backend Implementation
// ============================================================================

/// Nalgebra-based linear algebra operations.
pub mod nalgebra_backend {
    use super::*;
    use nalgebra::{DMatrix, DVector, RealField};

    /// Solve a symmetric positive definite system via Cholesky.
    ///
    /// Returns `None` when the factorisation fails, when any pivot falls below
    /// `rel_tol` times its diagonal entry, or when the solution is not finite.
    pub fn solve_normal_equations<T: RealField + Copy>(
        xtw_x: &[T],
        xtw_y: &[T],
        n_coeffs: usize,
        rel_tol: T,
    ) -> Option<Vec<T>> {
        let matrix = DMatrix::from_column_slice(n_coeffs, n_coeffs, xtw_x);
        let rhs = DVector::from_column_slice(xtw_y);
        let diagonal = matrix.diagonal();

        let chol = matrix.cholesky()?;
        let l = chol.l_dirty();
        for j in 0..n_coeffs {
            let pivot = l[(j, j)] * l[(j, j)];
            if pivot <= rel_tol * diagonal[j] {
                return None;
            }
        }

        let solution = chol.solve(&rhs);
        if solution.iter().all(|v| v.is_finite()) {
            Some(solution.as_slice().to_vec())
        } else {
            None
        }
    }
}
