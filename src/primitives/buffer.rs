//! Scratch buffers for local regression fits.
//!
//! ## Purpose
//!
//! Every query point needs the same set of temporaries: a weight per training
//! point, a row of polynomial terms, and the normal equations. This module
//! bundles them in a `FittingBuffer` that is allocated once per worker and
//! reused for every query point that worker fits.
//!
//! ## Design notes
//!
//! * **Reuse, not sharing**: One buffer per thread; no buffer is ever shared.
//! * **Reset on use**: Contents from a previous query point are always
//!   overwritten before being read, so fits stay independent.
//!
//! ## Invariants
//!
//! * `base_weights`, `weights`, `residuals` and `scratch` hold one entry per training point.
//! * `xtw_x` is `n_coeffs * n_coeffs`, `xtw_y` and `terms` are `n_coeffs`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

/// Per-worker temporaries for fitting one query point at a time.
#[derive(Debug, Clone)]
pub struct FittingBuffer<T> {
    /// Kernel weights for each training point.
    pub base_weights: Vec<T>,
    /// Weights used in the current solve (kernel times robustness).
    pub weights: Vec<T>,
    /// Local residuals for the robust pass.
    pub residuals: Vec<T>,
    /// Scratch space for median selection.
    pub scratch: Vec<T>,
    /// Polynomial terms of one training point.
    pub terms: Vec<T>,
    /// Coordinates of one training point relative to the query point.
    pub delta: Vec<T>,
    /// Normal matrix XᵀWX (row-major, symmetric).
    pub xtw_x: Vec<T>,
    /// Normal vector XᵀWy.
    pub xtw_y: Vec<T>,
}

impl<T: Float> FittingBuffer<T> {
    /// Allocate buffers for `n` training points in `dims` dimensions with `n_coeffs` terms.
    pub fn new(n: usize, dims: usize, n_coeffs: usize) -> Self {
        Self {
            base_weights: vec![T::zero(); n],
            weights: vec![T::zero(); n],
            residuals: vec![T::zero(); n],
            scratch: Vec::with_capacity(n),
            terms: vec![T::zero(); n_coeffs],
            delta: vec![T::zero(); dims],
            xtw_x: vec![T::zero(); n_coeffs * n_coeffs],
            xtw_y: vec![T::zero(); n_coeffs],
        }
    }

    /// Zero the normal equations before accumulating a new system.
    #[inline]
    pub fn reset_normal_equations(&mut self) {
        self.xtw_x.fill(T::zero());
        self.xtw_y.fill(T::zero());
    }
}
