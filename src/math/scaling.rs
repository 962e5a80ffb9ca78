//! Residual scale estimation for robustness weighting.
//!
//! ## Purpose
//!
//! Robustness weights compare each residual to a typical residual size. This
//! module selects how that size is estimated.
//!
//! ## Key concepts
//!
//! * **MAR**: median |rᵢ|, Cleveland's choice for LOWESS (default).
//! * **MAD**: median |rᵢ - median(r)|, insensitive to a constant offset in the residuals.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::mad::{compute_mad, compute_mar};

/// Robust scale estimator for residuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::upper_case_acronyms)]
pub enum ScalingMethod {
    /// Median absolute residual.
    #[default]
    MAR,

    /// Median absolute deviation.
    MAD,
}

impl ScalingMethod {
    /// Compute the scale of `vals` in place (the slice is overwritten).
    #[inline]
    pub fn compute<T: Float>(&self, vals: &mut [T]) -> T {
        match self {
            Self::MAR => compute_mar(vals),
            Self::MAD => compute_mad(vals),
        }
    }
}
