//! Kernel (weight) functions for LOWESS estimation.
//!
//! ## Purpose
//!
//! This module provides the kernels that turn a normalized distance
//! `u = ‖x - q‖ / bandwidth` into the weight a training point receives in the
//! local fit at query point `q`.
//!
//! ## Design notes
//!
//! * **Capability, not hierarchy**: Any type implementing [`Kernel`] can be used,
//!   including plain closures `Fn(T) -> T`.
//! * **Compact support**: The estimator zeroes every weight with `u >= 1`
//!   itself, so custom kernels only need to be meaningful on `[0, 1)`.
//!
//! ## Key concepts
//!
//! * **Epanechnikov**: `1 - u²`, the default.
//! * **Tricube**: `(1 - u³)³`, Cleveland's original choice.
//!
//! ## Invariants
//!
//! * Built-in kernels are non-negative, non-increasing on `[0, 1)` and exactly
//!   zero for `u >= 1`.
//!
//! ## Non-goals
//!
//! * This module does not normalize weights to sum to one.
//! * This module does not choose the bandwidth.

// External dependencies
use core::f64::consts::FRAC_PI_2;
use num_traits::Float;

// ============================================================================
// Kernel Trait
// ============================================================================

/// A distance-decaying weight function with support on `[0, 1)`.
pub trait Kernel<T> {
    /// Weight for a normalized distance `u >= 0`.
    fn weight(&self, u: T) -> T;
}

impl<T: Float, F> Kernel<T> for F
where
    F: Fn(T) -> T,
{
    #[inline]
    fn weight(&self, u: T) -> T {
        self(u)
    }
}

// ============================================================================
// Weight Function Enum
// ============================================================================

/// Built-in compact-support kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightFunction {
    /// Epanechnikov kernel: K(u) = 1 - u² for u < 1.
    #[default]
    Epanechnikov,

    /// Tricube kernel: K(u) = (1 - u³)³ for u < 1.
    Tricube,

    /// Biweight (quartic) kernel: K(u) = (1 - u²)² for u < 1.
    Biweight,

    /// Triangular kernel: K(u) = 1 - u for u < 1.
    Triangle,

    /// Cosine kernel: K(u) = cos(πu/2) for u < 1.
    Cosine,

    /// Uniform kernel: K(u) = 1 for u < 1.
    Uniform,
}

impl WeightFunction {
    /// Get the name of the weight function.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            WeightFunction::Epanechnikov => "Epanechnikov",
            WeightFunction::Tricube => "Tricube",
            WeightFunction::Biweight => "Biweight",
            WeightFunction::Triangle => "Triangle",
            WeightFunction::Cosine => "Cosine",
            WeightFunction::Uniform => "Uniform",
        }
    }

    /// Compute the unnormalized weight K(u) for a normalized distance.
    #[inline]
    pub fn compute_weight<T: Float>(&self, u: T) -> T {
        let abs_u = u.abs();
        if abs_u >= T::one() {
            return T::zero();
        }

        match self {
            WeightFunction::Epanechnikov => T::one() - abs_u * abs_u,

            WeightFunction::Tricube => {
                let tmp = T::one() - abs_u * abs_u * abs_u;
                tmp * tmp * tmp
            }

            WeightFunction::Biweight => {
                let tmp = T::one() - abs_u * abs_u;
                tmp * tmp
            }

            WeightFunction::Triangle => T::one() - abs_u,

            WeightFunction::Cosine => {
                let half_pi = T::from(FRAC_PI_2).unwrap_or_else(T::one);
                (half_pi * abs_u).cos()
            }

            WeightFunction::Uniform => T::one(),
        }
    }
}

impl<T: Float> Kernel<T> for WeightFunction {
    #[inline]
    fn weight(&self, u: T) -> T {
        self.compute_weight(u)
    }
}

// ============================================================================
// Free Functions
// ============================================================================

/// Epanechnikov kernel as a plain function.
#[inline]
pub fn epanechnikov<T: Float>(u: T) -> T {
    WeightFunction::Epanechnikov.compute_weight(u)
}

/// Tricube kernel as a plain function.
#[inline]
pub fn tricube<T: Float>(u: T) -> T {
    WeightFunction::Tricube.compute_weight(u)
}
