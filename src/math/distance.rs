//! Distance metrics between D-dimensional points.
//!
//! ## Purpose
//!
//! The local fit at a query point weights every training point by its
//! distance to the query. This module computes that distance.
//!
//! ## Design notes
//!
//! * **Decoupling**: Distance is computed here, bandwidth scaling and kernel
//!   evaluation happen in the regression layer.
//! * **Default**: Euclidean distance, which makes the neighborhood a ball.
//!
//! ## Invariants
//!
//! * Distance is always non-negative.
//! * Distance is zero for identical points.
//!
//! ## Non-goals
//!
//! * This module does not index points for neighbor search; every pair is
//!   evaluated directly.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// ============================================================================
// Distance Metric Enum
// ============================================================================

/// Distance metric used to measure proximity to a query point.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DistanceMetric<T> {
    /// Euclidean distance: √(Σ(aᵢ - bᵢ)²)
    #[default]
    Euclidean,

    /// Manhattan distance (L1 norm): Σ|aᵢ - bᵢ|
    Manhattan,

    /// Chebyshev distance (L∞ norm): max|aᵢ - bᵢ|
    Chebyshev,

    /// Minkowski distance (Lp norm) with p >= 1.
    Minkowski(T),

    /// Weighted Euclidean distance: √(Σ wᵢ(aᵢ - bᵢ)²), one non-negative weight per dimension.
    Weighted(Vec<T>),
}

impl<T: Float> DistanceMetric<T> {
    /// Distance between two points of equal dimension.
    #[inline]
    pub fn distance(&self, a: &[T], b: &[T]) -> T {
        match self {
            Self::Euclidean => Self::euclidean(a, b),
            Self::Manhattan => Self::manhattan(a, b),
            Self::Chebyshev => Self::chebyshev(a, b),
            Self::Minkowski(p) => Self::minkowski(a, b, *p),
            Self::Weighted(w) => Self::weighted(a, b, w),
        }
    }

    /// Compute Euclidean distance between two points.
    #[inline]
    pub fn euclidean(a: &[T], b: &[T]) -> T {
        debug_assert_eq!(a.len(), b.len(), "Points must have same dimension");
        a.iter()
            .zip(b)
            .fold(T::zero(), |acc, (&ai, &bi)| {
                let diff = ai - bi;
                acc + diff * diff
            })
            .sqrt()
    }

    /// Compute Manhattan distance (L1 norm).
    #[inline]
    pub fn manhattan(a: &[T], b: &[T]) -> T {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b)
            .fold(T::zero(), |acc, (&ai, &bi)| acc + (ai - bi).abs())
    }

    /// Compute Chebyshev distance (L∞ norm).
    #[inline]
    pub fn chebyshev(a: &[T], b: &[T]) -> T {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b)
            .fold(T::zero(), |acc, (&ai, &bi)| acc.max((ai - bi).abs()))
    }

    /// Compute Minkowski distance (Lp norm).
    #[inline]
    pub fn minkowski(a: &[T], b: &[T], p: T) -> T {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b)
            .fold(T::zero(), |acc, (&ai, &bi)| acc + (ai - bi).abs().powf(p))
            .powf(T::one() / p)
    }

    /// Compute weighted Euclidean distance.
    #[inline]
    pub fn weighted(a: &[T], b: &[T], weights: &[T]) -> T {
        debug_assert_eq!(a.len(), b.len());
        debug_assert_eq!(a.len(), weights.len());
        a.iter()
            .zip(b)
            .zip(weights)
            .fold(T::zero(), |acc, ((&ai, &bi), &w)| {
                let diff = ai - bi;
                acc + w * diff * diff
            })
            .sqrt()
    }
}
