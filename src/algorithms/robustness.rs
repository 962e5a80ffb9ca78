//! Robustness weight computation for outlier downweighting.
//!
//! ## Purpose
//!
//! After a local fit, residuals are compared against a robust residual scale
//! and converted into weights in [0, 1]. Multiplying these into the kernel
//! weights and solving again reduces the pull of outliers on the fit.
//!
//! ## Design notes
//!
//! * **Estimation**: Median-based scale (MAR or MAD) with a Mean Absolute
//!   Error fallback when the median collapses towards zero.
//! * **Methods**: Bisquare (default), Huber, and Talwar.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Bisquare**: w = (1 - (r / 6s)²)², zero beyond six residual scales.
//! * **Huber**: w = min(1, c·s / |r|) with c = 1.345.
//! * **Talwar**: w = 1 if |r| <= c·s else 0, with c = 2.5.
//!
//! ## Invariants
//!
//! * Robustness weights are in [0, 1].
//! * A zero residual scale (exact fit) yields unit weights.
//!
//! ## Non-goals
//!
//! * This module does not perform the regression itself.
//! * This module does not decide which residuals participate.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::scaling::ScalingMethod;

// ============================================================================
// Robustness Method
// ============================================================================

/// Robustness weighting method for outlier downweighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RobustnessMethod {
    /// Bisquare (Tukey's biweight) - default and most common.
    #[default]
    Bisquare,

    /// Huber weights - less aggressive downweighting.
    Huber,

    /// Talwar (hard threshold) - most aggressive.
    Talwar,
}

// ============================================================================
// Robustness Scope
// ============================================================================

/// Which residuals feed the robustness weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RobustnessScope {
    /// Residuals of each query point's own local polynomial, over the training
    /// points inside its neighborhood.
    #[default]
    Local,

    /// Residuals of an in-sample fit at every training point; one weight per
    /// training point shared by all query fits (Cleveland, 1979).
    Global,
}

// ============================================================================
// Implementation
// ============================================================================

impl RobustnessMethod {
    /// Tuning constant for bisquare weights, applied to the raw residual scale.
    const DEFAULT_BISQUARE_C: f64 = 6.0;

    /// Tuning constant for Huber weights (95% efficiency under normality).
    const DEFAULT_HUBER_C: f64 = 1.345;

    /// Tuning constant for Talwar weights.
    const DEFAULT_TALWAR_C: f64 = 2.5;

    /// If the median scale is below this fraction of the MAE, use the MAE.
    const SCALE_THRESHOLD: f64 = 1e-7;

    /// Absolute floor below which a scale is treated as zero.
    const MIN_TUNED_SCALE: f64 = 1e-12;

    /// The tuning constant of this method.
    #[inline]
    pub fn tuning_constant(&self) -> f64 {
        match self {
            Self::Bisquare => Self::DEFAULT_BISQUARE_C,
            Self::Huber => Self::DEFAULT_HUBER_C,
            Self::Talwar => Self::DEFAULT_TALWAR_C,
        }
    }

    /// Fill `weights` with the robustness weight of each residual.
    pub fn apply_robustness_weights<T: Float>(
        &self,
        residuals: &[T],
        weights: &mut [T],
        scaling_method: ScalingMethod,
        scratch: &mut Vec<T>,
    ) -> T {
        let scale = Self::residual_scale(residuals, scaling_method, scratch);
        for (w, &r) in weights.iter_mut().zip(residuals) {
            *w = self.weight(r, scale);
        }
        scale
    }

    /// Robust residual scale with a Mean Absolute Error fallback.
    ///
    /// `scratch` is overwritten with a copy of the residuals.
    pub fn residual_scale<T: Float>(
        residuals: &[T],
        scaling_method: ScalingMethod,
        scratch: &mut Vec<T>,
    ) -> T {
        let n = residuals.len();
        if n == 0 {
            return T::zero();
        }

        let sum_abs = residuals.iter().fold(T::zero(), |acc, r| acc + r.abs());
        let mae = sum_abs / T::from(n).unwrap_or_else(T::one);
        if mae.is_zero() {
            return T::zero();
        }

        let relative_threshold = T::from(Self::SCALE_THRESHOLD).unwrap_or_else(T::zero) * mae;
        let absolute_threshold = T::from(Self::MIN_TUNED_SCALE).unwrap_or_else(T::zero);
        let threshold = relative_threshold.max(absolute_threshold);

        scratch.clear();
        scratch.extend_from_slice(residuals);
        let scale = scaling_method.compute(scratch);

        if scale <= threshold { mae.max(scale) } else { scale }
    }

    /// Robustness weight of a single residual given the residual scale.
    #[inline]
    pub fn weight<T: Float>(&self, residual: T, scale: T) -> T {
        let min_scale = T::from(Self::MIN_TUNED_SCALE).unwrap_or_else(T::zero);
        if scale <= min_scale {
            return T::one();
        }
        let c = T::from(self.tuning_constant()).unwrap_or_else(T::one);
        match self {
            Self::Bisquare => Self::bisquare_weight(residual, scale, c),
            Self::Huber => Self::huber_weight(residual, scale, c),
            Self::Talwar => Self::talwar_weight(residual, scale, c),
        }
    }

    /// Bisquare weight: u = |r| / (c·s); (1 - u²)² for u < 1, else 0.
    #[inline]
    pub(crate) fn bisquare_weight<T: Float>(residual: T, scale: T, c: T) -> T {
        let u = (residual / (scale * c)).abs();
        if u >= T::one() {
            T::zero()
        } else {
            let tmp = T::one() - u * u;
            tmp * tmp
        }
    }

    /// Huber weight: u = |r| / s; 1 for u <= c, else c / u.
    #[inline]
    pub(crate) fn huber_weight<T: Float>(residual: T, scale: T, c: T) -> T {
        let u = (residual / scale).abs();
        if u <= c { T::one() } else { c / u }
    }

    /// Talwar weight: u = |r| / s; 1 for u <= c, else 0.
    #[inline]
    pub(crate) fn talwar_weight<T: Float>(residual: T, scale: T, c: T) -> T {
        let u = (residual / scale).abs();
        if u <= c { T::one() } else { T::zero() }
    }
}
