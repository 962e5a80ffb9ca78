//! Local weighted regression at a single query point.
//!
//! ## Purpose
//!
//! This module provides the core fitting algorithm: around a query point `q`,
//! weight every training point by the kernel of its normalized distance to
//! `q`, fit a polynomial in the coordinates relative to `q` by weighted least
//! squares, and report the intercept, which is the fitted value at `q`.
//!
//! ## Design notes
//!
//! * **Algorithm**: Weighted least squares via the normal equations XᵀWX β = XᵀWy.
//! * **Terms**: Monomials of total degree <= k in Δ = x - q, cross terms
//!   included, generated from a precomputed [`TermLayout`].
//! * **Robustness**: An optional local pass reweights by the residuals of the
//!   local polynomial and solves again.
//! * **Failure**: Empty or singular systems are reported as [`DegenerateFit`],
//!   never replaced by a made-up value.
//!
//! ## Key concepts
//!
//! * **Compact support**: Training points with normalized distance >= 1 get
//!   weight zero and do not enter the system.
//! * **Degree 0**: The fit is exactly the kernel-weighted mean.
//!
//! ## Invariants
//!
//! * A successful fit returns a finite value.
//! * No state survives between query points other than reused scratch space.
//!
//! ## Non-goals
//!
//! * This module does not loop over query points (handled by the engine).
//! * This module does not validate input shapes.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::algorithms::robustness::RobustnessMethod;
use crate::math::distance::DistanceMetric;
use crate::math::kernel::Kernel;
use crate::math::linalg::FloatLinalg;
use crate::math::scaling::ScalingMethod;
use crate::primitives::buffer::FittingBuffer;
use crate::primitives::errors::DegenerateFit;

/// Highest polynomial degree accepted by the estimator.
pub const MAX_DEGREE: usize = 10;

// ============================================================================
// Polynomial Degree
// ============================================================================

/// Polynomial degree of the local model (0 = weighted mean, 1 = linear, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PolynomialDegree(usize);

impl PolynomialDegree {
    /// Degree 0: local constant (weighted mean).
    pub const CONSTANT: Self = Self(0);
    /// Degree 1: local linear regression (default).
    pub const LINEAR: Self = Self(1);
    /// Degree 2: local quadratic regression.
    pub const QUADRATIC: Self = Self(2);
    /// Degree 3: local cubic regression.
    pub const CUBIC: Self = Self(3);
    /// Degree 4: local quartic regression.
    pub const QUARTIC: Self = Self(4);

    /// Create a degree. Range checking happens when the estimator is built.
    #[inline]
    pub const fn new(degree: usize) -> Self {
        Self(degree)
    }

    /// Get the numeric degree value.
    #[inline]
    pub const fn value(&self) -> usize {
        self.0
    }

    /// Number of monomials of total degree <= k in `dimensions` variables: C(D + k, k).
    ///
    /// Saturates at `usize::MAX` on overflow.
    #[inline]
    pub const fn num_coefficients(&self, dimensions: usize) -> usize {
        let mut acc: usize = 1;
        let mut k = 1;
        while k <= self.0 {
            acc = match acc.checked_mul(dimensions + k) {
                Some(v) => v / k,
                None => return usize::MAX,
            };
            k += 1;
        }
        acc
    }
}

impl Default for PolynomialDegree {
    fn default() -> Self {
        Self::LINEAR
    }
}

impl From<usize> for PolynomialDegree {
    fn from(degree: usize) -> Self {
        Self(degree)
    }
}

// ============================================================================
// Term Layout
// ============================================================================

/// Recipe for building the polynomial terms of one design-matrix row.
///
/// Term 0 is the intercept. Every later term is an earlier term times one
/// coordinate of Δ, enumerated so that each monomial appears exactly once,
/// graded by total degree: for D = 2, k = 2 the row is
/// `[1, Δx, Δy, Δx², ΔxΔy, Δy²]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermLayout {
    /// `(parent term, dimension)` for terms 1.. in order.
    factors: Vec<(usize, usize)>,
}

impl TermLayout {
    /// Build the layout for a degree and dimensionality.
    pub fn new(degree: PolynomialDegree, dimensions: usize) -> Self {
        let mut factors = Vec::with_capacity(degree.num_coefficients(dimensions) - 1);
        // (term index, lowest dimension it may still be multiplied by)
        let mut frontier: Vec<(usize, usize)> = vec![(0, 0)];

        for _ in 0..degree.value() {
            let mut next = Vec::new();
            for &(parent, first_dim) in &frontier {
                for dim in first_dim..dimensions {
                    factors.push((parent, dim));
                    next.push((factors.len(), dim));
                }
            }
            frontier = next;
        }

        Self { factors }
    }

    /// Number of terms (coefficients), including the intercept.
    #[inline]
    pub fn n_coeffs(&self) -> usize {
        self.factors.len() + 1
    }

    /// Write the terms for a point at offset `delta` from the query point.
    #[inline]
    pub fn build_terms<T: FloatLinalg>(&self, delta: &[T], terms: &mut [T]) {
        terms[0] = T::one();
        for (k, &(parent, dim)) in self.factors.iter().enumerate() {
            terms[k + 1] = terms[parent] * delta[dim];
        }
    }
}

// ============================================================================
// Local Robustness Settings
// ============================================================================

/// Settings for the residual-based reweighting inside a single local fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalRobustness {
    /// Weight function applied to scaled residuals.
    pub method: RobustnessMethod,
    /// Residual scale estimator.
    pub scaling: ScalingMethod,
    /// Number of reweight-and-solve passes.
    pub iterations: usize,
}

// ============================================================================
// Regression Context
// ============================================================================

/// Everything needed to fit the local model at one query point.
pub struct RegressionContext<'a, T: FloatLinalg, K: ?Sized> {
    /// Flattened row-major training points.
    pub x: &'a [T],

    /// Number of dimensions per point.
    pub dimensions: usize,

    /// Training values.
    pub y: &'a [T],

    /// Coordinates of the query point.
    pub query: &'a [T],

    /// Kernel applied to normalized distances.
    pub kernel: &'a K,

    /// Distance metric.
    pub metric: &'a DistanceMetric<T>,

    /// Neighborhood radius; distances are divided by it.
    pub bandwidth: T,

    /// Polynomial term recipe.
    pub layout: &'a TermLayout,

    /// Per-training-point weights multiplied into the kernel weights.
    pub prior_weights: Option<&'a [T]>,

    /// Local robustness pass, if enabled.
    pub robustness: Option<LocalRobustness>,
}

impl<'a, T: FloatLinalg, K: Kernel<T> + ?Sized> RegressionContext<'a, T, K> {
    /// Fitted value at the query point.
    pub fn fit(&self, buffer: &mut FittingBuffer<T>) -> Result<T, DegenerateFit> {
        self.compute_base_weights(&mut buffer.base_weights);
        buffer.weights.copy_from_slice(&buffer.base_weights);

        let mut beta = self.solve(buffer)?;

        if let Some(robustness) = self.robustness {
            for _ in 0..robustness.iterations {
                self.reweight(buffer, &beta, robustness);
                beta = self.solve(buffer)?;
            }
        }

        Ok(beta[0])
    }

    /// Kernel weight of every training point, times any prior weight.
    fn compute_base_weights(&self, base_weights: &mut [T]) {
        let d = self.dimensions;
        for (i, w) in base_weights.iter_mut().enumerate() {
            let point = &self.x[i * d..(i + 1) * d];
            let u = self.metric.distance(point, self.query) / self.bandwidth;

            let mut weight = if u < T::one() {
                self.kernel.weight(u)
            } else {
                T::zero()
            };
            // NaN and negative kernel output exclude the point.
            if weight.is_nan() || weight < T::zero() {
                weight = T::zero();
            }
            if let Some(prior) = self.prior_weights {
                weight = weight * prior[i];
            }
            *w = weight;
        }
    }

    /// Offset of training point `i` from the query point.
    #[inline]
    fn fill_delta(&self, i: usize, delta: &mut [T]) {
        let d = self.dimensions;
        let point = &self.x[i * d..(i + 1) * d];
        for ((out, &p), &q) in delta.iter_mut().zip(point).zip(self.query) {
            *out = p - q;
        }
    }

    /// Solve the weighted least-squares problem with `buffer.weights`.
    fn solve(&self, buffer: &mut FittingBuffer<T>) -> Result<Vec<T>, DegenerateFit> {
        let n_coeffs = self.layout.n_coeffs();

        if n_coeffs == 1 {
            let (sum_wy, sum_w) = buffer
                .weights
                .iter()
                .zip(self.y)
                .fold((T::zero(), T::zero()), |(swy, sw), (&w, &y)| {
                    (swy + w * y, sw + w)
                });
            if sum_w <= T::zero() {
                return Err(DegenerateFit::ZeroWeights);
            }
            return Ok(vec![sum_wy / sum_w]);
        }

        buffer.reset_normal_equations();
        let mut active = 0usize;

        for i in 0..self.y.len() {
            let w = buffer.weights[i];
            if w <= T::zero() {
                continue;
            }
            active += 1;

            self.fill_delta(i, &mut buffer.delta);
            self.layout.build_terms(&buffer.delta, &mut buffer.terms);

            let y_val = self.y[i];
            for j in 0..n_coeffs {
                let w_tj = w * buffer.terms[j];
                buffer.xtw_y[j] = buffer.xtw_y[j] + w_tj * y_val;
                for k in j..n_coeffs {
                    buffer.xtw_x[j * n_coeffs + k] =
                        buffer.xtw_x[j * n_coeffs + k] + w_tj * buffer.terms[k];
                }
            }
        }

        if active == 0 {
            return Err(DegenerateFit::ZeroWeights);
        }
        if active < n_coeffs {
            return Err(DegenerateFit::SingularSystem);
        }

        // Mirror the upper triangle.
        for j in 0..n_coeffs {
            for k in 0..j {
                buffer.xtw_x[j * n_coeffs + k] = buffer.xtw_x[k * n_coeffs + j];
            }
        }

        T::solve_normal(&buffer.xtw_x, &buffer.xtw_y, n_coeffs)
            .ok_or(DegenerateFit::SingularSystem)
    }

    /// Replace `buffer.weights` by base weights times robustness weights
    /// derived from the residuals of the polynomial `beta`.
    fn reweight(&self, buffer: &mut FittingBuffer<T>, beta: &[T], robustness: LocalRobustness) {
        let n_coeffs = self.layout.n_coeffs();
        let mut m = 0usize;

        for i in 0..self.y.len() {
            if buffer.base_weights[i] <= T::zero() {
                continue;
            }
            self.fill_delta(i, &mut buffer.delta);
            self.layout.build_terms(&buffer.delta, &mut buffer.terms);
            let fitted = buffer.terms[..n_coeffs]
                .iter()
                .zip(beta)
                .fold(T::zero(), |acc, (&t, &b)| acc + t * b);
            buffer.residuals[m] = self.y[i] - fitted;
            m += 1;
        }

        let scale = RobustnessMethod::residual_scale(
            &buffer.residuals[..m],
            robustness.scaling,
            &mut buffer.scratch,
        );

        let mut m = 0usize;
        for i in 0..self.y.len() {
            let base = buffer.base_weights[i];
            if base <= T::zero() {
                buffer.weights[i] = T::zero();
                continue;
            }
            buffer.weights[i] = base * robustness.method.weight(buffer.residuals[m], scale);
            m += 1;
        }
    }
}
