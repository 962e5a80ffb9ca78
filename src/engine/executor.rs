//! Execution engine for LOWESS estimation.
//!
//! ## Purpose
//!
//! This module drives the per-query loop: for every query point it builds a
//! `RegressionContext`, runs the local fit with a reusable `FittingBuffer`,
//! and assembles the fitted values and failures in query order. It also runs
//! the global (in-sample) robustness scheme when that scope is selected.
//!
//! ## Design notes
//!
//! * **Independence**: Query fits share no mutable state; each worker owns one buffer.
//! * **Parallelism**: With the `parallel` feature, query points are fitted on
//!   the rayon pool (`map_init` per-thread buffers); output order is unchanged.
//! * **Failure policy**: Degenerate fits become NaN plus a recorded failure,
//!   or abort the call, depending on `DegenerateFitPolicy`.
//! * Generic over `Float` types to support f32 and f64.
//!
//! ## Key concepts
//!
//! * **Local robustness**: Each query fit reweights its own neighborhood.
//! * **Global robustness**: Fit at every training point, turn the residuals
//!   into one robustness weight per training point, then use those weights in
//!   every query fit (repeated `robustness_iterations` times).
//!
//! ## Invariants
//!
//! * Output has exactly one value per query point, in query order.
//! * Robustness weights are always in [0, 1].
//!
//! ## Non-goals
//!
//! * This module does not validate input data (handled by `validator`).
//! * This module does not provide public-facing result formatting.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::Debug;
use log::{debug, trace, warn};
use num_traits::Float;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Internal dependencies
use crate::algorithms::regression::{
    LocalRobustness, PolynomialDegree, RegressionContext, TermLayout,
};
use crate::algorithms::robustness::{RobustnessMethod, RobustnessScope};
use crate::math::distance::DistanceMetric;
use crate::math::kernel::Kernel;
use crate::math::linalg::FloatLinalg;
use crate::math::scaling::ScalingMethod;
use crate::primitives::buffer::FittingBuffer;
use crate::primitives::errors::{DegenerateFit, LowessError};

// ============================================================================
// Degenerate Fit Policy
// ============================================================================

/// What a query point whose local fit fails produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegenerateFitPolicy {
    /// Write NaN, record the failure in the result, and continue.
    #[default]
    ReturnNaN,

    /// Abort the whole call with `LowessError::DegenerateFit`.
    Error,
}

// ============================================================================
// Configuration
// ============================================================================

/// Resolved configuration for LOWESS execution.
#[derive(Debug, Clone, PartialEq)]
pub struct LowessConfig<T> {
    /// Neighborhood radius; distances are divided by it.
    pub bandwidth: T,

    /// Polynomial degree of the local model.
    pub degree: PolynomialDegree,

    /// Whether to apply the robustness pass.
    pub robust: bool,

    /// Robustness weighting method for outlier downweighting.
    pub robustness_method: RobustnessMethod,

    /// Number of reweight-and-solve passes when `robust` is set.
    pub robustness_iterations: usize,

    /// Where the robustness residuals come from.
    pub robustness_scope: RobustnessScope,

    /// Residual scaling method (MAR or MAD).
    pub scaling_method: ScalingMethod,

    /// Distance metric between points.
    pub distance_metric: DistanceMetric<T>,

    /// Behavior on a failed local fit.
    pub degenerate_fit_policy: DegenerateFitPolicy,

    /// Explicit dimensionality, checked against the inputs.
    pub dimensions: Option<usize>,

    /// Whether to use parallel execution.
    pub parallel: bool,
}

impl<T: Float> Default for LowessConfig<T> {
    fn default() -> Self {
        Self {
            bandwidth: T::one(),
            degree: PolynomialDegree::default(),
            robust: false,
            robustness_method: RobustnessMethod::default(),
            robustness_iterations: 1,
            robustness_scope: RobustnessScope::default(),
            scaling_method: ScalingMethod::default(),
            distance_metric: DistanceMetric::default(),
            degenerate_fit_policy: DegenerateFitPolicy::default(),
            dimensions: None,
            parallel: false,
        }
    }
}

/// Output from LOWESS execution.
#[derive(Debug, Clone)]
pub struct ExecutorOutput<T> {
    /// Fitted value at each query point (NaN where the fit failed).
    pub fitted: Vec<T>,

    /// Failed query points with their reasons, by ascending index.
    pub failures: Vec<(usize, DegenerateFit)>,

    /// Per-training-point weights from global robustness.
    pub robustness_weights: Option<Vec<T>>,
}

// ============================================================================
// Executor
// ============================================================================

/// Per-query fitting loop over validated, flattened inputs.
pub struct LowessExecutor<'a, T, K: ?Sized> {
    config: &'a LowessConfig<T>,
    kernel: &'a K,
    layout: TermLayout,
    dimensions: usize,
}

impl<'a, T, K> LowessExecutor<'a, T, K>
where
    T: FloatLinalg + Debug + Send + Sync,
    K: Kernel<T> + Sync + ?Sized,
{
    /// Create an executor for data of the given dimensionality.
    pub fn new(config: &'a LowessConfig<T>, kernel: &'a K, dimensions: usize) -> Self {
        Self {
            config,
            kernel,
            layout: TermLayout::new(config.degree, dimensions),
            dimensions,
        }
    }

    /// Fit every query point.
    ///
    /// `x` and `query` are row-major with `dimensions` coordinates per point;
    /// `y` has one value per training point.
    pub fn run(&self, x: &[T], y: &[T], query: &[T]) -> Result<ExecutorOutput<T>, LowessError> {
        let config = self.config;
        let m = query.len() / self.dimensions;

        debug!(
            "lowess: n = {}, m = {}, dimensions = {}, bandwidth = {:?}, degree = {}, robust = {}",
            y.len(),
            m,
            self.dimensions,
            config.bandwidth,
            config.degree.value(),
            config.robust
        );

        let scope = config.robustness_scope;
        let robustness_weights = if config.robust && scope == RobustnessScope::Global {
            Some(self.global_robustness_weights(x, y))
        } else {
            None
        };

        let local = if config.robust && scope == RobustnessScope::Local {
            Some(LocalRobustness {
                method: config.robustness_method,
                scaling: config.scaling_method,
                iterations: config.robustness_iterations,
            })
        } else {
            None
        };

        let results = self.fit_points(x, y, query, robustness_weights.as_deref(), local);

        let mut fitted = Vec::with_capacity(m);
        let mut failures = Vec::new();
        for (i, result) in results.into_iter().enumerate() {
            match result {
                Ok(value) => fitted.push(value),
                Err(reason) => {
                    if config.degenerate_fit_policy == DegenerateFitPolicy::Error {
                        return Err(LowessError::DegenerateFit { index: i, reason });
                    }
                    warn!("lowess: local fit failed at query point {i}: {reason}");
                    fitted.push(T::nan());
                    failures.push((i, reason));
                }
            }
        }

        debug!(
            "lowess: fitted {} query points, {} failed",
            m - failures.len(),
            failures.len()
        );

        Ok(ExecutorOutput {
            fitted,
            failures,
            robustness_weights,
        })
    }

    // ========================================================================
    // Fitting Passes
    // ========================================================================

    /// Fit the local model at each point of `query`, in order.
    fn fit_points(
        &self,
        x: &[T],
        y: &[T],
        query: &[T],
        prior_weights: Option<&[T]>,
        robustness: Option<LocalRobustness>,
    ) -> Vec<Result<T, DegenerateFit>> {
        let d = self.dimensions;
        let n = y.len();
        let n_coeffs = self.layout.n_coeffs();

        let fit_one = |buffer: &mut FittingBuffer<T>, q: &[T]| {
            let ctx = RegressionContext {
                x,
                dimensions: d,
                y,
                query: q,
                kernel: self.kernel,
                metric: &self.config.distance_metric,
                bandwidth: self.config.bandwidth,
                layout: &self.layout,
                prior_weights,
                robustness,
            };
            ctx.fit(buffer)
        };

        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                return query
                    .par_chunks_exact(d)
                    .map_init(
                        || FittingBuffer::new(n, d, n_coeffs),
                        |buffer, q| fit_one(buffer, q),
                    )
                    .collect();
            }
        }

        let mut buffer = FittingBuffer::new(n, d, n_coeffs);
        query
            .chunks_exact(d)
            .enumerate()
            .map(|(i, q)| {
                let result = fit_one(&mut buffer, q);
                trace!("lowess: query {i} -> {result:?}");
                result
            })
            .collect()
    }

    /// Cleveland-style robustness weights from in-sample fits at the training points.
    ///
    /// Training points whose own in-sample fit fails keep their previous weight
    /// and do not contribute to the residual scale.
    fn global_robustness_weights(&self, x: &[T], y: &[T]) -> Vec<T> {
        let n = y.len();
        let config = self.config;

        let mut weights = vec![T::one(); n];
        let mut residuals = Vec::with_capacity(n);
        let mut fitted_idx = Vec::with_capacity(n);
        let mut updated = Vec::with_capacity(n);
        let mut scratch = Vec::with_capacity(n);

        for iteration in 0..config.robustness_iterations {
            let in_sample = self.fit_points(x, y, x, Some(&weights), None);

            residuals.clear();
            fitted_idx.clear();
            for (i, result) in in_sample.iter().enumerate() {
                if let Ok(value) = result {
                    residuals.push(y[i] - *value);
                    fitted_idx.push(i);
                }
            }

            updated.clear();
            updated.resize(residuals.len(), T::one());
            let scale = config.robustness_method.apply_robustness_weights(
                &residuals,
                &mut updated,
                config.scaling_method,
                &mut scratch,
            );
            for (&i, &w) in fitted_idx.iter().zip(&updated) {
                weights[i] = w;
            }

            debug!(
                "lowess: global robustness iteration {}: scale = {:?}, {} of {} training fits",
                iteration + 1,
                scale,
                fitted_idx.len(),
                n
            );
        }

        weights
    }
}
