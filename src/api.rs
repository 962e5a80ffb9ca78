//! High-level API for LOWESS estimation.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for configuring the estimator, the resulting estimator
//! handle, and the [`lowess`] convenience function that runs with every
//! option at its default.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Pluggable kernel**: `.kernel()` accepts a [`WeightFunction`], a closure,
//!   or any type implementing [`Kernel`], changing the builder's kernel type.
//! * **Validated**: Parameters are validated when `.build()` is called; data
//!   shapes are validated on every `fit`.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create a [`LowessBuilder`] via `Lowess::new()`.
//! 2. Chain configuration methods (`.bandwidth()`, `.degree()`, `.robust()`, etc.).
//! 3. Call `.build()` to get a validated [`LowessEstimator`].
//! 4. Call `.fit(&x, &y, &x_query)` or `.predict(&x, &y, &x_query)`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::fmt::Debug;

// Internal dependencies
use crate::engine::executor::{LowessConfig, LowessExecutor};
use crate::engine::validator::Validator;
use crate::math::linalg::FloatLinalg;
use crate::primitives::input::LowessInput;

// Publicly re-exported types
pub use crate::algorithms::regression::{MAX_DEGREE, PolynomialDegree};
pub use crate::algorithms::robustness::{RobustnessMethod, RobustnessScope};
pub use crate::engine::executor::DegenerateFitPolicy;
pub use crate::engine::output::LowessResult;
pub use crate::math::distance::DistanceMetric;
pub use crate::math::kernel::{Kernel, WeightFunction, epanechnikov, tricube};
pub use crate::math::scaling::ScalingMethod;
pub use crate::primitives::errors::{DegenerateFit, LowessError};
pub use crate::primitives::input::Points;

// ============================================================================
// Convenience Function
// ============================================================================

/// Estimate the function at `x_query` from `(x, y)` with default settings.
///
/// Equivalent to `Lowess::new().build()?.predict(x, y, x_query)`: Epanechnikov
/// kernel, bandwidth 1, local linear fit, no robustness pass.
pub fn lowess<T, X, Y, Q>(x: &X, y: &Y, x_query: &Q) -> Result<Vec<T>, LowessError>
where
    T: FloatLinalg + Debug + Send + Sync,
    X: LowessInput<T> + ?Sized,
    Y: LowessInput<T> + ?Sized,
    Q: LowessInput<T> + ?Sized,
{
    LowessBuilder::new().build()?.predict(x, y, x_query)
}

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring the LOWESS estimator.
#[derive(Debug, Clone)]
pub struct LowessBuilder<T, K = WeightFunction> {
    /// Kernel applied to normalized distances.
    pub kernel: K,

    /// Neighborhood radius.
    pub bandwidth: Option<T>,

    /// Polynomial degree of the local model.
    pub degree: Option<usize>,

    /// Apply the robustness pass.
    pub robust: Option<bool>,

    /// Outlier downweighting method.
    pub robustness_method: Option<RobustnessMethod>,

    /// Reweight-and-solve passes.
    pub robustness_iterations: Option<usize>,

    /// Local or global robustness residuals.
    pub robustness_scope: Option<RobustnessScope>,

    /// Residual scale estimator.
    pub scaling_method: Option<ScalingMethod>,

    /// Distance metric.
    pub distance_metric: Option<DistanceMetric<T>>,

    /// Behavior on a failed local fit.
    pub degenerate_fit_policy: Option<DegenerateFitPolicy>,

    /// Expected dimensionality of the inputs.
    pub dimensions: Option<usize>,

    /// Parallel execution hint.
    pub parallel: Option<bool>,

    /// Whether `kernel` was set explicitly.
    #[doc(hidden)]
    pub kernel_set: bool,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T> Default for LowessBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LowessBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            kernel: WeightFunction::default(),
            bandwidth: None,
            degree: None,
            robust: None,
            robustness_method: None,
            robustness_iterations: None,
            robustness_scope: None,
            scaling_method: None,
            distance_metric: None,
            degenerate_fit_policy: None,
            dimensions: None,
            parallel: None,
            kernel_set: false,
            duplicate_param: None,
        }
    }
}

impl<T, K> LowessBuilder<T, K> {
    /// Set the kernel (default: Epanechnikov).
    ///
    /// Accepts a [`WeightFunction`], a closure `Fn(T) -> T`, or any type
    /// implementing [`Kernel`]. Weights for normalized distances >= 1 are
    /// zeroed regardless of the kernel.
    pub fn kernel<K2>(self, kernel: K2) -> LowessBuilder<T, K2> {
        let duplicate_param = if self.kernel_set {
            Some("kernel")
        } else {
            self.duplicate_param
        };
        LowessBuilder {
            kernel,
            bandwidth: self.bandwidth,
            degree: self.degree,
            robust: self.robust,
            robustness_method: self.robustness_method,
            robustness_iterations: self.robustness_iterations,
            robustness_scope: self.robustness_scope,
            scaling_method: self.scaling_method,
            distance_metric: self.distance_metric,
            degenerate_fit_policy: self.degenerate_fit_policy,
            dimensions: self.dimensions,
            parallel: self.parallel,
            kernel_set: true,
            duplicate_param,
        }
    }

    /// Set the bandwidth (default: 1.0).
    pub fn bandwidth(mut self, bandwidth: T) -> Self {
        if self.bandwidth.is_some() {
            self.duplicate_param = Some("bandwidth");
        }
        self.bandwidth = Some(bandwidth);
        self
    }

    /// Set the polynomial degree (default: 1).
    pub fn degree(mut self, degree: usize) -> Self {
        if self.degree.is_some() {
            self.duplicate_param = Some("degree");
        }
        self.degree = Some(degree);
        self
    }

    /// Enable or disable the robustness pass (default: disabled).
    pub fn robust(mut self, robust: bool) -> Self {
        if self.robust.is_some() {
            self.duplicate_param = Some("robust");
        }
        self.robust = Some(robust);
        self
    }

    /// Set the robustness weighting method (default: Bisquare).
    pub fn robustness_method(mut self, method: RobustnessMethod) -> Self {
        if self.robustness_method.is_some() {
            self.duplicate_param = Some("robustness_method");
        }
        self.robustness_method = Some(method);
        self
    }

    /// Set the number of reweight-and-solve passes (default: 1).
    pub fn robustness_iterations(mut self, iterations: usize) -> Self {
        if self.robustness_iterations.is_some() {
            self.duplicate_param = Some("robustness_iterations");
        }
        self.robustness_iterations = Some(iterations);
        self
    }

    /// Set where robustness residuals come from (default: Local).
    pub fn robustness_scope(mut self, scope: RobustnessScope) -> Self {
        if self.robustness_scope.is_some() {
            self.duplicate_param = Some("robustness_scope");
        }
        self.robustness_scope = Some(scope);
        self
    }

    /// Set the residual scale estimator (default: MAR).
    pub fn scaling_method(mut self, method: ScalingMethod) -> Self {
        if self.scaling_method.is_some() {
            self.duplicate_param = Some("scaling_method");
        }
        self.scaling_method = Some(method);
        self
    }

    /// Set the distance metric (default: Euclidean).
    pub fn distance_metric(mut self, metric: DistanceMetric<T>) -> Self {
        if self.distance_metric.is_some() {
            self.duplicate_param = Some("distance_metric");
        }
        self.distance_metric = Some(metric);
        self
    }

    /// Set what a failed local fit produces (default: NaN).
    pub fn degenerate_fit_policy(mut self, policy: DegenerateFitPolicy) -> Self {
        if self.degenerate_fit_policy.is_some() {
            self.duplicate_param = Some("degenerate_fit_policy");
        }
        self.degenerate_fit_policy = Some(policy);
        self
    }

    /// Declare the expected input dimensionality (default: inferred).
    pub fn dimensions(mut self, dims: usize) -> Self {
        if self.dimensions.is_some() {
            self.duplicate_param = Some("dimensions");
        }
        self.dimensions = Some(dims);
        self
    }

    /// Fit query points in parallel (requires the `parallel` feature).
    pub fn parallel(mut self, parallel: bool) -> Self {
        if self.parallel.is_some() {
            self.duplicate_param = Some("parallel");
        }
        self.parallel = Some(parallel);
        self
    }
}

impl<T: FloatLinalg, K> LowessBuilder<T, K> {
    /// Validate the configuration and build the estimator.
    pub fn build(self) -> Result<LowessEstimator<T, K>, LowessError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let defaults = LowessConfig::<T>::default();
        let bandwidth = self.bandwidth.unwrap_or(defaults.bandwidth);
        let degree = self.degree.unwrap_or(defaults.degree.value());
        let iterations = self
            .robustness_iterations
            .unwrap_or(defaults.robustness_iterations);
        let distance_metric = self.distance_metric.unwrap_or(defaults.distance_metric);

        Validator::validate_bandwidth(bandwidth)?;
        Validator::validate_degree(degree)?;
        Validator::validate_iterations(iterations)?;
        Validator::validate_metric(&distance_metric)?;
        if self.dimensions == Some(0) {
            return Err(LowessError::InvalidDimensions(0));
        }

        let config = LowessConfig {
            bandwidth,
            degree: PolynomialDegree::new(degree),
            robust: self.robust.unwrap_or(defaults.robust),
            robustness_method: self.robustness_method.unwrap_or(defaults.robustness_method),
            robustness_iterations: iterations,
            robustness_scope: self.robustness_scope.unwrap_or(defaults.robustness_scope),
            scaling_method: self.scaling_method.unwrap_or(defaults.scaling_method),
            distance_metric,
            degenerate_fit_policy: self
                .degenerate_fit_policy
                .unwrap_or(defaults.degenerate_fit_policy),
            dimensions: self.dimensions,
            parallel: self.parallel.unwrap_or(defaults.parallel),
        };

        Ok(LowessEstimator {
            config,
            kernel: self.kernel,
        })
    }
}

// ============================================================================
// Estimator
// ============================================================================

/// A validated, reusable LOWESS estimator.
///
/// The estimator holds configuration only; training data is supplied to
/// every call, and calls do not influence each other.
#[derive(Debug, Clone)]
pub struct LowessEstimator<T, K = WeightFunction> {
    config: LowessConfig<T>,
    kernel: K,
}

impl<T, K> LowessEstimator<T, K>
where
    T: FloatLinalg + Debug + Send + Sync,
    K: Kernel<T> + Sync,
{
    /// The resolved configuration.
    pub fn config(&self) -> &LowessConfig<T> {
        &self.config
    }

    /// The kernel in use.
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Fit the local model at every query point.
    ///
    /// `x` holds the training points, `y` one value per training point, and
    /// `x_query` the points to estimate at, with the same dimensionality as `x`.
    pub fn fit<X, Y, Q>(&self, x: &X, y: &Y, x_query: &Q) -> Result<LowessResult<T>, LowessError>
    where
        X: LowessInput<T> + ?Sized,
        Y: LowessInput<T> + ?Sized,
        Q: LowessInput<T> + ?Sized,
    {
        let x = x.to_points()?;
        let y = y.to_points()?;
        let x_query = x_query.to_points()?;

        if y.dimensions() != 1 {
            return Err(LowessError::DimensionMismatch {
                expected: 1,
                got: y.dimensions(),
            });
        }

        let dims = x.dimensions();
        Validator::validate_dimensions(self.config.dimensions, dims)?;
        Validator::validate_inputs(x.as_slice(), y.as_slice(), dims)?;
        Validator::validate_query(x_query.as_slice(), x_query.dimensions(), dims)?;
        Validator::validate_metric_dimensions(&self.config.distance_metric, dims)?;
        Validator::validate_sample_size(y.len(), self.config.degree, dims)?;

        let executor = LowessExecutor::new(&self.config, &self.kernel, dims);
        let output = executor.run(x.as_slice(), y.as_slice(), x_query.as_slice())?;

        Ok(LowessResult {
            fitted: output.fitted,
            failures: output.failures,
            dimensions: dims,
            bandwidth: self.config.bandwidth,
            degree: self.config.degree.value(),
            robustness_weights: output.robustness_weights,
        })
    }

    /// Fitted values at the query points, in query order.
    pub fn predict<X, Y, Q>(&self, x: &X, y: &Y, x_query: &Q) -> Result<Vec<T>, LowessError>
    where
        X: LowessInput<T> + ?Sized,
        Y: LowessInput<T> + ?Sized,
        Q: LowessInput<T> + ?Sized,
    {
        self.fit(x, y, x_query).map(LowessResult::into_fitted)
    }
}
