//! # LOWESS — Locally Weighted Polynomial Regression in N Dimensions
//!
//! Estimate a scalar function at arbitrary query points from scattered
//! observations in one, two, or any number of input dimensions.
//!
//! ## What is LOWESS?
//!
//! LOWESS (locally weighted scatterplot smoothing) is a nonparametric
//! regression method. Around each query point it fits a low-degree
//! polynomial by weighted least squares, giving every training point a weight
//! that decays with its distance to the query point and vanishes outside a
//! fixed radius (the bandwidth). The fitted polynomial's value at the query
//! point is the estimate.
//!
//! **Key properties:**
//! - No parametric assumptions about the underlying function
//! - Works on unstructured point clouds in any dimension
//! - Query points are independent of the training points
//! - Optional robustness pass that downweights outliers
//!
//! **How each query point is fitted:**
//!
//! 1. Compute the distance from the query point `q` to every training point
//!    and divide it by the bandwidth.
//! 2. Weight each training point with the kernel; points at normalized
//!    distance >= 1 get weight zero.
//! 3. Fit a polynomial in `x - q` (all monomials up to the requested degree,
//!    cross terms included) by weighted least squares.
//! 4. Optionally reweight by the residuals (bisquare) and solve again.
//! 5. Report the intercept, which is the fitted value at `q`.
//!
//! ## Quick Start
//!
//! ### Typical Use
//!
//! ```rust
//! use lowess_nd::prelude::*;
//!
//! // Training data on a line, y = 2x + 1
//! let x = vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0];
//! let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
//! let x_query = vec![0.75, 1.25, 2.25];
//!
//! let fitted = lowess(&x, &y, &x_query)?;
//!
//! for (q, f) in x_query.iter().zip(&fitted) {
//!     assert!((f - (2.0 * q + 1.0)).abs() < 1e-10);
//! }
//! # Result::<(), LowessError>::Ok(())
//! ```
//!
//! ### Configured Estimator
//!
//! ```rust
//! use lowess_nd::prelude::*;
//!
//! // A 2-D grid, y = x0 - x1
//! let mut x = Vec::new();
//! let mut y = Vec::new();
//! for i in 0..10 {
//!     for j in 0..10 {
//!         let p = [i as f64 / 9.0, j as f64 / 9.0];
//!         x.push(p);
//!         y.push(p[0] - p[1]);
//!     }
//! }
//!
//! let model = Lowess::new()
//!     .kernel(Tricube)              // Kernel (Epanechnikov default)
//!     .bandwidth(0.5)               // Neighborhood radius
//!     .degree(2)                    // Local quadratic
//!     .robust(true)                 // Bisquare reweighting pass
//!     .robustness_method(Bisquare)  // Outlier handling
//!     .scaling_method(MAR)          // Residual scale
//!     .distance_metric(Euclidean)   // Distance metric
//!     .degenerate_fit_policy(ReturnNaN)
//!     .build()?;
//!
//! let result = model.fit(&x, &y, &[[0.5, 0.5], [0.2, 0.7]])?;
//!
//! assert!(result.is_complete());
//! assert!(result.fitted[0].abs() < 1e-8);
//! println!("{}", result);
//! # Result::<(), LowessError>::Ok(())
//! ```
//!
//! ```text
//! Summary:
//!   Query points: 2
//!   Dimensions:   2
//!   Bandwidth:    0.5
//!   Degree:       2
//!
//! Fitted Values:
//!    Index       Fitted
//! ---------------------
//!        0     0.000000
//!        1    -0.500000
//! ```
//!
//! ## Inputs
//!
//! Training and query points are accepted in several shapes through the
//! [`LowessInput`](prelude::LowessInput) trait:
//!
//! | Shape                              | Dimensions          |
//! |------------------------------------|---------------------|
//! | `[T]`, `Vec<T>`, `[T; N]`          | 1                   |
//! | `[[T; D]]`, `Vec<[T; D]>`          | `D`                 |
//! | `[Vec<T>]`, `Vec<Vec<T>>`          | row length          |
//! | `Points::from_flat(&data, d)`      | `d`                 |
//! | `Array1<T>` / `Array2<T>` (ndarray)| 1 / number of columns |
//!
//! ## Parameters
//!
//! | Parameter               | Default        | Description                                   |
//! |-------------------------|----------------|-----------------------------------------------|
//! | `kernel`                | `Epanechnikov` | `WeightFunction`, closure, or `Kernel` impl   |
//! | `bandwidth`             | `1.0`          | Neighborhood radius, > 0                      |
//! | `degree`                | `1`            | Local polynomial degree, 0..=10               |
//! | `robust`                | `false`        | Residual reweighting pass                     |
//! | `robustness_method`     | `Bisquare`     | `Bisquare`, `Huber`, `Talwar`                 |
//! | `robustness_iterations` | `1`            | Reweight-and-solve passes, 0..=100            |
//! | `robustness_scope`      | `Local`        | `Local` per-query or `Global` (Cleveland)     |
//! | `scaling_method`        | `MAR`          | Residual scale: `MAR` or `MAD`                |
//! | `distance_metric`       | `Euclidean`    | `Manhattan`, `Chebyshev`, `Minkowski`, `Weighted` |
//! | `degenerate_fit_policy` | `ReturnNaN`    | NaN plus recorded failure, or `Error`         |
//! | `dimensions`            | inferred       | Checked against the inputs                    |
//! | `parallel`              | `false`        | rayon pool (`parallel` feature)               |
//!
//! ## Degenerate Fits
//!
//! A query point with no training point inside its neighborhood, or with too
//! few (or collinear) weighted points for the requested degree, cannot be
//! fitted. By default its value is NaN, the index and reason are listed in
//! [`LowessResult::failures`](prelude::LowessResult), a `log::warn!` is
//! emitted, and every other query point is unaffected.
//!
//! ```rust
//! use lowess_nd::prelude::*;
//!
//! let x: Vec<f64> = vec![0.0, 1.0, 2.0];
//! let y = vec![0.0, 1.0, 2.0];
//!
//! let model = Lowess::new().bandwidth(1.5).build()?;
//! let result = model.fit(&x, &y, &[1.0, 10.0])?;
//!
//! assert!((result.fitted[0] - 1.0).abs() < 1e-12);
//! assert!(result.fitted[1].is_nan());
//! assert_eq!(result.failures, vec![(1, DegenerateFit::ZeroWeights)]);
//! # Result::<(), LowessError>::Ok(())
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): standard library support; disable for `no_std` + `alloc`.
//! - `parallel`: fit query points on the rayon thread pool.
//! - `ndarray`: accept `ndarray` arrays as inputs.
//! - `dev`: expose internal modules for testing.
//!
//! ## References
//!
//! - Cleveland, W. S. (1979). "Robust Locally Weighted Regression and Smoothing Scatterplots"
//! - Cleveland, W. S. & Devlin, S. J. (1988). "Locally Weighted Regression: An Approach to Regression Analysis by Local Fitting"

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures and basic utilities.
//
// Contains the error type, input shape normalization, and per-fit
// scratch buffers.
mod primitives;

// Layer 2: Math - pure mathematical functions.
//
// Contains kernel functions, distance metrics, the normal-equation solver,
// and robust statistics (median, MAD, MAR).
mod math;

// Layer 3: Algorithms - core LOWESS algorithms.
//
// Contains the local regression at one query point (via `RegressionContext`)
// and robustness weighting (`Bisquare`, `Huber`, `Talwar`).
mod algorithms;

// Layer 4: Engine - validation and orchestration.
//
// Contains input validation, the per-query execution loop, and result assembly.
mod engine;

// High-level fluent API for LOWESS estimation.
//
// Provides the `Lowess` builder and the `lowess()` convenience function.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard LOWESS prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use lowess_nd::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        DegenerateFit, DegenerateFitPolicy,
        DegenerateFitPolicy::ReturnNaN,
        DistanceMetric,
        DistanceMetric::{Chebyshev, Euclidean, Manhattan, Minkowski, Weighted},
        Kernel, LowessBuilder as Lowess, LowessEstimator, LowessError, LowessResult, MAX_DEGREE,
        Points, PolynomialDegree, RobustnessMethod,
        RobustnessMethod::{Bisquare, Huber, Talwar},
        RobustnessScope, ScalingMethod,
        ScalingMethod::{MAD, MAR},
        WeightFunction,
        WeightFunction::{Biweight, Cosine, Epanechnikov, Triangle, Tricube, Uniform},
        epanechnikov, lowess, tricube,
    };
    pub use crate::primitives::input::LowessInput;
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal core algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
