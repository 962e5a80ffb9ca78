//! Input validation for LOWESS configuration and data.
//!
//! ## Purpose
//!
//! This module provides the validation functions for estimator parameters
//! and input data. It checks requirements such as matching point and value
//! counts, consistent dimensionality, finite values, and parameter bounds.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Shape checks**: Training points, training values and query points must agree.
//! * **Finite checks**: Ensures all inputs are finite (no NaN/Inf).
//! * **Parameter bounds**: Bandwidth > 0, degree <= 10, iterations <= 100.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not transform or filter input data.
//! * This module does not detect per-query degeneracy (reported by the fit itself).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::regression::{MAX_DEGREE, PolynomialDegree};
use crate::math::distance::DistanceMetric;
use crate::primitives::errors::LowessError;

/// Maximum number of robustness iterations.
pub const MAX_ITERATIONS: usize = 100;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for LOWESS configuration and input data.
///
/// Provides static methods that return `Result<(), LowessError>` and fail
/// fast upon identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate flattened training data: `x` holds `y.len()` points of `dimensions` coordinates.
    pub fn validate_inputs<T: Float>(
        x: &[T],
        y: &[T],
        dimensions: usize,
    ) -> Result<(), LowessError> {
        // Check 1: Non-empty arrays
        if x.is_empty() || y.is_empty() {
            return Err(LowessError::EmptyInput);
        }

        // Check 2: One value per point
        let n_x = x.len() / dimensions;
        if n_x != y.len() {
            return Err(LowessError::MismatchedInputs {
                x_len: n_x,
                y_len: y.len(),
            });
        }

        // Check 3: All values finite
        Self::validate_finite(x, "x")?;
        Self::validate_finite(y, "y")?;

        Ok(())
    }

    /// Validate flattened query points against the training dimensionality.
    pub fn validate_query<T: Float>(
        x_query: &[T],
        query_dimensions: usize,
        dimensions: usize,
    ) -> Result<(), LowessError> {
        // An empty query set of the wrong dimension is still harmless.
        if query_dimensions != dimensions && !x_query.is_empty() {
            return Err(LowessError::DimensionMismatch {
                expected: dimensions,
                got: query_dimensions,
            });
        }
        Self::validate_finite(x_query, "x_query")
    }

    /// Validate an explicitly configured dimensionality against the data.
    pub fn validate_dimensions(
        configured: Option<usize>,
        dimensions: usize,
    ) -> Result<(), LowessError> {
        match configured {
            Some(0) => Err(LowessError::InvalidDimensions(0)),
            Some(d) if d != dimensions => Err(LowessError::DimensionMismatch {
                expected: d,
                got: dimensions,
            }),
            _ => Ok(()),
        }
    }

    /// Validate that the training set can support a polynomial of the given degree.
    pub fn validate_sample_size(
        n: usize,
        degree: PolynomialDegree,
        dimensions: usize,
    ) -> Result<(), LowessError> {
        let min = degree.num_coefficients(dimensions);
        if n < min {
            return Err(LowessError::TooFewPoints { got: n, min });
        }
        Ok(())
    }

    fn validate_finite<T: Float>(vals: &[T], name: &str) -> Result<(), LowessError> {
        for (i, &val) in vals.iter().enumerate() {
            if !val.is_finite() {
                return Err(LowessError::InvalidNumericValue(format!(
                    "{}[{}]={}",
                    name,
                    i,
                    val.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the bandwidth: positive and finite.
    pub fn validate_bandwidth<T: Float>(bandwidth: T) -> Result<(), LowessError> {
        if !bandwidth.is_finite() || bandwidth <= T::zero() {
            return Err(LowessError::InvalidBandwidth(
                bandwidth.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the polynomial degree.
    pub fn validate_degree(degree: usize) -> Result<(), LowessError> {
        if degree > MAX_DEGREE {
            return Err(LowessError::InvalidDegree(degree));
        }
        Ok(())
    }

    /// Validate the number of robustness iterations.
    ///
    /// # Notes
    ///
    /// * 0 iterations means the robust pass is a no-op.
    /// * Maximum of 100 iterations to prevent excessive computation.
    pub fn validate_iterations(iterations: usize) -> Result<(), LowessError> {
        if iterations > MAX_ITERATIONS {
            return Err(LowessError::InvalidIterations(iterations));
        }
        Ok(())
    }

    /// Validate distance metric parameters that do not depend on the data.
    pub fn validate_metric<T: Float>(metric: &DistanceMetric<T>) -> Result<(), LowessError> {
        match metric {
            DistanceMetric::Minkowski(p) => {
                if !p.is_finite() || *p < T::one() {
                    return Err(LowessError::InvalidMinkowskiPower(
                        p.to_f64().unwrap_or(f64::NAN),
                    ));
                }
            }
            DistanceMetric::Weighted(w) => {
                if let Some(i) = w.iter().position(|v| !v.is_finite() || *v < T::zero()) {
                    return Err(LowessError::InvalidMetricWeights(format!(
                        "weight[{}]={} (must be finite and >= 0)",
                        i,
                        w[i].to_f64().unwrap_or(f64::NAN)
                    )));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Validate that per-dimension metric weights match the data dimensionality.
    pub fn validate_metric_dimensions<T: Float>(
        metric: &DistanceMetric<T>,
        dimensions: usize,
    ) -> Result<(), LowessError> {
        match metric {
            DistanceMetric::Weighted(w) if w.len() != dimensions => {
                Err(LowessError::InvalidMetricWeights(format!(
                    "expected {} weights, got {}",
                    dimensions,
                    w.len()
                )))
            }
            _ => Ok(()),
        }
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), LowessError> {
        if let Some(param) = duplicate_param {
            return Err(LowessError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
