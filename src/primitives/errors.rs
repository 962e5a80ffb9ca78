//! Error types for LOWESS operations.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while configuring
//! or running the estimator: malformed input shapes, invalid parameters, and
//! (when requested) failed local fits.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include the offending values (lengths, dimensions, indices).
//! * **Deferred**: Builder misuse is recorded and surfaced by `build()`.
//! * **No-std**: Uses `alloc` for dynamic messages when `std` is disabled.
//!
//! ## Key concepts
//!
//! 1. **Shape errors**: Rejected before any fitting begins.
//! 2. **Parameter errors**: Rejected when the estimator is built.
//! 3. **Fit errors**: A single query point whose local system is degenerate.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Degenerate Fit Reason
// ============================================================================

/// Why a local fit at a query point could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateFit {
    /// Every training point lies at normalized distance >= 1 (or was
    /// fully downweighted), so the weighted system is empty.
    ZeroWeights,

    /// The weighted normal matrix XᵀWX is not invertible at working precision.
    SingularSystem,
}

impl Display for DegenerateFit {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::ZeroWeights => write!(f, "no training point has positive weight"),
            Self::SingularSystem => write!(f, "weighted normal matrix is singular"),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Error type for LOWESS operations.
#[derive(Debug, Clone, PartialEq)]
pub enum LowessError {
    /// No training points were supplied.
    EmptyInput,

    /// The number of training points differs from the number of training values.
    MismatchedInputs {
        /// Number of training points.
        x_len: usize,
        /// Number of training values.
        y_len: usize,
    },

    /// Query (or explicitly configured) dimensionality differs from the training data.
    DimensionMismatch {
        /// Dimensionality of the training points.
        expected: usize,
        /// Dimensionality that was supplied.
        got: usize,
    },

    /// A nested point collection has rows of different lengths.
    InconsistentDimensions {
        /// Index of the first offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        got: usize,
    },

    /// Dimensionality is zero, or a flat buffer is not a whole number of points.
    InvalidDimensions(usize),

    /// Input data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// Fewer training points than terms in the local polynomial.
    TooFewPoints {
        /// Number of training points provided.
        got: usize,
        /// Number of polynomial terms, the minimum for a solvable fit.
        min: usize,
    },

    /// Bandwidth must be positive and finite.
    InvalidBandwidth(f64),

    /// Polynomial degree exceeds the supported maximum.
    InvalidDegree(usize),

    /// Robustness iteration count exceeds the supported maximum.
    InvalidIterations(usize),

    /// Minkowski exponent must be finite and >= 1.
    InvalidMinkowskiPower(f64),

    /// Per-dimension metric weights are malformed.
    InvalidMetricWeights(String),

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },

    /// The local fit at a query point failed and the policy is to abort.
    DegenerateFit {
        /// Index of the query point.
        index: usize,
        /// Why the fit failed.
        reason: DegenerateFit,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for LowessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input arrays are empty"),
            Self::MismatchedInputs { x_len, y_len } => {
                write!(f, "Length mismatch: x has {x_len} points, y has {y_len}")
            }
            Self::DimensionMismatch { expected, got } => {
                write!(f, "Dimension mismatch: expected {expected}, got {got}")
            }
            Self::InconsistentDimensions { row, expected, got } => {
                write!(
                    f,
                    "Inconsistent dimensions: row {row} has {got} coordinates, expected {expected}"
                )
            }
            Self::InvalidDimensions(d) => write!(f, "Invalid dimensions: {d}"),
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::TooFewPoints { got, min } => {
                write!(f, "Too few points: got {got}, need at least {min}")
            }
            Self::InvalidBandwidth(bw) => {
                write!(f, "Invalid bandwidth: {bw} (must be > 0 and finite)")
            }
            Self::InvalidDegree(deg) => {
                write!(f, "Invalid degree: {deg} (must be in [0, 10])")
            }
            Self::InvalidIterations(iter) => {
                write!(f, "Invalid iterations: {iter} (must be in [0, 100])")
            }
            Self::InvalidMinkowskiPower(p) => {
                write!(f, "Invalid Minkowski power: {p} (must be >= 1 and finite)")
            }
            Self::InvalidMetricWeights(msg) => write!(f, "Invalid metric weights: {msg}"),
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
            Self::DegenerateFit { index, reason } => {
                write!(f, "Local fit failed at query point {index}: {reason}")
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for LowessError {}
