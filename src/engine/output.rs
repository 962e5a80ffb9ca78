//! Output types and result structures for LOWESS operations.
//!
//! ## Purpose
//!
//! This module defines the `LowessResult` struct which carries the fitted
//! values at every query point together with the failures encountered and
//! the parameters the fit was run with.
//!
//! ## Design notes
//!
//! * **Order**: `fitted[i]` belongs to query point `i`.
//! * **Failures**: A failed query keeps its slot (NaN) and is listed with its reason.
//! * **Ergonomics**: Implements `Display` for human-readable output.
//!
//! ## Invariants
//!
//! * `fitted` has one entry per query point.
//! * `failures` is sorted by query index, and every listed index holds NaN.
//! * Robustness weights, when present, are in [0, 1] with one per training point.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result};
use core::slice::Iter;
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::DegenerateFit;

// ============================================================================
// Result Structure
// ============================================================================

/// LOWESS output: fitted values at the query points plus fit metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct LowessResult<T> {
    /// Fitted value at each query point, in query order.
    pub fitted: Vec<T>,

    /// Query points whose local fit failed, with the reason.
    pub failures: Vec<(usize, DegenerateFit)>,

    /// Dimensionality of the input space.
    pub dimensions: usize,

    /// Bandwidth used for the fit.
    pub bandwidth: T,

    /// Polynomial degree of the local model.
    pub degree: usize,

    /// Per-training-point robustness weights (global robustness only).
    pub robustness_weights: Option<Vec<T>>,
}

impl<T: Float> LowessResult<T> {
    // ========================================================================
    // Query Methods
    // ========================================================================

    /// `true` when every query point was fitted.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of query points.
    pub fn len(&self) -> usize {
        self.fitted.len()
    }

    /// `true` when there were no query points.
    pub fn is_empty(&self) -> bool {
        self.fitted.is_empty()
    }

    /// Iterate over the fitted values in query order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.fitted.iter()
    }

    /// Consume the result, keeping only the fitted values.
    pub fn into_fitted(self) -> Vec<T> {
        self.fitted
    }
}

impl<'a, T> IntoIterator for &'a LowessResult<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.fitted.iter()
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display> Display for LowessResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Query points: {}", self.fitted.len())?;
        writeln!(f, "  Dimensions:   {}", self.dimensions)?;
        writeln!(f, "  Bandwidth:    {}", self.bandwidth)?;
        writeln!(f, "  Degree:       {}", self.degree)?;
        if self.robustness_weights.is_some() {
            writeln!(f, "  Robustness:   Global")?;
        }
        if !self.failures.is_empty() {
            writeln!(f, "  Failed fits:  {}", self.failures.len())?;
        }
        writeln!(f)?;

        writeln!(f, "Fitted Values:")?;
        writeln!(f, "{:>8} {:>12}", "Index", "Fitted")?;
        writeln!(f, "{:-<21}", "")?;

        // Show first 10 and last 10 if more than 20 points
        let n = self.fitted.len();
        let rows_to_show: Vec<usize> = if n <= 20 {
            (0..n).collect()
        } else {
            (0..10).chain(n - 10..n).collect()
        };

        let mut prev_idx = 0;
        for (i, &idx) in rows_to_show.iter().enumerate() {
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, "{:>8}", "...")?;
            }
            prev_idx = idx;
            writeln!(f, "{:>8} {:>12.6}", idx, self.fitted[idx])?;
        }

        if !self.failures.is_empty() {
            writeln!(f)?;
            writeln!(f, "Failures:")?;
            for (idx, reason) in &self.failures {
                writeln!(f, "{:>8} {}", idx, reason)?;
            }
        }

        Ok(())
    }
}
