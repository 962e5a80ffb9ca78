//! Median-based scale estimates for residuals.
//!
//! ## Design notes
//!
//! * **Algorithm**: Quickselect (`select_nth_unstable_by`) for O(n) medians.
//! * **In-place**: Callers pass a scratch slice that is reordered and overwritten.
//!
//! ## Invariants
//!
//! * Results are >= 0 for any finite input.
//! * Even and odd lengths are both handled (even: mean of the two middle values).

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

/// Median of `vals`, reordering the slice. Zero for an empty slice.
#[inline]
pub fn median_inplace<T: Float>(vals: &mut [T]) -> T {
    let n = vals.len();
    if n == 0 {
        return T::zero();
    }

    let mid = n / 2;
    vals.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Equal));
    let upper = vals[mid];

    if n % 2 == 1 {
        return upper;
    }

    // After selection every element left of `mid` is <= upper.
    let lower = vals[..mid].iter().copied().fold(T::neg_infinity(), T::max);
    (lower + upper) / (T::one() + T::one())
}

/// Median absolute deviation: median(|rᵢ - median(r)|).
#[inline]
pub fn compute_mad<T: Float>(vals: &mut [T]) -> T {
    let median = median_inplace(vals);
    for v in vals.iter_mut() {
        *v = (*v - median).abs();
    }
    median_inplace(vals)
}

/// Median absolute residual: median(|rᵢ|).
#[inline]
pub fn compute_mar<T: Float>(vals: &mut [T]) -> T {
    for v in vals.iter_mut() {
        *v = v.abs();
    }
    median_inplace(vals)
}
