//! Input abstractions for LOWESS estimation.
//!
//! ## Purpose
//!
//! This module normalizes the shapes callers hand to the estimator into a
//! single row-major view: `n_points` rows of `dimensions` coordinates each.
//! Flat scalar sequences are the one-dimensional convenience case.
//!
//! ## Design notes
//!
//! * **Zero-copy where possible**: Flat slices and `[[T; D]]` are borrowed;
//!   nested `Vec`s are flattened once.
//! * **Concrete impls**: Implemented for `f32` and `f64` so that the scalar and
//!   array-of-points forms do not overlap.
//!
//! ## Invariants
//!
//! * `data.len() == n_points * dimensions` and `dimensions >= 1`.
//! * Every nested row has the same length.
//!
//! ## Non-goals
//!
//! * This module does not check values for finiteness (handled by `validator`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{borrow::Cow, vec::Vec};
#[cfg(feature = "std")]
use std::{borrow::Cow, vec::Vec};

// External dependencies
use core::slice::ChunksExact;
#[cfg(feature = "ndarray")]
use ndarray::{ArrayBase, Data, Ix1, Ix2};

// Internal dependencies
use crate::primitives::errors::LowessError;

// ============================================================================
// Points
// ============================================================================

/// A set of points stored row-major: point `i` is `data[i*d..(i+1)*d]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Points<'a, T: Clone> {
    data: Cow<'a, [T]>,
    dimensions: usize,
}

impl<'a, T: Clone> Points<'a, T> {
    /// Borrow a flat row-major buffer as points of the given dimensionality.
    pub fn from_flat(data: &'a [T], dimensions: usize) -> Result<Self, LowessError> {
        Self::new(Cow::Borrowed(data), dimensions)
    }

    /// Take ownership of a flat row-major buffer.
    pub fn from_vec(data: Vec<T>, dimensions: usize) -> Result<Self, LowessError> {
        Self::new(Cow::Owned(data), dimensions)
    }

    fn new(data: Cow<'a, [T]>, dimensions: usize) -> Result<Self, LowessError> {
        if dimensions == 0 || data.len() % dimensions != 0 {
            return Err(LowessError::InvalidDimensions(dimensions));
        }
        Ok(Self { data, dimensions })
    }

    /// Number of coordinates per point.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() / self.dimensions
    }

    /// Returns `true` if there are no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The flat row-major coordinate buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Coordinates of point `i`.
    #[inline]
    pub fn point(&self, i: usize) -> &[T] {
        let d = self.dimensions;
        &self.data[i * d..(i + 1) * d]
    }

    /// Iterate over points as coordinate slices.
    #[inline]
    pub fn iter(&self) -> ChunksExact<'_, T> {
        self.data.chunks_exact(self.dimensions)
    }

    /// A borrowed view of the same points.
    #[inline]
    pub fn view(&self) -> Points<'_, T> {
        Points {
            data: Cow::Borrowed(&self.data),
            dimensions: self.dimensions,
        }
    }
}

// ============================================================================
// LowessInput Trait
// ============================================================================

/// Types that can be used as training or query points.
pub trait LowessInput<T: Clone> {
    /// View the input as row-major points.
    fn to_points(&self) -> Result<Points<'_, T>, LowessError>;
}

impl<T: Clone> LowessInput<T> for Points<'_, T> {
    fn to_points(&self) -> Result<Points<'_, T>, LowessError> {
        Ok(self.view())
    }
}

/// Flatten nested rows, requiring every row to have the first row's length.
fn flatten_rows<T, R>(rows: &[R]) -> Result<Points<'static, T>, LowessError>
where
    T: Clone + 'static,
    R: AsRef<[T]>,
{
    let Some(first) = rows.first() else {
        return Points::from_vec(Vec::new(), 1);
    };
    let d = first.as_ref().len();
    let mut data = Vec::with_capacity(rows.len() * d);
    for (row, r) in rows.iter().enumerate() {
        let r = r.as_ref();
        if r.len() != d {
            return Err(LowessError::InconsistentDimensions {
                row,
                expected: d,
                got: r.len(),
            });
        }
        data.extend_from_slice(r);
    }
    Points::from_vec(data, d)
}

macro_rules! impl_lowess_input {
    ($t:ty) => {
        impl LowessInput<$t> for [$t] {
            fn to_points(&self) -> Result<Points<'_, $t>, LowessError> {
                Points::from_flat(self, 1)
            }
        }

        impl LowessInput<$t> for Vec<$t> {
            fn to_points(&self) -> Result<Points<'_, $t>, LowessError> {
                Points::from_flat(self.as_slice(), 1)
            }
        }

        impl<const N: usize> LowessInput<$t> for [$t; N] {
            fn to_points(&self) -> Result<Points<'_, $t>, LowessError> {
                Points::from_flat(self.as_slice(), 1)
            }
        }

        impl<const N: usize, const D: usize> LowessInput<$t> for [[$t; D]; N] {
            fn to_points(&self) -> Result<Points<'_, $t>, LowessError> {
                Points::from_flat(self.as_flattened(), D)
            }
        }

        impl<const D: usize> LowessInput<$t> for [[$t; D]] {
            fn to_points(&self) -> Result<Points<'_, $t>, LowessError> {
                Points::from_flat(self.as_flattened(), D)
            }
        }

        impl<const D: usize> LowessInput<$t> for Vec<[$t; D]> {
            fn to_points(&self) -> Result<Points<'_, $t>, LowessError> {
                Points::from_flat(self.as_flattened(), D)
            }
        }

        impl LowessInput<$t> for [Vec<$t>] {
            fn to_points(&self) -> Result<Points<'_, $t>, LowessError> {
                flatten_rows(self)
            }
        }

        impl LowessInput<$t> for Vec<Vec<$t>> {
            fn to_points(&self) -> Result<Points<'_, $t>, LowessError> {
                flatten_rows(self)
            }
        }

        #[cfg(feature = "ndarray")]
        impl<S> LowessInput<$t> for ArrayBase<S, Ix1>
        where
            S: Data<Elem = $t>,
        {
            fn to_points(&self) -> Result<Points<'_, $t>, LowessError> {
                match self.as_slice() {
                    Some(s) => Points::from_flat(s, 1),
                    None => Points::from_vec(self.iter().copied().collect(), 1),
                }
            }
        }

        #[cfg(feature = "ndarray")]
        impl<S> LowessInput<$t> for ArrayBase<S, Ix2>
        where
            S: Data<Elem = $t>,
        {
            fn to_points(&self) -> Result<Points<'_, $t>, LowessError> {
                let d = self.ncols();
                match self.as_slice() {
                    Some(s) => Points::from_flat(s, d),
                    // Column-major or strided: copy rows out in logical order.
                    None => Points::from_vec(self.iter().copied().collect(), d),
                }
            }
        }
    };
}

impl_lowess_input!(f32);
impl_lowess_input!(f64);
