//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used by the estimator:
//! - Kernel functions for distance-based weighting
//! - Distance metrics between points
//! - The weighted normal-equation solver
//! - Robust scale estimates (median, MAD, MAR)
//!
//! These are reusable mathematical building blocks with no algorithm-specific logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Kernel (weight) functions for distance-based weighting.
pub mod kernel;

/// Distance metrics between points.
pub mod distance;

/// Normal-equation solver backed by nalgebra.
pub mod linalg;

/// Median and median absolute deviation.
pub mod mad;

/// Residual scale estimation.
pub mod scaling;
