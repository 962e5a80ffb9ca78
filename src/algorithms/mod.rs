//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer implements the fitting algorithms:
//! - The local weighted polynomial fit at a single query point
//! - Robustness weights computed from residuals
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Local weighted polynomial regression.
pub mod regression;

/// Robustness weights for outlier downweighting.
pub mod robustness;
