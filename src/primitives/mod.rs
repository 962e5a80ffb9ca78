//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the fundamental data structures shared by every other
//! layer:
//! - The error type and degenerate-fit reasons
//! - Normalization of caller inputs into row-major points
//! - Reusable scratch buffers for local fits
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error types.
pub mod errors;

/// Input shape normalization.
pub mod input;

/// Per-fit scratch buffers.
pub mod buffer;
