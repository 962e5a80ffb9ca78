//! Layer 4: Engine
//!
//! ## Purpose
//!
//! This layer validates inputs and parameters, runs the per-query fitting
//! loop, and defines the result type handed back to callers.
//!
//! Architecture:
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Input and parameter validation.
pub mod validator;

/// Per-query execution loop.
pub mod executor;

/// Result type.
pub mod output;
