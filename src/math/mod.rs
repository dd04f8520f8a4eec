//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used throughout the crate:
//! - Euclidean distances between (scaled) input points
//! - A nalgebra-backed bridge for eigendecomposition and Cholesky solves
//!
//! These are reusable mathematical building blocks with no kernel-specific logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Kernels
//!   ↓
//! Layer 3: Operators
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Distances between input points.
pub mod distance;

/// Linear algebra backend.
pub mod linalg;
