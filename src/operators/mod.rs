//! Layer 3: Operators
//!
//! # Purpose
//!
//! Implicit representations of covariance matrices (dense, diagonal,
//! identity) returned by Gram computations.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Kernels
//!   ↓
//! Layer 3: Operators ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Covariance operators and their algebra.
pub mod covariance;
