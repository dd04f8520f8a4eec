//! Layer 1: Primitives
//!
//! # Purpose
//!
//! Basic data structures shared by every other layer:
//! - Dense row-major matrices
//! - PRNG keys for parameter initialization
//! - The crate error type
//! - Input and parameter validation

/// Error type.
pub mod errors;

/// PRNG key.
pub mod key;

/// Dense matrix storage.
pub mod matrix;

/// Input and parameter validation.
pub mod validator;
