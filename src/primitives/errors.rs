//! Error types for kernel evaluation and covariance operators.
//!
//! ## Purpose
//!
//! This module defines the single error type returned by every fallible
//! operation in the crate: input validation, hyperparameter lookup,
//! Gram matrix construction and covariance-operator factorizations.
//!
//! ## Design notes
//!
//! * **no_std**: `Display` is implemented by hand; `std::error::Error` is
//!   only implemented with the `std` feature.
//! * **Structured**: Variants carry the offending sizes or names so callers
//!   can report them without string parsing.
//!
//! ## Non-goals
//!
//! * This module does not perform validation itself (see `Validator`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

use core::fmt;

// ============================================================================
// Kernel Error
// ============================================================================

/// Errors raised while evaluating kernels or manipulating covariance operators.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Input matrix or vector has no elements.
    EmptyInput,

    /// Two inputs disagree on their feature dimension.
    DimensionMismatch {
        /// Dimension of the left operand.
        left: usize,
        /// Dimension of the right operand.
        right: usize,
    },

    /// An active dimension indexes past the input's feature columns.
    ActiveDimOutOfRange {
        /// Offending active dimension.
        dim: usize,
        /// Number of feature columns in the input.
        input_dims: usize,
    },

    /// Kernel was configured with an empty active-dimension set.
    EmptyActiveDims,

    /// A required hyperparameter is absent from the parameter set.
    MissingParameter(String),

    /// A hyperparameter has the wrong number of entries.
    InvalidParameterShape {
        /// Parameter name.
        name: String,
        /// Accepted length (a length of 1 is always accepted for broadcasting).
        expected: usize,
        /// Length that was supplied.
        got: usize,
    },

    /// A hyperparameter that must be strictly positive is not.
    NonPositiveParameter {
        /// Parameter name.
        name: String,
        /// Offending value.
        value: f64,
    },

    /// Polynomial degree does not fit the exponent range.
    InvalidDegree(usize),

    /// Leaf parameters were passed to a combination kernel or vice versa.
    ParameterStructure(&'static str),

    /// Combination kernel received a parameter list of the wrong length.
    ParameterCountMismatch {
        /// Number of kernels in the kernel set.
        expected: usize,
        /// Number of parameter entries supplied.
        got: usize,
    },

    /// A square matrix was required.
    NonSquareMatrix {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },

    /// A symmetric matrix was required.
    NonSymmetricMatrix,

    /// Two operands have incompatible shapes.
    ShapeMismatch {
        /// Shape of the left operand.
        left: (usize, usize),
        /// Shape of the right operand.
        right: (usize, usize),
    },

    /// Cholesky factorization failed because the matrix is not positive-definite.
    NotPositiveDefinite,

    /// A matrix decomposition did not converge.
    DecompositionFailed(&'static str),

    /// A graph kernel input is not a valid vertex index.
    InvalidVertex {
        /// Value found in the input.
        value: f64,
        /// Number of vertices in the graph.
        num_vertex: usize,
    },

    /// NaN or infinite value found in the input.
    InvalidNumericValue(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Input is empty"),
            Self::DimensionMismatch { left, right } => write!(
                f,
                "Dimension mismatch: left input has {} features, right has {}",
                left, right
            ),
            Self::ActiveDimOutOfRange { dim, input_dims } => write!(
                f,
                "Active dimension {} out of range for input with {} features",
                dim, input_dims
            ),
            Self::EmptyActiveDims => write!(f, "Active dimensions must not be empty"),
            Self::MissingParameter(name) => write!(f, "Missing parameter: '{}'", name),
            Self::InvalidParameterShape {
                name,
                expected,
                got,
            } => write!(
                f,
                "Invalid shape for parameter '{}': got {} values (expected 1 or {})",
                name, got, expected
            ),
            Self::NonPositiveParameter { name, value } => write!(
                f,
                "Parameter '{}' must be positive, got {}",
                name, value
            ),
            Self::InvalidDegree(degree) => write!(f, "Invalid polynomial degree: {}", degree),
            Self::ParameterStructure(msg) => write!(f, "Invalid parameter structure: {}", msg),
            Self::ParameterCountMismatch { expected, got } => write!(
                f,
                "Parameter count mismatch: kernel set has {} kernels, got {} parameter sets",
                expected, got
            ),
            Self::NonSquareMatrix { rows, cols } => {
                write!(f, "Matrix must be square, got {}x{}", rows, cols)
            }
            Self::NonSymmetricMatrix => write!(f, "Matrix must be symmetric"),
            Self::ShapeMismatch { left, right } => write!(
                f,
                "Shape mismatch: {}x{} vs {}x{}",
                left.0, left.1, right.0, right.1
            ),
            Self::NotPositiveDefinite => write!(f, "Matrix is not positive-definite"),
            Self::DecompositionFailed(which) => write!(f, "{} decomposition failed", which),
            Self::InvalidVertex { value, num_vertex } => write!(
                f,
                "Invalid vertex index {} (graph has {} vertices)",
                value, num_vertex
            ),
            Self::InvalidNumericValue(msg) => write!(f, "Invalid numeric value: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for KernelError {}
