//! Input validation for kernel inputs and hyperparameters.
//!
//! ## Purpose
//!
//! This module provides the validation functions run before kernels touch
//! their inputs: non-empty and finite inputs, matching feature dimensions,
//! active dimensions within range, symmetric Laplacians and well-shaped,
//! strictly positive hyperparameters.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not slice, transform, or repair inputs.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, string::ToString};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::KernelError;
use crate::primitives::matrix::Matrix;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for kernel inputs and parameters.
///
/// All methods return `Result<(), KernelError>` and fail fast upon
/// identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Input Validation
    // ========================================================================

    /// Validate an `n x D` input matrix.
    pub fn validate_inputs<T: Float>(x: &Matrix<T>) -> Result<(), KernelError> {
        // Check 1: Non-empty
        if x.is_empty() {
            return Err(KernelError::EmptyInput);
        }

        // Check 2: All values finite
        Self::validate_finite(x.as_slice(), "x")
    }

    /// Validate a pair of input matrices that are compared feature by feature.
    pub fn validate_input_pair<T: Float>(a: &Matrix<T>, b: &Matrix<T>) -> Result<(), KernelError> {
        if a.cols() != b.cols() {
            return Err(KernelError::DimensionMismatch {
                left: a.cols(),
                right: b.cols(),
            });
        }
        Self::validate_inputs(a)?;
        Self::validate_inputs(b)
    }

    /// Validate a pair of single points.
    pub fn validate_points<T: Float>(x: &[T], y: &[T]) -> Result<(), KernelError> {
        if x.is_empty() || y.is_empty() {
            return Err(KernelError::EmptyInput);
        }
        if x.len() != y.len() {
            return Err(KernelError::DimensionMismatch {
                left: x.len(),
                right: y.len(),
            });
        }
        Self::validate_finite(x, "x")?;
        Self::validate_finite(y, "y")
    }

    /// Validate that every value is finite.
    pub fn validate_finite<T: Float>(values: &[T], name: &str) -> Result<(), KernelError> {
        for (i, &val) in values.iter().enumerate() {
            if !val.is_finite() {
                return Err(KernelError::InvalidNumericValue(format!(
                    "{}[{}]={}",
                    name,
                    i,
                    val.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }
        Ok(())
    }

    /// Validate that a matrix is square.
    pub fn validate_square<T: Float>(m: &Matrix<T>) -> Result<(), KernelError> {
        let (rows, cols) = m.shape();
        if rows != cols {
            return Err(KernelError::NonSquareMatrix { rows, cols });
        }
        Ok(())
    }

    /// Validate that a square matrix is symmetric within `tol`.
    pub fn validate_symmetric<T: Float>(m: &Matrix<T>, tol: T) -> Result<(), KernelError> {
        Self::validate_square(m)?;
        if !m.is_symmetric(tol) {
            return Err(KernelError::NonSymmetricMatrix);
        }
        Ok(())
    }

    // ========================================================================
    // Configuration Validation
    // ========================================================================

    /// Validate active dimensions against the number of input features.
    pub fn validate_active_dims(dims: &[usize], input_dims: usize) -> Result<(), KernelError> {
        if dims.is_empty() {
            return Err(KernelError::EmptyActiveDims);
        }
        if let Some(&dim) = dims.iter().find(|&&d| d >= input_dims) {
            return Err(KernelError::ActiveDimOutOfRange { dim, input_dims });
        }
        Ok(())
    }

    /// Validate a hyperparameter: finite, and either scalar or of length `ndims`.
    pub fn validate_parameter<T: Float>(
        name: &str,
        values: &[T],
        ndims: usize,
    ) -> Result<(), KernelError> {
        if values.len() != 1 && values.len() != ndims {
            return Err(KernelError::InvalidParameterShape {
                name: name.to_string(),
                expected: ndims,
                got: values.len(),
            });
        }
        Self::validate_finite(values, name)
    }

    /// Validate a hyperparameter that must be strictly positive.
    pub fn validate_positive_parameter<T: Float>(
        name: &str,
        values: &[T],
        ndims: usize,
    ) -> Result<(), KernelError> {
        Self::validate_parameter(name, values, ndims)?;
        if let Some(&val) = values.iter().find(|&&v| v <= T::zero()) {
            return Err(KernelError::NonPositiveParameter {
                name: name.to_string(),
                value: val.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(())
    }
}
