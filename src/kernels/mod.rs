//! Layer 4: Kernels
//!
//! ## Purpose
//!
//! This layer defines the `Kernel` trait and its implementations:
//! stationary kernels (RBF and the Matérn family), the polynomial kernel,
//! the graph (spectral) kernel and sum/product combinations.
//!
//! ## Design notes
//!
//! * **Two required methods**: A kernel only has to say how to compare two
//!   points (`compute`) and what its default hyperparameters are
//!   (`init_params`). Gram and cross-covariance matrices, input slicing and
//!   validation are provided.
//! * **Active dimensions**: Inputs are restricted to the kernel's active
//!   columns before `compute` sees them. Order is preserved, so
//!   `active_dims = [3, 1]` is identical to slicing `x[.., [3, 1]]` and using
//!   `active_dims = [0, 1]`.
//! * **Trait objects**: `Kernel<T>` is object safe so that combination
//!   kernels can hold heterogeneous kernel sets.
//!
//! ## Invariants
//!
//! * `gram(x)` has shape `(n, n)` for `n` input rows and is exactly symmetric.
//! * `cross_covariance(a, b)` has shape `(a.rows(), b.rows())`.
//! * `ard()` is true exactly when the kernel has more than one active dimension.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Kernels ← You are here
//!   ↓
//! Layer 3: Operators
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{
    borrow::Cow,
    string::{String, ToString},
    vec::Vec,
};
#[cfg(feature = "std")]
use std::{borrow::Cow, string::String, vec::Vec};

use core::fmt::Debug;

// Internal dependencies
use crate::math::linalg::FloatLinalg;
use crate::operators::covariance::CovarianceOperator;
use crate::parameters::params::KernelParams;
use crate::primitives::errors::KernelError;
use crate::primitives::key::PrngKey;
use crate::primitives::matrix::Matrix;
use crate::primitives::validator::Validator;

/// Sum and product kernels.
pub mod combination;

/// Graph (spectral) kernels.
pub mod graph;

/// Polynomial kernel.
pub mod polynomial;

/// RBF and Matérn kernels.
pub mod stationary;

// ============================================================================
// Active Dimensions
// ============================================================================

/// Ordered set of input columns a kernel operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDims(Vec<usize>);

impl Default for ActiveDims {
    fn default() -> Self {
        Self(vec![0])
    }
}

impl ActiveDims {
    /// Create from column indices.
    pub fn new<I: IntoIterator<Item = usize>>(dims: I) -> Self {
        Self(dims.into_iter().collect())
    }

    /// The first `n` columns, `[0, 1, ..., n - 1]`.
    pub fn first(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// Column indices.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Number of active dimensions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no dimension is active.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Restrict a point to the active dimensions.
    pub fn slice_point<T: Copy>(&self, x: &[T]) -> Result<Vec<T>, KernelError> {
        Validator::validate_active_dims(&self.0, x.len())?;
        Ok(self.0.iter().map(|&d| x[d]).collect())
    }

    /// Restrict every row of `x` to the active dimensions.
    pub fn slice<T: FloatLinalg>(&self, x: &Matrix<T>) -> Result<Matrix<T>, KernelError> {
        Validator::validate_active_dims(&self.0, x.cols())?;
        x.select_columns(&self.0)
    }
}

impl From<Vec<usize>> for ActiveDims {
    fn from(dims: Vec<usize>) -> Self {
        Self(dims)
    }
}

impl<const N: usize> From<[usize; N]> for ActiveDims {
    fn from(dims: [usize; N]) -> Self {
        Self(dims.to_vec())
    }
}

impl From<&[usize]> for ActiveDims {
    fn from(dims: &[usize]) -> Self {
        Self(dims.to_vec())
    }
}

// ============================================================================
// Kernel Trait
// ============================================================================

/// A positive-definite covariance function.
///
/// Implementors provide [`Kernel::compute`] and [`Kernel::init_params`];
/// everything else has a default built on those two.
///
/// ```
/// use gp_kernels::prelude::*;
///
/// #[derive(Debug)]
/// struct Linear;
///
/// impl Kernel<f64> for Linear {
///     fn compute(&self, x: &[f64], y: &[f64], params: &KernelParams<f64>) -> Result<f64, KernelError> {
///         let scale = params.leaf()?.scalar("scale")?;
///         Ok(scale * x.iter().zip(y).map(|(a, b)| a * b).sum::<f64>())
///     }
///
///     fn init_params(&self, _key: PrngKey) -> KernelParams<f64> {
///         ParamSet::new().with("scale", vec![1.0]).into()
///     }
/// }
///
/// let params = Linear.init_params(PrngKey::new(0));
/// assert_eq!(Linear.evaluate(&[2.0], &[3.0], &params)?, 6.0);
/// # Result::<(), KernelError>::Ok(())
/// ```
pub trait Kernel<T: FloatLinalg>: Debug + Send + Sync {
    /// Covariance between two points already restricted to the active dimensions.
    fn compute(&self, x: &[T], y: &[T], params: &KernelParams<T>) -> Result<T, KernelError>;

    /// Default hyperparameters.
    fn init_params(&self, key: PrngKey) -> KernelParams<T>;

    /// Human-readable kernel name.
    fn name(&self) -> String {
        "Kernel".to_string()
    }

    /// Columns this kernel reads; `None` means every column.
    fn dims(&self) -> Option<&ActiveDims> {
        None
    }

    /// Number of active dimensions.
    fn ndims(&self) -> usize {
        self.dims().map_or(1, ActiveDims::len)
    }

    /// Whether lengthscales are per-dimension (automatic relevance determination).
    fn ard(&self) -> bool {
        self.ndims() > 1
    }

    /// Whether the kernel depends only on `x - y`.
    fn stationary(&self) -> bool {
        false
    }

    /// Whether the kernel is defined through a spectral decomposition.
    fn spectral(&self) -> bool {
        false
    }

    /// Restrict inputs to the active dimensions.
    fn slice_input<'a>(&self, x: &'a Matrix<T>) -> Result<Cow<'a, Matrix<T>>, KernelError> {
        match self.dims() {
            Some(dims) => Ok(Cow::Owned(dims.slice(x)?)),
            None => Ok(Cow::Borrowed(x)),
        }
    }

    /// Covariance between two raw points.
    ///
    /// Both points are restricted to the active dimensions first.
    fn evaluate(&self, x: &[T], y: &[T], params: &KernelParams<T>) -> Result<T, KernelError> {
        Validator::validate_points(x, y)?;
        match self.dims() {
            Some(dims) => self.compute(&dims.slice_point(x)?, &dims.slice_point(y)?, params),
            None => self.compute(x, y, params),
        }
    }

    /// Gram matrix of `x` with itself.
    fn gram(&self, x: &Matrix<T>, params: &KernelParams<T>) -> Result<CovarianceOperator<T>, KernelError> {
        Validator::validate_inputs(x)?;
        let xs = self.slice_input(x)?;
        let n = xs.rows();

        let mut kxx = Matrix::zeros(n, n);
        for i in 0..n {
            for j in i..n {
                let k = self.compute(xs.row(i), xs.row(j), params)?;
                kxx[(i, j)] = k;
                kxx[(j, i)] = k;
            }
        }
        log::debug!("{}: gram {}x{}", self.name(), n, n);
        CovarianceOperator::from_dense(kxx)
    }

    /// Cross-covariance between the rows of `a` and the rows of `b`.
    fn cross_covariance(
        &self,
        a: &Matrix<T>,
        b: &Matrix<T>,
        params: &KernelParams<T>,
    ) -> Result<Matrix<T>, KernelError> {
        Validator::validate_input_pair(a, b)?;
        let a_s = self.slice_input(a)?;
        let b_s = self.slice_input(b)?;

        let mut kab = Matrix::zeros(a_s.rows(), b_s.rows());
        for (i, x) in a_s.row_iter().enumerate() {
            for (j, y) in b_s.row_iter().enumerate() {
                kab[(i, j)] = self.compute(x, y, params)?;
            }
        }
        Ok(kab)
    }
}

impl<T: FloatLinalg, K: Kernel<T> + ?Sized> Kernel<T> for Box<K> {
    fn compute(&self, x: &[T], y: &[T], params: &KernelParams<T>) -> Result<T, KernelError> {
        (**self).compute(x, y, params)
    }

    fn init_params(&self, key: PrngKey) -> KernelParams<T> {
        (**self).init_params(key)
    }

    fn name(&self) -> String {
        (**self).name()
    }

    fn dims(&self) -> Option<&ActiveDims> {
        (**self).dims()
    }

    fn ndims(&self) -> usize {
        (**self).ndims()
    }

    fn ard(&self) -> bool {
        (**self).ard()
    }

    fn stationary(&self) -> bool {
        (**self).stationary()
    }

    fn spectral(&self) -> bool {
        (**self).spectral()
    }

    fn evaluate(&self, x: &[T], y: &[T], params: &KernelParams<T>) -> Result<T, KernelError> {
        (**self).evaluate(x, y, params)
    }

    fn gram(&self, x: &Matrix<T>, params: &KernelParams<T>) -> Result<CovarianceOperator<T>, KernelError> {
        (**self).gram(x, params)
    }

    fn cross_covariance(
        &self,
        a: &Matrix<T>,
        b: &Matrix<T>,
        params: &KernelParams<T>,
    ) -> Result<Matrix<T>, KernelError> {
        (**self).cross_covariance(a, b, params)
    }
}
