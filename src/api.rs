//! High-level API for building covariance matrices.
//!
//! ## Purpose
//!
//! This module is the user-facing entry point. It re-exports the kernel
//! types, covariance operators and parameter utilities, and offers free
//! functions that take the kernel as an argument.
//!
//! ## Key concepts
//!
//! * **Kernel first**: `gram(&kernel, &x, &params)` is equivalent to
//!   `kernel.gram(&x, &params)`; the free form reads better when the kernel
//!   is held as a trait object.
//! * **Parameter lifecycle**: `initialise` produces parameters, trainability
//!   flags and bijectors; `unconstrain` moves parameters to the real line
//!   for optimization and `constrain` maps them back.

// Internal dependencies
use crate::math::linalg::FloatLinalg;

// Publicly re-exported types
pub use crate::kernels::combination::{CombinationKernel, Combinator, ProductKernel, SumKernel};
pub use crate::kernels::graph::{EigenKernel, GraphKernel};
pub use crate::kernels::polynomial::Polynomial;
pub use crate::kernels::stationary::{Matern12, Matern32, Matern52, StationaryProfile, RBF};
pub use crate::kernels::{ActiveDims, Kernel};
pub use crate::math::distance::{euclidean_distance, squared_distance};
pub use crate::operators::covariance::{identity, CovarianceOperator, DEFAULT_JITTER};
pub use crate::parameters::bijectors::{constrain, unconstrain, Bijector, BijectorConfig, Bijectors};
pub use crate::parameters::params::{KernelParams, ParamSet, ParamTree};
pub use crate::parameters::state::{initialise, initialise_with, ParameterState, Trainables};
pub use crate::primitives::errors::KernelError;
pub use crate::primitives::key::PrngKey;
pub use crate::primitives::matrix::Matrix;

/// Gram matrix of `x` under `kernel`.
///
/// ```
/// use gp_kernels::prelude::*;
///
/// let kernel = RBF::new();
/// let params = kernel.init_params(PrngKey::new(123));
/// let x = Matrix::linspace(-1.0, 1.0, 10, 1);
///
/// let kxx = gram(&kernel, &x, &params)?;
/// assert_eq!(kxx.shape(), (10, 10));
/// # Result::<(), KernelError>::Ok(())
/// ```
pub fn gram<T, K>(kernel: &K, x: &Matrix<T>, params: &KernelParams<T>) -> Result<CovarianceOperator<T>, KernelError>
where
    T: FloatLinalg,
    K: Kernel<T> + ?Sized,
{
    kernel.gram(x, params)
}

/// Cross-covariance between the rows of `a` and `b` under `kernel`.
///
/// The result has shape `(a.rows(), b.rows())`.
pub fn cross_covariance<T, K>(
    kernel: &K,
    a: &Matrix<T>,
    b: &Matrix<T>,
    params: &KernelParams<T>,
) -> Result<Matrix<T>, KernelError>
where
    T: FloatLinalg,
    K: Kernel<T> + ?Sized,
{
    kernel.cross_covariance(a, b, params)
}
