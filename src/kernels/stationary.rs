//! Stationary kernels: RBF and the Matérn family.
//!
//! ## Purpose
//!
//! This module implements the kernels whose covariance depends only on the
//! (lengthscale-scaled) distance between inputs.
//!
//! ## Design notes
//!
//! * **Shared profile**: The four kernels differ only in the function applied
//!   to the scaled distance (`StationaryProfile`); input scaling, parameter
//!   lookup and matrix assembly are shared.
//! * **Scale first**: Inputs are divided by the lengthscale before distances
//!   are taken, so point-wise evaluation and Gram assembly perform identical
//!   arithmetic.
//! * **ARD**: A lengthscale with one entry is broadcast over the active
//!   dimensions; one with `ndims` entries is applied per dimension.
//!
//! ## Key concepts
//!
//! With `τ = ‖x/ℓ - y/ℓ‖` and variance `σ²`:
//!
//! * **RBF**: `σ² exp(-τ²/2)`
//! * **Matérn 1/2**: `σ² exp(-τ)`
//! * **Matérn 3/2**: `σ² (1 + √3τ) exp(-√3τ)`
//! * **Matérn 5/2**: `σ² (1 + √5τ + 5τ²/3) exp(-√5τ)`
//!
//! ## Invariants
//!
//! * `k(x, x) = σ²` (up to the distance floor for Matérn kernels).
//! * Default parameters are `lengthscale = [1.0; ndims]`, `variance = [1.0]`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{
    string::{String, ToString},
    vec::Vec,
};
#[cfg(feature = "std")]
use std::{string::String, vec::Vec};

// Internal dependencies
use crate::kernels::{ActiveDims, Kernel};
use crate::math::distance::{
    distance_from_squared, pairwise_squared_distances, self_squared_distances, squared_distance,
};
use crate::math::linalg::FloatLinalg;
use crate::operators::covariance::CovarianceOperator;
use crate::parameters::params::{KernelParams, ParamSet};
use crate::primitives::errors::KernelError;
use crate::primitives::key::PrngKey;
use crate::primitives::matrix::Matrix;
use crate::primitives::validator::Validator;

// ============================================================================
// Stationary Profile
// ============================================================================

/// Covariance as a function of scaled squared distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationaryProfile {
    /// Squared exponential (RBF).
    SquaredExponential,

    /// Matérn with smoothness 1/2 (exponential).
    Matern12,

    /// Matérn with smoothness 3/2.
    Matern32,

    /// Matérn with smoothness 5/2.
    Matern52,
}

impl StationaryProfile {
    /// Covariance at scaled squared distance `sq_dist`.
    #[inline]
    pub fn covariance<T: FloatLinalg>(&self, sq_dist: T, variance: T) -> T {
        match self {
            Self::SquaredExponential => {
                let half = T::from(0.5).unwrap();
                variance * (-half * sq_dist).exp()
            }
            Self::Matern12 => {
                let tau = distance_from_squared(sq_dist);
                variance * (-tau).exp()
            }
            Self::Matern32 => {
                let tau = distance_from_squared(sq_dist);
                let s = T::from(3.0).unwrap().sqrt() * tau;
                variance * (T::one() + s) * (-s).exp()
            }
            Self::Matern52 => {
                let tau = distance_from_squared(sq_dist);
                let s = T::from(5.0).unwrap().sqrt() * tau;
                let quad = T::from(5.0 / 3.0).unwrap() * tau * tau;
                variance * (T::one() + s + quad) * (-s).exp()
            }
        }
    }
}

// ============================================================================
// Shared Configuration
// ============================================================================

/// Configuration shared by all stationary kernels.
#[derive(Debug, Clone, PartialEq)]
struct StationaryConfig<T> {
    dims: ActiveDims,
    lengthscale: T,
    variance: T,
}

/// Hyperparameters resolved for one call.
struct Resolved<T> {
    lengthscale: Vec<T>,
    variance: T,
}

impl<T: FloatLinalg> StationaryConfig<T> {
    fn new() -> Self {
        Self {
            dims: ActiveDims::default(),
            lengthscale: T::one(),
            variance: T::one(),
        }
    }

    fn init_params(&self) -> KernelParams<T> {
        ParamSet::new()
            .with("lengthscale", vec![self.lengthscale; self.dims.len()])
            .with("variance", vec![self.variance])
            .into()
    }

    fn resolve(&self, params: &KernelParams<T>) -> Result<Resolved<T>, KernelError> {
        let set = params.leaf()?;
        let ndims = self.dims.len();
        Validator::validate_positive_parameter("lengthscale", set.require("lengthscale")?, ndims)?;
        Validator::validate_positive_parameter("variance", set.require("variance")?, 1)?;
        let lengthscale = set.broadcast("lengthscale", ndims)?;
        let variance = set.scalar("variance")?;
        Ok(Resolved {
            lengthscale,
            variance,
        })
    }

    fn scale_point(x: &[T], lengthscale: &[T]) -> Vec<T> {
        x.iter().zip(lengthscale).map(|(&v, &l)| v / l).collect()
    }

    fn scale_rows(x: &Matrix<T>, lengthscale: &[T]) -> Matrix<T> {
        let mut out = x.clone();
        for i in 0..x.rows() {
            for (j, &l) in lengthscale.iter().enumerate() {
                out[(i, j)] = x[(i, j)] / l;
            }
        }
        out
    }

    fn compute(
        &self,
        profile: StationaryProfile,
        x: &[T],
        y: &[T],
        params: &KernelParams<T>,
    ) -> Result<T, KernelError> {
        if x.len() != y.len() {
            return Err(KernelError::DimensionMismatch {
                left: x.len(),
                right: y.len(),
            });
        }
        if x.len() != self.dims.len() {
            return Err(KernelError::DimensionMismatch {
                left: self.dims.len(),
                right: x.len(),
            });
        }
        let p = self.resolve(params)?;
        let xs = Self::scale_point(x, &p.lengthscale);
        let ys = Self::scale_point(y, &p.lengthscale);
        Ok(profile.covariance(squared_distance(&xs, &ys), p.variance))
    }

    fn gram(
        &self,
        profile: StationaryProfile,
        x: &Matrix<T>,
        params: &KernelParams<T>,
    ) -> Result<CovarianceOperator<T>, KernelError> {
        Validator::validate_inputs(x)?;
        let p = self.resolve(params)?;
        let xs = Self::scale_rows(&self.dims.slice(x)?, &p.lengthscale);
        let kxx = self_squared_distances(&xs).map(|d| profile.covariance(d, p.variance));
        log::debug!("{:?}: gram {}x{}", profile, kxx.rows(), kxx.cols());
        CovarianceOperator::from_dense(kxx)
    }

    fn cross_covariance(
        &self,
        profile: StationaryProfile,
        a: &Matrix<T>,
        b: &Matrix<T>,
        params: &KernelParams<T>,
    ) -> Result<Matrix<T>, KernelError> {
        Validator::validate_input_pair(a, b)?;
        let p = self.resolve(params)?;
        let a_s = Self::scale_rows(&self.dims.slice(a)?, &p.lengthscale);
        let b_s = Self::scale_rows(&self.dims.slice(b)?, &p.lengthscale);
        Ok(pairwise_squared_distances(&a_s, &b_s).map(|d| profile.covariance(d, p.variance)))
    }
}

// ============================================================================
// Kernels
// ============================================================================

macro_rules! stationary_kernel {
    ($(#[$meta:meta])* $kernel:ident, $profile:ident, $name:literal, $new_doc:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $kernel<T> {
            config: StationaryConfig<T>,
        }

        impl<T: FloatLinalg> Default for $kernel<T> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T: FloatLinalg> $kernel<T> {
            #[doc = $new_doc]
            pub fn new() -> Self {
                Self {
                    config: StationaryConfig::new(),
                }
            }

            /// Set the input columns the kernel reads.
            pub fn active_dims(mut self, dims: impl Into<ActiveDims>) -> Self {
                self.config.dims = dims.into();
                self
            }

            /// Set the initial lengthscale.
            pub fn lengthscale(mut self, lengthscale: T) -> Self {
                self.config.lengthscale = lengthscale;
                self
            }

            /// Set the initial variance.
            pub fn variance(mut self, variance: T) -> Self {
                self.config.variance = variance;
                self
            }
        }

        impl<T: FloatLinalg> Kernel<T> for $kernel<T> {
            fn compute(&self, x: &[T], y: &[T], params: &KernelParams<T>) -> Result<T, KernelError> {
                self.config
                    .compute(StationaryProfile::$profile, x, y, params)
            }

            fn init_params(&self, _key: PrngKey) -> KernelParams<T> {
                self.config.init_params()
            }

            fn name(&self) -> String {
                $name.to_string()
            }

            fn dims(&self) -> Option<&ActiveDims> {
                Some(&self.config.dims)
            }

            fn stationary(&self) -> bool {
                true
            }

            fn gram(
                &self,
                x: &Matrix<T>,
                params: &KernelParams<T>,
            ) -> Result<CovarianceOperator<T>, KernelError> {
                self.config.gram(StationaryProfile::$profile, x, params)
            }

            fn cross_covariance(
                &self,
                a: &Matrix<T>,
                b: &Matrix<T>,
                params: &KernelParams<T>,
            ) -> Result<Matrix<T>, KernelError> {
                self.config
                    .cross_covariance(StationaryProfile::$profile, a, b, params)
            }
        }
    };
}

stationary_kernel!(
    /// Radial basis function (squared exponential) kernel.
    #[allow(clippy::upper_case_acronyms)]
    RBF,
    SquaredExponential,
    "Radial basis function kernel",
    "RBF kernel on column 0 with unit lengthscale and variance."
);

stationary_kernel!(
    /// Matérn kernel with smoothness 1/2 (exponential kernel).
    Matern12,
    Matern12,
    "Matern 1/2",
    "Matérn 1/2 kernel on column 0 with unit lengthscale and variance."
);

stationary_kernel!(
    /// Matérn kernel with smoothness 3/2.
    Matern32,
    Matern32,
    "Matern 3/2",
    "Matérn 3/2 kernel on column 0 with unit lengthscale and variance."
);

stationary_kernel!(
    /// Matérn kernel with smoothness 5/2.
    Matern52,
    Matern52,
    "Matern 5/2",
    "Matérn 5/2 kernel on column 0 with unit lengthscale and variance."
);
