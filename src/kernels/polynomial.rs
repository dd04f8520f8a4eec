//! Polynomial kernel.
//!
//! `k(x, y) = (shift + variance · ⟨x, y⟩)^degree`
//!
//! The kernel is non-stationary. With a positive shift and variance it is
//! positive semi-definite for every integer degree.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, string::String};
#[cfg(feature = "std")]
use std::string::String;

// Internal dependencies
use crate::kernels::{ActiveDims, Kernel};
use crate::math::linalg::FloatLinalg;
use crate::parameters::params::{KernelParams, ParamSet};
use crate::primitives::errors::KernelError;
use crate::primitives::key::PrngKey;
use crate::primitives::validator::Validator;

/// Polynomial kernel of fixed integer degree.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<T> {
    dims: ActiveDims,
    degree: usize,
    shift: T,
    variance: T,
}

impl<T: FloatLinalg> Default for Polynomial<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatLinalg> Polynomial<T> {
    /// Linear (degree 1) kernel on column 0 with unit shift and variance.
    pub fn new() -> Self {
        Self {
            dims: ActiveDims::default(),
            degree: 1,
            shift: T::one(),
            variance: T::one(),
        }
    }

    /// Set the polynomial degree.
    ///
    /// Degrees beyond `i32::MAX` are rejected when the kernel is evaluated.
    pub fn degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Set the input columns the kernel reads.
    pub fn active_dims(mut self, dims: impl Into<ActiveDims>) -> Self {
        self.dims = dims.into();
        self
    }

    /// Set the initial shift.
    pub fn shift(mut self, shift: T) -> Self {
        self.shift = shift;
        self
    }

    /// Set the initial variance.
    pub fn variance(mut self, variance: T) -> Self {
        self.variance = variance;
        self
    }

    /// The polynomial degree.
    pub fn get_degree(&self) -> usize {
        self.degree
    }
}

impl<T: FloatLinalg> Kernel<T> for Polynomial<T> {
    fn compute(&self, x: &[T], y: &[T], params: &KernelParams<T>) -> Result<T, KernelError> {
        if x.len() != y.len() {
            return Err(KernelError::DimensionMismatch {
                left: x.len(),
                right: y.len(),
            });
        }
        let degree =
            i32::try_from(self.degree).map_err(|_| KernelError::InvalidDegree(self.degree))?;
        let set = params.leaf()?;
        Validator::validate_parameter("shift", set.require("shift")?, 1)?;
        Validator::validate_positive_parameter("variance", set.require("variance")?, 1)?;
        let shift = set.scalar("shift")?;
        let variance = set.scalar("variance")?;

        let dot = x
            .iter()
            .zip(y.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b);
        Ok((shift + variance * dot).powi(degree))
    }

    fn init_params(&self, _key: PrngKey) -> KernelParams<T> {
        ParamSet::new()
            .with("shift", vec![self.shift])
            .with("variance", vec![self.variance])
            .into()
    }

    fn name(&self) -> String {
        format!("Polynomial Degree: {}", self.degree)
    }

    fn dims(&self) -> Option<&ActiveDims> {
        Some(&self.dims)
    }
}
