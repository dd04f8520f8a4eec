//! Graph kernels defined on the spectrum of a graph Laplacian.
//!
//! ## Purpose
//!
//! This module implements the Matérn kernel on the vertices of a graph.
//! Inputs are vertex indices; covariance is assembled from the eigenpairs
//! of the graph Laplacian, computed once when the kernel is built.
//!
//! ## Key concepts
//!
//! With Laplacian eigenpairs `(λₖ, uₖ)`, smoothness `ν`, lengthscale `ℓ`
//! and variance `σ²`:
//!
//! * **Spectral density**: `ψₖ = (2ν/ℓ² + λₖ)^(-ν)`
//! * **Normalization**: `Sₖ = ψₖ · V / Σψ`, so the mean prior variance is `σ²`
//! * **Covariance**: `k(i, j) = σ² Σₖ uₖ[i] Sₖ uₖ[j]`
//!
//! ## Invariants
//!
//! * `evals` has shape `(V, 1)`, `evecs` has shape `(V, V)`.
//! * Eigenpairs are sorted by ascending eigenvalue.
//!
//! ## Non-goals
//!
//! * This module does not build Laplacians from edge lists.

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
use crate::math::linalg::FloatLinalg;
use crate::operators::covariance::CovarianceOperator;
use crate::parameters::params::{KernelParams, ParamSet};
use crate::primitives::errors::KernelError;
use crate::primitives::key::PrngKey;
use crate::primitives::matrix::Matrix;
use crate::primitives::validator::Validator;

// ============================================================================
// Eigen Kernel
// ============================================================================

/// A kernel built on an eigendecomposition computed at construction.
pub trait EigenKernel<T: FloatLinalg>: Kernel<T> {
    /// Eigenvalues as a `(V, 1)` column.
    fn evals(&self) -> &Matrix<T>;

    /// Eigenvectors as columns of a `(V, V)` matrix.
    fn evecs(&self) -> &Matrix<T>;

    /// Number of vertices `V`.
    fn num_vertex(&self) -> usize {
        self.evals().rows()
    }
}

// ============================================================================
// Graph Kernel
// ============================================================================

/// Matérn kernel on the vertices of a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphKernel<T> {
    dims: ActiveDims,
    laplacian: Matrix<T>,
    evals: Matrix<T>,
    evecs: Matrix<T>,
    lengthscale: T,
    smoothness: T,
    variance: T,
}

impl<T: FloatLinalg> GraphKernel<T> {
    /// Build a graph kernel from a symmetric `V x V` Laplacian.
    ///
    /// Fails with `NonSymmetricMatrix` if the Laplacian differs from its
    /// transpose by more than `√ε`.
    pub fn new(laplacian: Matrix<T>) -> Result<Self, KernelError> {
        Validator::validate_inputs(&laplacian)?;
        Validator::validate_symmetric(&laplacian, T::epsilon().sqrt())?;

        let n = laplacian.rows();
        let (evals, evecs) = T::symmetric_eigen(laplacian.as_slice(), n)
            .ok_or(KernelError::DecompositionFailed("Symmetric eigen"))?;
        log::debug!("graph kernel: decomposed {}x{} laplacian", n, n);

        Ok(Self {
            dims: ActiveDims::default(),
            evals: Matrix::column(&evals),
            evecs: Matrix::from_vec(n, n, evecs)?,
            laplacian,
            lengthscale: T::one(),
            smoothness: T::one(),
            variance: T::one(),
        })
    }

    /// Set the input column holding vertex indices.
    pub fn active_dims(mut self, dims: impl Into<ActiveDims>) -> Self {
        self.dims = dims.into();
        self
    }

    /// Set the initial lengthscale.
    pub fn lengthscale(mut self, lengthscale: T) -> Self {
        self.lengthscale = lengthscale;
        self
    }

    /// Set the initial smoothness.
    pub fn smoothness(mut self, smoothness: T) -> Self {
        self.smoothness = smoothness;
        self
    }

    /// Set the initial variance.
    pub fn variance(mut self, variance: T) -> Self {
        self.variance = variance;
        self
    }

    /// The Laplacian the kernel was built from.
    pub fn laplacian(&self) -> &Matrix<T> {
        &self.laplacian
    }

    /// Normalized spectral density `S` for the given parameters.
    pub fn spectral_density(&self, params: &KernelParams<T>) -> Result<Vec<T>, KernelError> {
        let set = params.leaf()?;
        Validator::validate_positive_parameter("lengthscale", set.require("lengthscale")?, 1)?;
        Validator::validate_positive_parameter("smoothness", set.require("smoothness")?, 1)?;
        let lengthscale = set.scalar("lengthscale")?;
        let smoothness = set.scalar("smoothness")?;

        let two = T::from(2.0).unwrap();
        let offset = two * smoothness / (lengthscale * lengthscale);
        let psi: Vec<T> = self
            .evals
            .as_slice()
            .iter()
            .map(|&lambda| (offset + lambda).powf(-smoothness))
            .collect();

        let total = psi.iter().fold(T::zero(), |acc, &v| acc + v);
        let scale = T::from(self.num_vertex()).unwrap() / total;
        Ok(psi.into_iter().map(|v| v * scale).collect())
    }

    /// Variance and spectral density for one call.
    fn resolve(&self, params: &KernelParams<T>) -> Result<(T, Vec<T>), KernelError> {
        let set = params.leaf()?;
        Validator::validate_positive_parameter("variance", set.require("variance")?, 1)?;
        let variance = set.scalar("variance")?;
        Ok((variance, self.spectral_density(params)?))
    }

    /// Vertex index stored in a (sliced) input row.
    fn vertex(&self, x: &[T]) -> Result<usize, KernelError> {
        let num_vertex = self.num_vertex();
        // Exactly one vertex column.
        let value = match x {
            [] => return Err(KernelError::EmptyInput),
            [v] => *v,
            _ => {
                return Err(KernelError::DimensionMismatch {
                    left: 1,
                    right: x.len(),
                })
            }
        };
        let invalid = KernelError::InvalidVertex {
            value: value.to_f64().unwrap_or(f64::NAN),
            num_vertex,
        };
        if value < T::zero() || value.fract() != T::zero() {
            return Err(invalid);
        }
        match value.to_usize() {
            Some(idx) if idx < num_vertex => Ok(idx),
            _ => Err(invalid),
        }
    }

    /// `Σₖ uₖ[i] Sₖ uₖ[j]`.
    fn spectral_product(&self, i: usize, j: usize, density: &[T]) -> T {
        let ui = self.evecs.row(i);
        let uj = self.evecs.row(j);
        ui.iter()
            .zip(uj.iter())
            .zip(density.iter())
            .fold(T::zero(), |acc, ((&a, &b), &s)| acc + a * s * b)
    }

    fn vertices(&self, x: &Matrix<T>) -> Result<Vec<usize>, KernelError> {
        let xs = self.dims.slice(x)?;
        xs.row_iter().map(|row| self.vertex(row)).collect()
    }
}

impl<T: FloatLinalg> Kernel<T> for GraphKernel<T> {
    fn compute(&self, x: &[T], y: &[T], params: &KernelParams<T>) -> Result<T, KernelError> {
        let i = self.vertex(x)?;
        let j = self.vertex(y)?;
        let (variance, density) = self.resolve(params)?;
        Ok(variance * self.spectral_product(i, j, &density))
    }

    fn init_params(&self, _key: PrngKey) -> KernelParams<T> {
        ParamSet::new()
            .with("lengthscale", vec![self.lengthscale])
            .with("smoothness", vec![self.smoothness])
            .with("variance", vec![self.variance])
            .into()
    }

    fn name(&self) -> String {
        "Graph kernel".to_string()
    }

    fn dims(&self) -> Option<&ActiveDims> {
        Some(&self.dims)
    }

    fn spectral(&self) -> bool {
        true
    }

    fn gram(&self, x: &Matrix<T>, params: &KernelParams<T>) -> Result<CovarianceOperator<T>, KernelError> {
        Validator::validate_inputs(x)?;
        let vertices = self.vertices(x)?;
        let (variance, density) = self.resolve(params)?;

        let n = vertices.len();
        let mut kxx = Matrix::zeros(n, n);
        for a in 0..n {
            for b in a..n {
                let k = variance * self.spectral_product(vertices[a], vertices[b], &density);
                kxx[(a, b)] = k;
                kxx[(b, a)] = k;
            }
        }
        log::debug!("graph kernel: gram {}x{} over {} vertices", n, n, self.num_vertex());
        CovarianceOperator::from_dense(kxx)
    }

    fn cross_covariance(
        &self,
        a: &Matrix<T>,
        b: &Matrix<T>,
        params: &KernelParams<T>,
    ) -> Result<Matrix<T>, KernelError> {
        Validator::validate_input_pair(a, b)?;
        let va = self.vertices(a)?;
        let vb = self.vertices(b)?;
        let (variance, density) = self.resolve(params)?;

        let mut kab = Matrix::zeros(va.len(), vb.len());
        for (r, &i) in va.iter().enumerate() {
            for (c, &j) in vb.iter().enumerate() {
                kab[(r, c)] = variance * self.spectral_product(i, j, &density);
            }
        }
        Ok(kab)
    }
}

impl<T: FloatLinalg> EigenKernel<T> for GraphKernel<T> {
    fn evals(&self) -> &Matrix<T> {
        &self.evals
    }

    fn evecs(&self) -> &Matrix<T> {
        &self.evecs
    }
}
