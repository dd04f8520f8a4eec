//! Covariance operators.
//!
//! ## Purpose
//!
//! A covariance operator represents a symmetric positive (semi-)definite
//! matrix without committing to a dense representation. Gram matrices are
//! returned as operators so that diagonal structure (noise, jitter,
//! identity) is kept until something actually needs the dense matrix.
//!
//! ## Design notes
//!
//! * **Structure-preserving algebra**: Diagonal + Diagonal stays diagonal;
//!   scaling an identity yields a diagonal; anything involving a dense
//!   operand becomes dense.
//! * **Factorizations**: Dense operators delegate to the nalgebra Cholesky
//!   through `FloatLinalg`; diagonal operators are handled element-wise.
//!
//! ## Key concepts
//!
//! * **Root**: Lower-triangular `L` with `L Lᵀ = K`.
//! * **Jitter**: `K + identity(n) * eps` keeps a Gram matrix numerically
//!   positive-definite.
//!
//! ## Invariants
//!
//! * Operators are square.
//! * `to_dense()` of a Gram operator is symmetric.
//!
//! ## Non-goals
//!
//! * No low-rank or structured (Kronecker, Toeplitz) operators.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::ops::{Add, Mul};

// Internal dependencies
use crate::math::linalg::FloatLinalg;
use crate::primitives::errors::KernelError;
use crate::primitives::matrix::Matrix;

/// Diagonal value added to Gram matrices before factorization.
pub const DEFAULT_JITTER: f64 = 1e-6;

// ============================================================================
// Covariance Operator
// ============================================================================

/// Square covariance matrix in dense, diagonal or identity form.
#[derive(Debug, Clone, PartialEq)]
pub enum CovarianceOperator<T> {
    /// Fully materialized matrix.
    Dense(Matrix<T>),

    /// Diagonal matrix stored as its diagonal.
    Diagonal(Vec<T>),

    /// `n x n` identity.
    Identity(usize),
}

/// The `n x n` identity operator.
pub fn identity<T>(n: usize) -> CovarianceOperator<T> {
    CovarianceOperator::Identity(n)
}

impl<T: FloatLinalg> CovarianceOperator<T> {
    /// Wrap a dense square matrix.
    pub fn from_dense(matrix: Matrix<T>) -> Result<Self, KernelError> {
        let (rows, cols) = matrix.shape();
        if rows != cols {
            return Err(KernelError::NonSquareMatrix { rows, cols });
        }
        Ok(Self::Dense(matrix))
    }

    /// Diagonal operator with the given diagonal.
    pub fn from_diagonal(diag: Vec<T>) -> Self {
        Self::Diagonal(diag)
    }

    /// Side length `n` of the `n x n` operator.
    pub fn size(&self) -> usize {
        match self {
            Self::Dense(m) => m.rows(),
            Self::Diagonal(d) => d.len(),
            Self::Identity(n) => *n,
        }
    }

    /// `(n, n)`.
    pub fn shape(&self) -> (usize, usize) {
        let n = self.size();
        (n, n)
    }

    /// Materialize as a dense matrix.
    pub fn to_dense(&self) -> Matrix<T> {
        match self {
            Self::Dense(m) => m.clone(),
            Self::Diagonal(d) => Matrix::from_diagonal(d),
            Self::Identity(n) => Matrix::identity(*n),
        }
    }

    /// Main diagonal.
    pub fn diagonal(&self) -> Vec<T> {
        match self {
            Self::Dense(m) => m.diagonal(),
            Self::Diagonal(d) => d.clone(),
            Self::Identity(n) => vec![T::one(); *n],
        }
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> T {
        match self {
            Self::Identity(n) => T::from(*n).unwrap(),
            _ => self
                .diagonal()
                .into_iter()
                .fold(T::zero(), |acc, v| acc + v),
        }
    }

    /// Multiply every entry by `factor`.
    pub fn scale(&self, factor: T) -> Self {
        match self {
            Self::Dense(m) => Self::Dense(m.map(|v| v * factor)),
            Self::Diagonal(d) => Self::Diagonal(d.iter().map(|&v| v * factor).collect()),
            Self::Identity(n) => Self::Diagonal(vec![factor; *n]),
        }
    }

    /// Sum of two operators of equal size.
    pub fn try_add(&self, other: &Self) -> Result<Self, KernelError> {
        if self.size() != other.size() {
            return Err(KernelError::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }

        match (self, other) {
            (Self::Dense(a), Self::Dense(b)) => Ok(Self::Dense(a.zip_with(b, |x, y| x + y)?)),
            (Self::Dense(a), diag) | (diag, Self::Dense(a)) => {
                let mut out = a.clone();
                out.add_to_diagonal(&diag.diagonal());
                Ok(Self::Dense(out))
            }
            (a, b) => {
                let diag = a
                    .diagonal()
                    .into_iter()
                    .zip(b.diagonal())
                    .map(|(x, y)| x + y)
                    .collect();
                Ok(Self::Diagonal(diag))
            }
        }
    }

    /// Lower-triangular root `L` with `L Lᵀ` equal to this operator.
    pub fn to_root(&self) -> Result<Self, KernelError> {
        match self {
            Self::Dense(m) => {
                let n = m.rows();
                let l = T::cholesky_lower(m.as_slice(), n).ok_or_else(|| {
                    log::warn!("Cholesky factorization failed for {}x{} operator", n, n);
                    KernelError::NotPositiveDefinite
                })?;
                Ok(Self::Dense(Matrix::from_vec(n, n, l)?))
            }
            Self::Diagonal(d) => {
                if d.iter().any(|&v| !(v > T::zero())) {
                    return Err(KernelError::NotPositiveDefinite);
                }
                Ok(Self::Diagonal(d.iter().map(|v| v.sqrt()).collect()))
            }
            Self::Identity(n) => Ok(Self::Identity(*n)),
        }
    }

    /// Log-determinant.
    pub fn log_det(&self) -> Result<T, KernelError> {
        match self {
            Self::Dense(_) => {
                let root = self.to_root()?;
                let two = T::from(2.0).unwrap();
                Ok(root
                    .diagonal()
                    .into_iter()
                    .fold(T::zero(), |acc, v| acc + two * v.ln()))
            }
            Self::Diagonal(d) => {
                if d.iter().any(|&v| !(v > T::zero())) {
                    return Err(KernelError::NotPositiveDefinite);
                }
                Ok(d.iter().fold(T::zero(), |acc, &v| acc + v.ln()))
            }
            Self::Identity(_) => Ok(T::zero()),
        }
    }

    /// Solve `K X = rhs`.
    pub fn solve(&self, rhs: &Matrix<T>) -> Result<Matrix<T>, KernelError> {
        let n = self.size();
        if rhs.rows() != n {
            return Err(KernelError::ShapeMismatch {
                left: self.shape(),
                right: rhs.shape(),
            });
        }

        match self {
            Self::Dense(m) => {
                let x = T::solve_spd(m.as_slice(), rhs.as_slice(), n, rhs.cols()).ok_or_else(
                    || {
                        log::warn!("SPD solve failed for {}x{} operator", n, n);
                        KernelError::NotPositiveDefinite
                    },
                )?;
                Matrix::from_vec(n, rhs.cols(), x)
            }
            Self::Diagonal(d) => {
                if d.iter().any(|&v| v == T::zero()) {
                    return Err(KernelError::NotPositiveDefinite);
                }
                let mut out = rhs.clone();
                for i in 0..n {
                    for j in 0..rhs.cols() {
                        out[(i, j)] = out[(i, j)] / d[i];
                    }
                }
                Ok(out)
            }
            Self::Identity(_) => Ok(rhs.clone()),
        }
    }

    /// Inverse operator.
    pub fn inverse(&self) -> Result<Self, KernelError> {
        match self {
            Self::Dense(m) => Ok(Self::Dense(self.solve(&Matrix::identity(m.rows()))?)),
            Self::Diagonal(d) => {
                if d.iter().any(|&v| v == T::zero()) {
                    return Err(KernelError::NotPositiveDefinite);
                }
                Ok(Self::Diagonal(d.iter().map(|&v| T::one() / v).collect()))
            }
            Self::Identity(n) => Ok(Self::Identity(*n)),
        }
    }

    /// Eigenvalues of the (symmetric) operator in ascending order.
    pub fn eigenvalues(&self) -> Result<Vec<T>, KernelError> {
        match self {
            Self::Dense(m) => T::symmetric_eigen(m.as_slice(), m.rows())
                .map(|(evals, _)| evals)
                .ok_or(KernelError::DecompositionFailed("Symmetric eigen")),
            _ => {
                let mut d = self.diagonal();
                d.sort_by(|a, b| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal));
                Ok(d)
            }
        }
    }
}

// ============================================================================
// Operator Overloads
// ============================================================================

impl<T: FloatLinalg> Add for CovarianceOperator<T> {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if the operators differ in size; use [`CovarianceOperator::try_add`]
    /// to handle the mismatch.
    fn add(self, rhs: Self) -> Self {
        match self.try_add(&rhs) {
            Ok(sum) => sum,
            Err(e) => panic!("cannot add covariance operators: {}", e),
        }
    }
}

impl<T: FloatLinalg> Mul<T> for CovarianceOperator<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        self.scale(rhs)
    }
}
