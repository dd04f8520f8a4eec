//! Linear algebra backend abstraction.
//!
//! ## Purpose
//!
//! This module provides a trait-based bridge from generic `Float` code to
//! the nalgebra routines kernels and covariance operators rely on:
//! symmetric eigendecomposition (graph kernels), Cholesky factorization
//! and SPD solves (covariance operators).
//!
//! ## Design notes
//!
//! * Matrices cross the bridge as row-major slices with explicit sizes.
//! * Eigenpairs are returned in ascending eigenvalue order.
//! * The f64 squared distance is vectorized with `wide::f64x2`; f32 uses the
//!   scalar path.
//!
//! ## Non-goals
//!
//! * No hand-written factorizations; nalgebra does the numerical work.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::fmt::Debug;

// External dependencies
use num_traits::Float;
use wide::f64x2;

// ============================================================================
// FloatLinalg Trait
// ============================================================================

/// Helper trait to bridge generic Float types to the nalgebra backend.
pub trait FloatLinalg: Float + Debug + Send + Sync + 'static {
    /// Sum of squared element-wise differences.
    #[inline]
    fn squared_distance(a: &[Self], b: &[Self]) -> Self {
        debug_assert_eq!(a.len(), b.len(), "Points must have same dimension");
        a.iter()
            .zip(b.iter())
            .map(|(&ai, &bi)| {
                let diff = ai - bi;
                diff * diff
            })
            .fold(Self::zero(), |acc, x| acc + x)
    }

    /// Lower Cholesky factor of an `n x n` SPD matrix.
    fn cholesky_lower(a: &[Self], n: usize) -> Option<Vec<Self>>;

    /// Eigenvalues (ascending) and eigenvectors (as columns, row-major storage)
    /// of an `n x n` symmetric matrix.
    fn symmetric_eigen(a: &[Self], n: usize) -> Option<(Vec<Self>, Vec<Self>)>;

    /// Solve `A X = B` for SPD `A (n x n)` and `B (n x m)`.
    fn solve_spd(a: &[Self], b: &[Self], n: usize, m: usize) -> Option<Vec<Self>>;
}

impl FloatLinalg for f64 {
    #[inline]
    fn squared_distance(a: &[Self], b: &[Self]) -> Self {
        debug_assert_eq!(a.len(), b.len(), "Points must have same dimension");
        let n = a.len();
        let mut acc = f64x2::splat(0.0);

        // Process 2 elements at a time (f64x2)
        let mut i = 0;
        while i + 1 < n {
            let va = f64x2::new([a[i], a[i + 1]]);
            let vb = f64x2::new([b[i], b[i + 1]]);
            let d = va - vb;
            acc += d * d;
            i += 2;
        }

        let mut sum = acc.reduce_add();
        if i < n {
            let d = a[i] - b[i];
            sum += d * d;
        }
        sum
    }

    #[inline]
    fn cholesky_lower(a: &[Self], n: usize) -> Option<Vec<Self>> {
        nalgebra_backend::cholesky_lower(a, n)
    }

    #[inline]
    fn symmetric_eigen(a: &[Self], n: usize) -> Option<(Vec<Self>, Vec<Self>)> {
        nalgebra_backend::symmetric_eigen(a, n, f64::EPSILON)
    }

    #[inline]
    fn solve_spd(a: &[Self], b: &[Self], n: usize, m: usize) -> Option<Vec<Self>> {
        nalgebra_backend::solve_spd(a, b, n, m)
    }
}

impl FloatLinalg for f32 {
    #[inline]
    fn cholesky_lower(a: &[Self], n: usize) -> Option<Vec<Self>> {
        nalgebra_backend::cholesky_lower(a, n)
    }

    #[inline]
    fn symmetric_eigen(a: &[Self], n: usize) -> Option<(Vec<Self>, Vec<Self>)> {
        nalgebra_backend::symmetric_eigen(a, n, f32::EPSILON)
    }

    #[inline]
    fn solve_spd(a: &[Self], b: &[Self], n: usize, m: usize) -> Option<Vec<Self>> {
        nalgebra_backend::solve_spd(a, b, n, m)
    }
}

// ============================================================================
// Nalgebra Backend Implementation
// ============================================================================

/// Nalgebra-based linear algebra operations.
pub mod nalgebra_backend {
    use super::*;
    use core::cmp::Ordering;
    use nalgebra::{DMatrix, RealField, SymmetricEigen};

    /// Iteration cap for the symmetric eigensolver.
    const MAX_EIGEN_ITERATIONS: usize = 10_000;

    /// Row-major copy of a column-major nalgebra matrix.
    fn to_row_major<T: RealField + Copy>(m: &DMatrix<T>) -> Vec<T> {
        let (rows, cols) = m.shape();
        let mut out = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                out.push(m[(i, j)]);
            }
        }
        out
    }

    /// Lower Cholesky factor, or `None` if the matrix is not positive-definite.
    pub fn cholesky_lower<T: RealField + Copy>(a: &[T], n: usize) -> Option<Vec<T>> {
        let matrix = DMatrix::from_row_slice(n, n, a);
        matrix.cholesky().map(|chol| to_row_major(&chol.l()))
    }

    /// Symmetric eigendecomposition sorted by ascending eigenvalue.
    pub fn symmetric_eigen<T: RealField + Copy + PartialOrd>(
        a: &[T],
        n: usize,
        eps: T,
    ) -> Option<(Vec<T>, Vec<T>)> {
        let matrix = DMatrix::from_row_slice(n, n, a);
        let eigen = SymmetricEigen::try_new(matrix, eps, MAX_EIGEN_ITERATIONS)?;

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&i, &j| {
            eigen.eigenvalues[i]
                .partial_cmp(&eigen.eigenvalues[j])
                .unwrap_or(Ordering::Equal)
        });

        let evals = order.iter().map(|&k| eigen.eigenvalues[k]).collect();
        let mut evecs = Vec::with_capacity(n * n);
        for i in 0..n {
            for &k in &order {
                evecs.push(eigen.eigenvectors[(i, k)]);
            }
        }
        Some((evals, evecs))
    }

    /// Solve `A X = B` through a Cholesky factorization of `A`.
    pub fn solve_spd<T: RealField + Copy>(a: &[T], b: &[T], n: usize, m: usize) -> Option<Vec<T>> {
        let matrix = DMatrix::from_row_slice(n, n, a);
        let rhs = DMatrix::from_row_slice(n, m, b);
        let chol = matrix.cholesky()?;
        Some(to_row_major(&chol.solve(&rhs)))
    }
}
