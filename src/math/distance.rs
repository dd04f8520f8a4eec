//! Distances between input points.
//!
//! ## Purpose
//!
//! Stationary kernels are functions of the distance between (lengthscale
//! scaled) inputs. This module provides the point-wise distances and the
//! pairwise distance matrices used to build Gram and cross-covariance
//! matrices.
//!
//! ## Design notes
//!
//! * **Floor**: `euclidean_distance` clamps the squared distance to `1e-36`
//!   before the square root so that coincident points give a tiny positive
//!   distance instead of an exact zero.
//! * **Decoupling**: Lengthscale scaling happens before distances are taken.
//!
//! ## Invariants
//!
//! * Distances are non-negative.
//! * Pairwise matrices of a set with itself are symmetric.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::linalg::FloatLinalg;
use crate::primitives::matrix::Matrix;

/// Lower bound applied to squared distances before taking a square root.
const MIN_SQUARED_DISTANCE: f64 = 1e-36;

/// Squared Euclidean distance `Σ(aᵢ - bᵢ)²`.
#[inline]
pub fn squared_distance<T: FloatLinalg>(a: &[T], b: &[T]) -> T {
    T::squared_distance(a, b)
}

/// Euclidean distance `√max(Σ(aᵢ - bᵢ)², 1e-36)`.
#[inline]
pub fn euclidean_distance<T: FloatLinalg>(a: &[T], b: &[T]) -> T {
    distance_from_squared(squared_distance(a, b))
}

/// `√max(sq, 1e-36)`.
#[inline]
pub fn distance_from_squared<T: Float>(sq: T) -> T {
    let floor = T::from(MIN_SQUARED_DISTANCE).unwrap();
    sq.max(floor).sqrt()
}

/// Squared distances between every row of `a` and every row of `b`.
///
/// Both matrices must have the same number of columns.
pub fn pairwise_squared_distances<T: FloatLinalg>(a: &Matrix<T>, b: &Matrix<T>) -> Matrix<T> {
    debug_assert_eq!(a.cols(), b.cols());
    let mut out = Matrix::zeros(a.rows(), b.rows());
    for (i, x) in a.row_iter().enumerate() {
        for (j, y) in b.row_iter().enumerate() {
            out[(i, j)] = squared_distance(x, y);
        }
    }
    out
}

/// Gram-style squared distances of a set with itself.
///
/// Computes the upper triangle and mirrors it, so the result is exactly symmetric.
pub fn self_squared_distances<T: FloatLinalg>(x: &Matrix<T>) -> Matrix<T> {
    let n = x.rows();
    let mut out = Matrix::zeros(n, n);
    for i in 0..n {
        for j in i..n {
            let d = squared_distance(x.row(i), x.row(j));
            out[(i, j)] = d;
            out[(j, i)] = d;
        }
    }
    out
}
