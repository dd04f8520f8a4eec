//! Dense row-major matrix storage.
//!
//! ## Purpose
//!
//! This module provides the `Matrix` type used for kernel inputs (one row
//! per point, one column per feature) and for dense kernel outputs such as
//! cross-covariances and materialized Gram matrices.
//!
//! ## Design notes
//!
//! * **Row-major**: Rows are contiguous so a point is a plain `&[T]` slice.
//! * **Minimal**: Only the operations kernels and operators need; factorizations
//!   live in `math::linalg`.
//!
//! ## Invariants
//!
//! * `data.len() == rows * cols`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::ops::{Index, IndexMut};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::KernelError;

// ============================================================================
// Matrix
// ============================================================================

/// Dense row-major matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Float> Matrix<T> {
    /// Create a matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::zero(); rows * cols],
        }
    }

    /// Create the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = T::one();
        }
        m
    }

    /// Create a square matrix with `diag` on its diagonal.
    pub fn from_diagonal(diag: &[T]) -> Self {
        let n = diag.len();
        let mut m = Self::zeros(n, n);
        for (i, &d) in diag.iter().enumerate() {
            m.data[i * n + i] = d;
        }
        m
    }

    /// Wrap a row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, KernelError> {
        if data.len() != rows * cols {
            return Err(KernelError::ShapeMismatch {
                left: (rows, cols),
                right: (data.len(), 1),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix from equally sized rows.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, KernelError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != n_cols {
                return Err(KernelError::DimensionMismatch {
                    left: n_cols,
                    right: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Build a single-column matrix from values.
    pub fn column(values: &[T]) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            data: values.to_vec(),
        }
    }

    /// Evenly spaced values from `start` to `stop` (inclusive), reshaped to `rows x cols`.
    ///
    /// Mirrors the usual `linspace(start, stop, rows * cols).reshape(rows, cols)`.
    pub fn linspace(start: T, stop: T, rows: usize, cols: usize) -> Self {
        let total = rows * cols;
        let data = match total {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (stop - start) / T::from(total - 1).unwrap();
                (0..total)
                    .map(|i| start + step * T::from(i).unwrap())
                    .collect()
            }
        };
        Self { rows, cols, data }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Whether the matrix has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterate over rows.
    pub fn row_iter(&self) -> impl Iterator<Item = &[T]> + '_ {
        // chunks_exact panics on a zero chunk size
        let width = self.cols.max(1);
        self.data
            .chunks_exact(width)
            .take(if self.cols == 0 { 0 } else { self.rows })
    }

    /// Underlying row-major storage.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Main diagonal.
    pub fn diagonal(&self) -> Vec<T> {
        let n = self.rows.min(self.cols);
        (0..n).map(|i| self.data[i * self.cols + i]).collect()
    }

    /// Transposed copy.
    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        out
    }

    /// Select columns in the given order.
    ///
    /// Equivalent to `x[..., dims]`.
    pub fn select_columns(&self, dims: &[usize]) -> Result<Self, KernelError> {
        if let Some(&dim) = dims.iter().find(|&&d| d >= self.cols) {
            return Err(KernelError::ActiveDimOutOfRange {
                dim,
                input_dims: self.cols,
            });
        }
        let mut data = Vec::with_capacity(self.rows * dims.len());
        for row in self.row_iter() {
            data.extend(dims.iter().map(|&d| row[d]));
        }
        Ok(Self {
            rows: self.rows,
            cols: dims.len(),
            data,
        })
    }

    /// Apply `f` element-wise.
    pub fn map<F: Fn(T) -> T>(&self, f: F) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combine two equally shaped matrices element-wise.
    pub fn zip_with<F: Fn(T, T) -> T>(&self, other: &Self, f: F) -> Result<Self, KernelError> {
        if self.shape() != other.shape() {
            return Err(KernelError::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Add `values` to the main diagonal in place.
    pub fn add_to_diagonal(&mut self, values: &[T]) {
        let n = self.rows.min(self.cols).min(values.len());
        for (i, &v) in values.iter().take(n).enumerate() {
            self.data[i * self.cols + i] = self.data[i * self.cols + i] + v;
        }
    }

    /// Matrix product `self * other`.
    pub fn matmul(&self, other: &Self) -> Result<Self, KernelError> {
        if self.cols != other.rows {
            return Err(KernelError::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        let mut out = Self::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i * self.cols + k];
                if a == T::zero() {
                    continue;
                }
                for j in 0..other.cols {
                    let idx = i * other.cols + j;
                    out.data[idx] = out.data[idx] + a * other.data[k * other.cols + j];
                }
            }
        }
        Ok(out)
    }

    /// Whether the matrix equals its transpose within `tol`.
    pub fn is_symmetric(&self, tol: T) -> bool {
        if self.rows != self.cols {
            return false;
        }
        for i in 0..self.rows {
            for j in (i + 1)..self.cols {
                let a = self.data[i * self.cols + j];
                let b = self.data[j * self.cols + i];
                if (a - b).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[i * self.cols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.data[i * self.cols + j]
    }
}
