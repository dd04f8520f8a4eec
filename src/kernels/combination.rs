//! Sum and product kernels.
//!
//! ## Purpose
//!
//! Sums and products of positive-definite kernels are positive-definite.
//! This module combines an arbitrary kernel set element-wise and wires the
//! `+` and `*` operators of every kernel type to these combinations.
//!
//! ## Design notes
//!
//! * **Heterogeneous sets**: Children are boxed trait objects.
//! * **Parameters**: A combination's parameters are a list with one entry
//!   per child, in kernel-set order.
//! * **Flattening**: `(a + b) + c` extends the existing sum instead of
//!   nesting, and likewise for products.
//!
//! ## Invariants
//!
//! * The Gram matrix of a sum (product) is the element-wise sum (product)
//!   of the children's Gram matrices, accumulated left to right.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{
    boxed::Box,
    string::{String, ToString},
    vec::Vec,
};
#[cfg(feature = "std")]
use std::{boxed::Box, string::String, vec::Vec};

use core::ops::{Add, Mul};

// Internal dependencies
use crate::kernels::graph::GraphKernel;
use crate::kernels::polynomial::Polynomial;
use crate::kernels::stationary::{Matern12, Matern32, Matern52, RBF};
use crate::kernels::Kernel;
use crate::math::linalg::FloatLinalg;
use crate::operators::covariance::CovarianceOperator;
use crate::parameters::params::{KernelParams, ParamTree};
use crate::primitives::errors::KernelError;
use crate::primitives::key::PrngKey;
use crate::primitives::matrix::Matrix;
use crate::primitives::validator::Validator;

// ============================================================================
// Combinator
// ============================================================================

/// Element-wise reduction applied across a kernel set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `k(x, y) = Σ kᵢ(x, y)`
    Sum,

    /// `k(x, y) = Π kᵢ(x, y)`
    Product,
}

impl Combinator {
    /// Neutral element of the reduction.
    #[inline]
    pub fn identity<T: FloatLinalg>(&self) -> T {
        match self {
            Self::Sum => T::zero(),
            Self::Product => T::one(),
        }
    }

    /// Fold one more value into the accumulator.
    #[inline]
    pub fn combine<T: FloatLinalg>(&self, acc: T, value: T) -> T {
        match self {
            Self::Sum => acc + value,
            Self::Product => acc * value,
        }
    }
}

// ============================================================================
// Combination Kernel Trait
// ============================================================================

/// Kernels built from a set of child kernels.
pub trait CombinationKernel<T: FloatLinalg>: Kernel<T> {
    /// The child kernels in order.
    fn kernel_set(&self) -> &[Box<dyn Kernel<T>>];

    /// How children are combined.
    fn combinator(&self) -> Combinator;
}

/// Children's parameter entries, checked against the kernel set.
fn child_params<'a, T: FloatLinalg>(
    kernels: &[Box<dyn Kernel<T>>],
    params: &'a KernelParams<T>,
) -> Result<&'a [KernelParams<T>], KernelError> {
    let children = params.children()?;
    if children.len() != kernels.len() {
        return Err(KernelError::ParameterCountMismatch {
            expected: kernels.len(),
            got: children.len(),
        });
    }
    Ok(children)
}

fn combined_init_params<T: FloatLinalg>(kernels: &[Box<dyn Kernel<T>>], key: PrngKey) -> KernelParams<T> {
    let mut key = key;
    let children = kernels
        .iter()
        .map(|k| {
            let (next, sub) = key.split();
            key = next;
            k.init_params(sub)
        })
        .collect();
    ParamTree::Combination(children)
}

fn combined_evaluate<T: FloatLinalg>(
    op: Combinator,
    kernels: &[Box<dyn Kernel<T>>],
    x: &[T],
    y: &[T],
    params: &KernelParams<T>,
) -> Result<T, KernelError> {
    let children = child_params(kernels, params)?;
    kernels
        .iter()
        .zip(children.iter())
        .try_fold(op.identity(), |acc, (k, p)| {
            Ok(op.combine(acc, k.evaluate(x, y, p)?))
        })
}

fn combined_gram<T: FloatLinalg>(
    op: Combinator,
    kernels: &[Box<dyn Kernel<T>>],
    x: &Matrix<T>,
    params: &KernelParams<T>,
) -> Result<CovarianceOperator<T>, KernelError> {
    Validator::validate_inputs(x)?;
    let children = child_params(kernels, params)?;
    let n = x.rows();
    let mut acc = Matrix::zeros(n, n).map(|_| op.identity());
    for (k, p) in kernels.iter().zip(children.iter()) {
        let kxx = k.gram(x, p)?.to_dense();
        acc = acc.zip_with(&kxx, |a, b| op.combine(a, b))?;
    }
    log::debug!("{:?} of {} kernels: gram {}x{}", op, kernels.len(), n, n);
    CovarianceOperator::from_dense(acc)
}

fn combined_cross_covariance<T: FloatLinalg>(
    op: Combinator,
    kernels: &[Box<dyn Kernel<T>>],
    a: &Matrix<T>,
    b: &Matrix<T>,
    params: &KernelParams<T>,
) -> Result<Matrix<T>, KernelError> {
    Validator::validate_input_pair(a, b)?;
    let children = child_params(kernels, params)?;
    let mut acc = Matrix::zeros(a.rows(), b.rows()).map(|_| op.identity());
    for (k, p) in kernels.iter().zip(children.iter()) {
        let kab = k.cross_covariance(a, b, p)?;
        acc = acc.zip_with(&kab, |x, y| op.combine(x, y))?;
    }
    Ok(acc)
}

// ============================================================================
// Sum Kernel
// ============================================================================

/// Element-wise sum of a kernel set.
#[derive(Debug)]
pub struct SumKernel<T> {
    kernel_set: Vec<Box<dyn Kernel<T>>>,
}

impl<T: FloatLinalg> SumKernel<T> {
    /// Sum of the given kernels.
    pub fn new(kernel_set: Vec<Box<dyn Kernel<T>>>) -> Self {
        Self { kernel_set }
    }

    /// Append a kernel to the sum.
    pub fn push<K: Kernel<T> + 'static>(&mut self, kernel: K) {
        self.kernel_set.push(Box::new(kernel));
    }
}

impl<T: FloatLinalg> Kernel<T> for SumKernel<T> {
    fn compute(&self, x: &[T], y: &[T], params: &KernelParams<T>) -> Result<T, KernelError> {
        combined_evaluate(Combinator::Sum, &self.kernel_set, x, y, params)
    }

    fn init_params(&self, key: PrngKey) -> KernelParams<T> {
        combined_init_params(&self.kernel_set, key)
    }

    fn name(&self) -> String {
        "Sum kernel".to_string()
    }

    fn stationary(&self) -> bool {
        self.kernel_set.iter().all(|k| k.stationary())
    }

    fn gram(&self, x: &Matrix<T>, params: &KernelParams<T>) -> Result<CovarianceOperator<T>, KernelError> {
        combined_gram(Combinator::Sum, &self.kernel_set, x, params)
    }

    fn cross_covariance(
        &self,
        a: &Matrix<T>,
        b: &Matrix<T>,
        params: &KernelParams<T>,
    ) -> Result<Matrix<T>, KernelError> {
        combined_cross_covariance(Combinator::Sum, &self.kernel_set, a, b, params)
    }
}

impl<T: FloatLinalg> CombinationKernel<T> for SumKernel<T> {
    fn kernel_set(&self) -> &[Box<dyn Kernel<T>>] {
        &self.kernel_set
    }

    fn combinator(&self) -> Combinator {
        Combinator::Sum
    }
}

// ============================================================================
// Product Kernel
// ============================================================================

/// Element-wise product of a kernel set.
#[derive(Debug)]
pub struct ProductKernel<T> {
    kernel_set: Vec<Box<dyn Kernel<T>>>,
}

impl<T: FloatLinalg> ProductKernel<T> {
    /// Product of the given kernels.
    pub fn new(kernel_set: Vec<Box<dyn Kernel<T>>>) -> Self {
        Self { kernel_set }
    }

    /// Append a kernel to the product.
    pub fn push<K: Kernel<T> + 'static>(&mut self, kernel: K) {
        self.kernel_set.push(Box::new(kernel));
    }
}

impl<T: FloatLinalg> Kernel<T> for ProductKernel<T> {
    fn compute(&self, x: &[T], y: &[T], params: &KernelParams<T>) -> Result<T, KernelError> {
        combined_evaluate(Combinator::Product, &self.kernel_set, x, y, params)
    }

    fn init_params(&self, key: PrngKey) -> KernelParams<T> {
        combined_init_params(&self.kernel_set, key)
    }

    fn name(&self) -> String {
        "Product kernel".to_string()
    }

    fn stationary(&self) -> bool {
        self.kernel_set.iter().all(|k| k.stationary())
    }

    fn gram(&self, x: &Matrix<T>, params: &KernelParams<T>) -> Result<CovarianceOperator<T>, KernelError> {
        combined_gram(Combinator::Product, &self.kernel_set, x, params)
    }

    fn cross_covariance(
        &self,
        a: &Matrix<T>,
        b: &Matrix<T>,
        params: &KernelParams<T>,
    ) -> Result<Matrix<T>, KernelError> {
        combined_cross_covariance(Combinator::Product, &self.kernel_set, a, b, params)
    }
}

impl<T: FloatLinalg> CombinationKernel<T> for ProductKernel<T> {
    fn kernel_set(&self) -> &[Box<dyn Kernel<T>>] {
        &self.kernel_set
    }

    fn combinator(&self) -> Combinator {
        Combinator::Product
    }
}

// ============================================================================
// Operator Overloads
// ============================================================================

// `leaf + k` and `leaf * k` start a new combination.
macro_rules! impl_kernel_ops {
    ($($kernel:ident),* $(,)?) => {
        $(
            impl<T: FloatLinalg, R: Kernel<T> + 'static> Add<R> for $kernel<T> {
                type Output = SumKernel<T>;

                fn add(self, rhs: R) -> SumKernel<T> {
                    SumKernel::new(vec![Box::new(self), Box::new(rhs)])
                }
            }

            impl<T: FloatLinalg, R: Kernel<T> + 'static> Mul<R> for $kernel<T> {
                type Output = ProductKernel<T>;

                fn mul(self, rhs: R) -> ProductKernel<T> {
                    ProductKernel::new(vec![Box::new(self), Box::new(rhs)])
                }
            }
        )*
    };
}

impl_kernel_ops!(RBF, Matern12, Matern32, Matern52, Polynomial, GraphKernel);

impl<T: FloatLinalg, R: Kernel<T> + 'static> Add<R> for SumKernel<T> {
    type Output = SumKernel<T>;

    fn add(mut self, rhs: R) -> SumKernel<T> {
        self.push(rhs);
        self
    }
}

impl<T: FloatLinalg, R: Kernel<T> + 'static> Mul<R> for SumKernel<T> {
    type Output = ProductKernel<T>;

    fn mul(self, rhs: R) -> ProductKernel<T> {
        ProductKernel::new(vec![Box::new(self), Box::new(rhs)])
    }
}

impl<T: FloatLinalg, R: Kernel<T> + 'static> Add<R> for ProductKernel<T> {
    type Output = SumKernel<T>;

    fn add(self, rhs: R) -> SumKernel<T> {
        SumKernel::new(vec![Box::new(self), Box::new(rhs)])
    }
}

impl<T: FloatLinalg, R: Kernel<T> + 'static> Mul<R> for ProductKernel<T> {
    type Output = ProductKernel<T>;

    fn mul(mut self, rhs: R) -> ProductKernel<T> {
        self.push(rhs);
        self
    }
}
