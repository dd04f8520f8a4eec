//! # gp-kernels — Gaussian process covariance kernels for Rust
//!
//! Positive-definite kernels, the covariance matrices they produce, and the
//! hyperparameter plumbing needed to fit them.
//!
//! ## What is a kernel?
//!
//! A kernel `k(x, y)` measures how strongly the values of a Gaussian process
//! at two inputs co-vary. Evaluating it over every pair of a set of inputs
//! gives the Gram matrix `K`, which must be symmetric positive-definite.
//!
//! **Available kernels:**
//! - `RBF` (squared exponential)
//! - `Matern12`, `Matern32`, `Matern52`
//! - `Polynomial` of any integer degree
//! - `GraphKernel`, a Matérn kernel on the vertices of a graph
//! - `SumKernel` and `ProductKernel`, built with `+` and `*`
//!
//! ## Quick Start
//!
//! ```rust
//! use gp_kernels::prelude::*;
//!
//! let x = Matrix::linspace(-3.0, 3.0, 20, 1);
//!
//! let kernel = RBF::new().lengthscale(0.5);
//! let params = kernel.init_params(PrngKey::new(123));
//!
//! let kxx = kernel.gram(&x, &params)?;
//! assert_eq!(kxx.shape(), (20, 20));
//!
//! // Jittered Gram matrices are positive-definite
//! let jittered = kxx + identity(20) * DEFAULT_JITTER;
//! let root = jittered.to_root()?;
//! assert_eq!(root.shape(), (20, 20));
//! # Result::<(), KernelError>::Ok(())
//! ```
//!
//! ## Active Dimensions
//!
//! Each kernel reads only its active input columns, in the given order:
//!
//! ```rust
//! use gp_kernels::prelude::*;
//!
//! let x = Matrix::from_rows(&[[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]])?;
//!
//! let kernel = Matern32::<f64>::new().active_dims([2, 0]);
//! assert_eq!(kernel.ndims(), 2);
//! assert!(kernel.ard());
//!
//! let params = kernel.init_params(PrngKey::new(0));
//! let kxx = kernel.gram(&x, &params)?;
//! assert_eq!(kxx.shape(), (2, 2));
//! # Result::<(), KernelError>::Ok(())
//! ```
//!
//! ## Combining Kernels
//!
//! Sums and products of kernels are kernels. Parameters of a combination are
//! a list with one entry per child.
//!
//! ```rust
//! use gp_kernels::prelude::*;
//!
//! let x = Matrix::linspace(0.0, 1.0, 5, 1);
//! let kernel = RBF::<f64>::new() + Polynomial::new().degree(2);
//! let params = kernel.init_params(PrngKey::new(42));
//! assert_eq!(params.len(), 2);
//!
//! let kxx = kernel.gram(&x, &params)?;
//! assert_eq!(kxx.shape(), (5, 5));
//! # Result::<(), KernelError>::Ok(())
//! ```
//!
//! ## Parameters and Bijectors
//!
//! `initialise` returns default parameters, trainability flags and the
//! bijectors used to move positive parameters onto the real line.
//!
//! ```rust
//! use gp_kernels::prelude::*;
//!
//! let kernel = Matern52::<f64>::new();
//! let (params, trainables, bijectors) = initialise(&kernel, PrngKey::new(0)).unpack();
//!
//! assert_eq!(trainables.leaf()?.get("variance"), Some(&true));
//! assert_eq!(bijectors.leaf()?.get("lengthscale"), Some(&Bijector::Softplus));
//!
//! let raw = unconstrain(&params, &bijectors)?;
//! let back = constrain(&raw, &bijectors)?;
//! assert!((back.leaf()?.scalar("variance")? - 1.0).abs() < 1e-12);
//! # Result::<(), KernelError>::Ok(())
//! ```
//!
//! ## Minimal Usage (no_std / Embedded)
//!
//! The crate supports `no_std` environments with an allocator. Disable
//! default features to remove the standard library dependency:
//!
//! ```toml
//! [dependencies]
//! gp-kernels = { version = "0.1", default-features = false }
//! ```
//!
//! ## Logging
//!
//! Eigendecompositions and Gram assembly are reported through the `log`
//! facade at `debug` level, failed factorizations at `warn` level. No logger
//! is installed by the library.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures and basic utilities.
//
// Contains the row-major `Matrix`, `KernelError`, the `PrngKey` and
// input validation.
mod primitives;

// Layer 2: Math - pure mathematical functions.
//
// Contains distances and the linear algebra bridge to nalgebra.
mod math;

// Layer 3: Operators - structured covariance matrices.
//
// Contains the dense, diagonal and identity covariance operators.
mod operators;

// Layer 4: Kernels - covariance functions.
//
// Contains the `Kernel` trait, stationary, polynomial, graph and
// combination kernels.
mod kernels;

// Hyperparameter containers, bijectors and initial state.
mod parameters;

// High-level API.
//
// Re-exports the public surface and provides free `gram` and
// `cross_covariance` functions.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use gp_kernels::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        constrain, cross_covariance, euclidean_distance, gram, identity, initialise, initialise_with,
        squared_distance, unconstrain, ActiveDims, Bijector, BijectorConfig, Bijectors, CombinationKernel,
        Combinator, CovarianceOperator, EigenKernel, GraphKernel, Kernel, KernelError, KernelParams, Matern12,
        Matern32, Matern52, Matrix, ParamSet, ParamTree, ParameterState, Polynomial, PrngKey, ProductKernel,
        StationaryProfile, SumKernel, Trainables, DEFAULT_JITTER, RBF,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal covariance operators.
    pub mod operators {
        pub use crate::operators::*;
    }
    /// Internal kernels.
    pub mod kernels {
        pub use crate::kernels::*;
    }
    /// Internal parameter handling.
    pub mod parameters {
        pub use crate::parameters::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
