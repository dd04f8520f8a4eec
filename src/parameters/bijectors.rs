//! Bijective transforms between constrained and unconstrained parameter spaces.
//!
//! ## Purpose
//!
//! Optimizers work on unconstrained reals while most kernel hyperparameters
//! must stay strictly positive. A `Bijector` maps one space to the other,
//! and a `BijectorConfig` decides which transform each parameter name uses.
//!
//! ## Key concepts
//!
//! * **forward**: unconstrained -> constrained (softplus for positive parameters).
//! * **inverse**: constrained -> unconstrained.
//!
//! ## Invariants
//!
//! * `inverse(forward(x)) == x` up to floating-point error.
//! * `Softplus::forward` is strictly positive for finite input.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap, string::String, string::ToString, vec::Vec};
#[cfg(feature = "std")]
use std::{collections::BTreeMap, string::String, vec::Vec};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::parameters::params::{KernelParams, ParamTree};
use crate::primitives::errors::KernelError;

// ============================================================================
// Bijector
// ============================================================================

/// Transform applied to a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bijector {
    /// No transform; the parameter is unconstrained.
    #[default]
    Identity,

    /// `log(1 + exp(x))`, mapping the reals onto `(0, inf)`.
    Softplus,
}

impl Bijector {
    /// Map an unconstrained value into the parameter's support.
    pub fn forward<T: Float>(&self, x: T) -> T {
        match self {
            Self::Identity => x,
            // max(x, 0) + log1p(exp(-|x|)) avoids overflow for large x
            Self::Softplus => x.max(T::zero()) + (-x.abs()).exp().ln_1p(),
        }
    }

    /// Map a constrained value back to the reals.
    pub fn inverse<T: Float>(&self, y: T) -> T {
        match self {
            Self::Identity => y,
            Self::Softplus => y + (-(-y).exp()).ln_1p(),
        }
    }
}

/// Per-parameter transforms with the same shape as the parameters.
pub type Bijectors = ParamTree<Bijector>;

// ============================================================================
// Bijector Configuration
// ============================================================================

/// Mapping from parameter name to the bijector it is optimized through.
#[derive(Debug, Clone, PartialEq)]
pub struct BijectorConfig {
    transforms: BTreeMap<String, Bijector>,
    fallback: Bijector,
}

impl BijectorConfig {
    /// Names of the built-in hyperparameters that must stay positive.
    pub const POSITIVE_PARAMETERS: [&'static str; 4] =
        ["lengthscale", "shift", "smoothness", "variance"];

    /// Config with no entries; every name falls back to `Identity`.
    pub fn empty() -> Self {
        Self {
            transforms: BTreeMap::new(),
            fallback: Bijector::Identity,
        }
    }

    /// Set the bijector for `name`.
    pub fn transform(mut self, name: &str, bijector: Bijector) -> Self {
        self.transforms.insert(name.to_string(), bijector);
        self
    }

    /// Set the bijector used for names without an entry.
    pub fn fallback(mut self, bijector: Bijector) -> Self {
        self.fallback = bijector;
        self
    }

    /// Bijector for `name`.
    pub fn get(&self, name: &str) -> Bijector {
        self.transforms.get(name).copied().unwrap_or(self.fallback)
    }

    /// Bijectors for every entry of `params`.
    pub fn build<T>(&self, params: &KernelParams<T>) -> Bijectors {
        params.map(|name, _| self.get(name))
    }
}

impl Default for BijectorConfig {
    fn default() -> Self {
        Self::POSITIVE_PARAMETERS
            .iter()
            .fold(Self::empty(), |cfg, name| {
                cfg.transform(name, Bijector::Softplus)
            })
    }
}

// ============================================================================
// Tree Transforms
// ============================================================================

/// Map unconstrained parameters into their supports.
pub fn constrain<T: Float>(
    params: &KernelParams<T>,
    bijectors: &Bijectors,
) -> Result<KernelParams<T>, KernelError> {
    params.try_zip_map(bijectors, |_, values, b| {
        values.iter().map(|&v| b.forward(v)).collect::<Vec<T>>()
    })
}

/// Map constrained parameters back to the reals.
pub fn unconstrain<T: Float>(
    params: &KernelParams<T>,
    bijectors: &Bijectors,
) -> Result<KernelParams<T>, KernelError> {
    params.try_zip_map(bijectors, |_, values, b| {
        values.iter().map(|&v| b.inverse(v)).collect::<Vec<T>>()
    })
}
