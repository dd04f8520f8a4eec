//! Hyperparameter containers.
//!
//! ## Purpose
//!
//! This module provides the named-value containers kernels read their
//! hyperparameters from. A single kernel uses a flat `ParamSet`; a
//! combination kernel uses one entry per child, which nests arbitrarily.
//!
//! ## Design notes
//!
//! * **Ordered**: Names iterate in sorted order, so default parameter sets
//!   list `lengthscale` before `variance` and `shift` before `variance`.
//! * **Generic tree**: `ParamTree<V>` carries values, trainability flags and
//!   bijectors with the same shape, so they can be zipped together.
//!
//! ## Invariants
//!
//! * Scalar hyperparameters are stored as length-1 vectors.
//! * A `Combination` tree has exactly one entry per kernel in the set it
//!   was produced for.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};
#[cfg(feature = "std")]
use std::{collections::BTreeMap, string::String, vec::Vec};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::KernelError;

// ============================================================================
// Parameter Set
// ============================================================================

/// Flat mapping from parameter name to value.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSet<V> {
    entries: BTreeMap<String, V>,
}

impl<V> Default for ParamSet<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ParamSet<V> {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: V) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, name: &str, value: V) -> Option<V> {
        self.entries.insert(name.to_string(), value)
    }

    /// Look up a value by name.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(name)
    }

    /// Mutable lookup by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut V> {
        self.entries.get_mut(name)
    }

    /// Whether `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Parameter names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Float> ParamSet<Vec<T>> {
    /// Look up a parameter, failing if absent.
    pub fn require(&self, name: &str) -> Result<&[T], KernelError> {
        self.entries
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| KernelError::MissingParameter(name.to_string()))
    }

    /// Look up a parameter that must hold a single value.
    pub fn scalar(&self, name: &str) -> Result<T, KernelError> {
        match self.require(name)? {
            [v] => Ok(*v),
            other => Err(KernelError::InvalidParameterShape {
                name: name.to_string(),
                expected: 1,
                got: other.len(),
            }),
        }
    }

    /// Look up a per-dimension parameter, broadcasting a single value to `ndims`.
    pub fn broadcast(&self, name: &str, ndims: usize) -> Result<Vec<T>, KernelError> {
        let values = self.require(name)?;
        match values.len() {
            1 => Ok(vec![values[0]; ndims]),
            n if n == ndims => Ok(values.to_vec()),
            got => Err(KernelError::InvalidParameterShape {
                name: name.to_string(),
                expected: ndims,
                got,
            }),
        }
    }
}

// ============================================================================
// Parameter Tree
// ============================================================================

/// Parameters for a single kernel or a kernel set.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamTree<V> {
    /// Parameters of a single kernel.
    Leaf(ParamSet<V>),

    /// One entry per kernel of a combination kernel.
    Combination(Vec<ParamTree<V>>),
}

/// Hyperparameter values.
pub type KernelParams<T> = ParamTree<Vec<T>>;

impl<V> From<ParamSet<V>> for ParamTree<V> {
    fn from(set: ParamSet<V>) -> Self {
        Self::Leaf(set)
    }
}

impl<V> ParamTree<V> {
    /// The flat set of a single kernel.
    pub fn leaf(&self) -> Result<&ParamSet<V>, KernelError> {
        match self {
            Self::Leaf(set) => Ok(set),
            Self::Combination(_) => Err(KernelError::ParameterStructure(
                "expected a single kernel's parameters, got a parameter list",
            )),
        }
    }

    /// Per-kernel entries of a combination.
    pub fn children(&self) -> Result<&[ParamTree<V>], KernelError> {
        match self {
            Self::Combination(children) => Ok(children),
            Self::Leaf(_) => Err(KernelError::ParameterStructure(
                "expected a parameter list, got a single kernel's parameters",
            )),
        }
    }

    /// Entry `i` of a combination.
    pub fn get(&self, i: usize) -> Option<&ParamTree<V>> {
        match self {
            Self::Combination(children) => children.get(i),
            Self::Leaf(_) => None,
        }
    }

    /// Whether this is a single kernel's parameter set.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Number of named parameters (leaf) or kernel entries (combination).
    pub fn len(&self) -> usize {
        match self {
            Self::Leaf(set) => set.len(),
            Self::Combination(children) => children.len(),
        }
    }

    /// Whether there is nothing stored at this level.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a tree of the same shape by mapping every named value.
    pub fn map<U, F>(&self, mut f: F) -> ParamTree<U>
    where
        F: FnMut(&str, &V) -> U,
    {
        self.map_inner(&mut f)
    }

    fn map_inner<U, F>(&self, f: &mut F) -> ParamTree<U>
    where
        F: FnMut(&str, &V) -> U,
    {
        match self {
            Self::Leaf(set) => {
                let mut out = ParamSet::new();
                for (name, value) in set.iter() {
                    out.insert(name, f(name, value));
                }
                ParamTree::Leaf(out)
            }
            Self::Combination(children) => {
                ParamTree::Combination(children.iter().map(|c| c.map_inner(f)).collect())
            }
        }
    }

    /// Walk two trees of the same shape, combining values with matching names.
    ///
    /// Names are taken from `self`; a name missing from `other` is an error.
    pub fn try_zip_map<W, U, F>(&self, other: &ParamTree<W>, mut f: F) -> Result<ParamTree<U>, KernelError>
    where
        F: FnMut(&str, &V, &W) -> U,
    {
        self.zip_inner(other, &mut f)
    }

    fn zip_inner<W, U, F>(&self, other: &ParamTree<W>, f: &mut F) -> Result<ParamTree<U>, KernelError>
    where
        F: FnMut(&str, &V, &W) -> U,
    {
        match (self, other) {
            (Self::Leaf(a), ParamTree::Leaf(b)) => {
                let mut out = ParamSet::new();
                for (name, value) in a.iter() {
                    let rhs = b
                        .get(name)
                        .ok_or_else(|| KernelError::MissingParameter(name.to_string()))?;
                    out.insert(name, f(name, value, rhs));
                }
                Ok(ParamTree::Leaf(out))
            }
            (Self::Combination(a), ParamTree::Combination(b)) => {
                if a.len() != b.len() {
                    return Err(KernelError::ParameterCountMismatch {
                        expected: a.len(),
                        got: b.len(),
                    });
                }
                let children = a
                    .iter()
                    .zip(b.iter())
                    .map(|(x, y)| x.zip_inner(y, f))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ParamTree::Combination(children))
            }
            _ => Err(KernelError::ParameterStructure(
                "parameter trees have different shapes",
            )),
        }
    }
}
