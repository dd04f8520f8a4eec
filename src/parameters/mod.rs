//! Layer 1: Parameters
//!
//! # Purpose
//!
//! Hyperparameter storage and the machinery around it:
//! - Named parameter sets and nested parameter trees
//! - Bijectors between constrained and unconstrained spaces
//! - Initial parameter state (values, trainables, bijectors)

/// Parameter sets and trees.
pub mod params;

/// Constraining transforms.
pub mod bijectors;

/// Initial parameter state.
pub mod state;
