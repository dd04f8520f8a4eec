//! Initial parameter state for a kernel.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::kernels::Kernel;
use crate::math::linalg::FloatLinalg;
use crate::parameters::bijectors::{BijectorConfig, Bijectors};
use crate::parameters::params::{KernelParams, ParamTree};
use crate::primitives::key::PrngKey;

/// Trainability flags with the same shape as the parameters.
pub type Trainables = ParamTree<bool>;

/// Default parameters together with their trainability and transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterState<T> {
    /// Hyperparameter values in the constrained space.
    pub params: KernelParams<T>,
    /// Whether each parameter is optimized.
    pub trainables: Trainables,
    /// Transform each parameter is optimized through.
    pub bijectors: Bijectors,
}

impl<T: Float> ParameterState<T> {
    /// Split into `(params, trainables, bijectors)`.
    pub fn unpack(self) -> (KernelParams<T>, Trainables, Bijectors) {
        (self.params, self.trainables, self.bijectors)
    }
}

/// Initialise a kernel's parameter state with the default bijector config.
pub fn initialise<T, K>(kernel: &K, key: PrngKey) -> ParameterState<T>
where
    T: FloatLinalg,
    K: Kernel<T> + ?Sized,
{
    initialise_with(kernel, key, &BijectorConfig::default())
}

/// Initialise a kernel's parameter state with an explicit bijector config.
pub fn initialise_with<T, K>(kernel: &K, key: PrngKey, config: &BijectorConfig) -> ParameterState<T>
where
    T: FloatLinalg,
    K: Kernel<T> + ?Sized,
{
    let params = kernel.init_params(key);
    let trainables = params.map(|_, _| true);
    let bijectors = config.build(&params);
    log::debug!(
        "initialised {} parameter entries for {}",
        params.len(),
        kernel.name()
    );
    ParameterState {
        params,
        trainables,
        bijectors,
    }
}
