//! Pseudo-random key for parameter initialization.
//!
//! Kernels receive a `PrngKey` when asked for default hyperparameters so
//! that randomized initialization schemes can be added without changing
//! the trait. The built-in kernels initialize deterministically.

/// Seed-carrying PRNG key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PrngKey {
    state: u64,
}

impl PrngKey {
    /// Create a key from a seed.
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// The seed carried by this key.
    pub const fn seed(&self) -> u64 {
        self.state
    }

    /// Derive two independent keys.
    ///
    /// Advances the state with one 64-bit LCG step, then passes it through
    /// the splitmix64 finalizer under two different salts. Neither half is a
    /// further split of the other, so keys handed out along nested splits do
    /// not repeat.
    pub fn split(self) -> (Self, Self) {
        let base = Self::step(self.state);
        (
            Self::new(Self::mix(base ^ LEFT_SALT)),
            Self::new(Self::mix(base ^ RIGHT_SALT)),
        )
    }

    #[inline]
    fn step(state: u64) -> u64 {
        state.wrapping_mul(6364136223846793005).wrapping_add(1)
    }

    #[inline]
    fn mix(mut z: u64) -> u64 {
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }
}

const LEFT_SALT: u64 = 0x9e3779b97f4a7c15;
const RIGHT_SALT: u64 = 0x6a09e667f3bcc909;
