use soroban_sdk::{Env, U256};
use staking_types::ACCUMULATOR_BITS;

/// Unsigned integer modulo 2^168.
///
/// Accumulators are allowed to overflow; every sum and difference is taken in
/// the ring Z/2^168, so a difference across the wrap boundary is still the
/// true distance travelled as long as that distance is below 2^168.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct U168(U256);

/// 2^168
pub fn accumulator_modulus(env: &Env) -> U256 {
    U256::from_u32(env, 1).shl(ACCUMULATOR_BITS)
}

impl U168 {
    /// Reduce an arbitrary 256-bit value into the ring.
    pub fn new(env: &Env, value: &U256) -> Self {
        Self(value.rem_euclid(&accumulator_modulus(env)))
    }

    pub fn zero(env: &Env) -> Self {
        Self(U256::from_u32(env, 0))
    }

    pub fn from_u128(env: &Env, value: u128) -> Self {
        Self::new(env, &U256::from_u128(env, value))
    }

    /// Largest representable value, 2^168 - 1.
    pub fn max(env: &Env) -> Self {
        Self(accumulator_modulus(env).sub(&U256::from_u32(env, 1)))
    }

    pub fn as_u256(&self) -> &U256 {
        &self.0
    }

    pub fn into_u256(self) -> U256 {
        self.0
    }

    /// (self + rhs) mod 2^168. `rhs` may be any 256-bit value.
    pub fn wrapping_add(&self, env: &Env, rhs: &U256) -> Self {
        let modulus = accumulator_modulus(env);
        // both operands are below 2^168, so the sum cannot leave 256 bits
        let rhs = rhs.rem_euclid(&modulus);
        Self(self.0.add(&rhs).rem_euclid(&modulus))
    }

    /// (self - rhs) mod 2^168.
    pub fn wrapping_sub(&self, env: &Env, rhs: &U168) -> Self {
        let modulus = accumulator_modulus(env);
        Self(self.0.add(&modulus).sub(&rhs.0).rem_euclid(&modulus))
    }
}
