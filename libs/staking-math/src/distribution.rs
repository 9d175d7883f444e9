use soroban_sdk::{Env, U256};
use staking_types::{Accumulator, StakingError, SCALE_FACTOR, SLUSH_LIMIT_BITS};

use crate::U168;

pub fn scale_factor(env: &Env) -> U256 {
    U256::from_u128(env, SCALE_FACTOR)
}

/// 2^167, the exclusive upper bound on slush.
pub fn slush_limit(env: &Env) -> U256 {
    U256::from_u32(env, 1).shl(SLUSH_LIMIT_BITS)
}

/// Add a deposit of `amount` whole units to slush.
///
/// The accumulator is not touched; the value is distributed by the next `fold`.
pub fn deposit(env: &Env, acc: &mut Accumulator, amount: u128) -> Result<(), StakingError> {
    if amount == 0 {
        return Err(StakingError::ZeroAmount);
    }

    let scaled = U256::from_u128(env, amount).mul(&scale_factor(env));
    let slush = acc.slush.add(&scaled);
    if slush >= slush_limit(env) {
        return Err(StakingError::SlushTooLarge);
    }

    acc.slush = slush;
    Ok(())
}

/// Move as much slush as divides evenly across `total_shares` into the accumulator.
///
/// With no outstanding shares there is nobody to credit and slush stays put.
pub fn fold(env: &Env, acc: &mut Accumulator, total_shares: u128) {
    if total_shares == 0 {
        return;
    }

    let shares = U256::from_u128(env, total_shares);
    let delta = acc.slush.div(&shares);
    acc.slush = acc.slush.sub(&delta.mul(&shares));
    acc.accumulator = U168::new(env, &acc.accumulator)
        .wrapping_add(env, &delta)
        .into_u256();
}

/// Fold, then pay a position holding `position_shares` everything accrued since `snapshot`.
///
/// Returns the payout in whole units. The sub-unit remainder goes back into
/// slush and `snapshot` is moved to the folded accumulator. A position that
/// holds every outstanding share also takes whatever slush is left.
pub fn collect(
    env: &Env,
    acc: &mut Accumulator,
    total_shares: u128,
    position_shares: u128,
    snapshot: &mut U256,
) -> Result<u128, StakingError> {
    fold(env, acc, total_shares);

    let current = U168::new(env, &acc.accumulator);
    let diff = current.wrapping_sub(env, &U168::new(env, snapshot));
    let mut raw = diff.as_u256().mul(&U256::from_u128(env, position_shares));
    let mut slush = acc.slush.clone();

    if total_shares == position_shares {
        raw = raw.add(&slush);
        slush = U256::from_u32(env, 0);
    }

    let scale = scale_factor(env);
    let payout = raw.div(&scale);
    let remainder = raw.sub(&payout.mul(&scale));
    let amount = payout.to_u128().ok_or(StakingError::AmountOverflow)?;

    acc.slush = slush.add(&remainder);
    *snapshot = current.into_u256();
    Ok(amount)
}

/// What `collect` would pay right now, without touching any state.
pub fn estimate(
    env: &Env,
    acc: &Accumulator,
    total_shares: u128,
    position_shares: u128,
    snapshot: &U256,
) -> Result<u128, StakingError> {
    let mut acc = acc.clone();
    let mut snapshot = snapshot.clone();
    collect(env, &mut acc, total_shares, position_shares, &mut snapshot)
}

/// ceil(slush / SCALE_FACTOR): whole units slush will eventually pay out.
pub fn slush_in_units(env: &Env, slush: &U256) -> Result<u128, StakingError> {
    let scale = scale_factor(env);
    let whole = slush.div(&scale);
    let rounded = if whole.mul(&scale) == *slush {
        whole
    } else {
        whole.add(&U256::from_u32(env, 1))
    };
    rounded.to_u128().ok_or(StakingError::AmountOverflow)
}
