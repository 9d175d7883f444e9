//! Position lifecycle: mint, burn, collect, deposit, skim and locking.
//!
//! Every function reads the global state from storage, applies its effects,
//! writes state back and only then moves assets out through `Custody`. A call
//! that re-enters from inside `push` therefore sees the finished operation.

use soroban_sdk::{log, Address, Env, U256};
use staking_math::{collect as collect_payout, deposit as add_to_slush, estimate, fold, slush_in_units};
use staking_types::{
    Asset, LedgerState, Position, StakingError, DEPOSIT_MAGIC, MAX_GOVERNANCE_LOCK,
    MAX_MINT_LOCK, MAX_TOTAL_SHARES,
};

use crate::custody::Custody;
use crate::gate::{self, AdminCap};
use crate::{events, invariants, registry, storage};

const BOTH: [Asset; 2] = [Asset::Native, Asset::Token];

fn now(env: &Env) -> u32 {
    env.ledger().sequence()
}

fn fold_all(env: &Env, state: &mut LedgerState) {
    let total_shares = state.total_shares;
    for asset in BOTH {
        fold(env, state.accumulator_mut(asset), total_shares);
        debug_assert!(invariants::accumulator_in_range(env, state.accumulator(asset)));
        debug_assert!(invariants::folded_slush_below_shares(
            env,
            state.accumulator(asset),
            total_shares
        ));
    }
}

fn release(state: &mut LedgerState, asset: Asset, amount: u128) -> Result<(), StakingError> {
    let custody = state.custody_mut(asset);
    *custody = custody
        .checked_sub(amount)
        .ok_or(StakingError::InsufficientAssetBalance)?;
    Ok(())
}

/// Load a position `caller` owns.
fn owned_position(env: &Env, caller: &Address, position_id: u32) -> Result<Position, StakingError> {
    registry::require_owner(env, caller, position_id)?;
    storage::get_position(env, position_id)
}

/// Open a position of `shares` for `owner`, paid for by `payer`.
pub fn mint<C: Custody>(
    env: &Env,
    custody: &mut C,
    payer: &Address,
    owner: &Address,
    shares: u128,
    lock_duration: u32,
) -> Result<u32, StakingError> {
    let state = storage::get_state(env)?;
    gate::require_closed(&state)?;
    if shares == 0 {
        return Err(StakingError::ZeroAmount);
    }
    add_shares(state.total_shares, shares)?;
    if lock_duration > MAX_MINT_LOCK {
        return Err(StakingError::LockDurationExceedsMaximum);
    }

    custody.pull(env, Asset::Token, payer, shares)?;

    // the pull may have re-entered; build on what is stored now
    let mut state = storage::get_state(env)?;
    fold_all(env, &mut state);

    let position_id = state.next_position_id;
    let minted_at = now(env);
    let position = Position::open(
        minted_at,
        shares,
        lock_duration,
        state.native.accumulator.clone(),
        state.token.accumulator.clone(),
    );
    debug_assert!(invariants::position_well_formed(&position, minted_at));
    state.next_position_id += 1;
    state.total_shares = add_shares(state.total_shares, shares)?;
    state.custody_token = state
        .custody_token
        .checked_add(shares)
        .ok_or(StakingError::AmountOverflow)?;

    storage::set_position(env, position_id, &position);
    registry::mint(env, owner, position_id);
    storage::set_state(env, &state);

    events::position_minted(env, owner, position_id, shares, position.free_after);
    Ok(position_id)
}

fn add_shares(total_shares: u128, shares: u128) -> Result<u128, StakingError> {
    match total_shares.checked_add(shares) {
        Some(total) if total <= MAX_TOTAL_SHARES => Ok(total),
        _ => Err(StakingError::MintExceedsMaximumSupply),
    }
}

/// Close a position, paying principal and all accrued profit to `to`.
///
/// Returns `(native payout, token payout including principal)`.
pub fn burn<C: Custody>(
    env: &Env,
    custody: &mut C,
    caller: &Address,
    position_id: u32,
    to: &Address,
) -> Result<(u128, u128), StakingError> {
    let mut position = owned_position(env, caller, position_id)?;
    let now = now(env);
    if now <= position.free_after {
        return Err(StakingError::BurnBeforeFreeTime);
    }
    if now <= position.withdraw_free_after {
        return Err(StakingError::WithdrawBeforeFreeTime);
    }

    let mut state = storage::get_state(env)?;
    fold_all(env, &mut state);

    let total_shares = state.total_shares;
    let payout_native = collect_payout(
        env,
        &mut state.native,
        total_shares,
        position.shares,
        &mut position.accumulator_native,
    )?;
    let payout_token = collect_payout(
        env,
        &mut state.token,
        total_shares,
        position.shares,
        &mut position.accumulator_token,
    )?;
    let token_out = payout_token
        .checked_add(position.shares)
        .ok_or(StakingError::AmountOverflow)?;

    state.total_shares -= position.shares;
    release(&mut state, Asset::Native, payout_native)?;
    release(&mut state, Asset::Token, token_out)?;

    storage::remove_position(env, position_id);
    registry::burn(env, caller, position_id);
    storage::set_state(env, &state);
    events::position_burned(env, caller, position_id, payout_native, token_out);

    custody.push(env, Asset::Token, to, token_out)?;
    custody.push(env, Asset::Native, to, payout_native)?;
    Ok((payout_native, token_out))
}

/// Pay out accrued profit in `assets` to `to`.
///
/// Both accumulators are folded before any payout is computed, so collecting
/// both assets in one call sees a single consistent state.
/// Returns `(native payout, token payout)`; an asset not asked for pays 0.
pub fn collect<C: Custody>(
    env: &Env,
    custody: &mut C,
    caller: &Address,
    position_id: u32,
    assets: &[Asset],
    to: &Address,
) -> Result<(u128, u128), StakingError> {
    let mut position = owned_position(env, caller, position_id)?;
    if !position.can_collect(now(env)) {
        return Err(StakingError::WithdrawBeforeFreeTime);
    }

    let mut state = storage::get_state(env)?;
    fold_all(env, &mut state);

    let total_shares = state.total_shares;
    let mut payouts = (0u128, 0u128);
    for asset in assets.iter().copied() {
        let payout = collect_payout(
            env,
            state.accumulator_mut(asset),
            total_shares,
            position.shares,
            position.snapshot_mut(asset),
        )?;
        release(&mut state, asset, payout)?;
        match asset {
            Asset::Native => payouts.0 += payout,
            Asset::Token => payouts.1 += payout,
        }
    }

    storage::set_position(env, position_id, &position);
    storage::set_state(env, &state);
    events::profits_collected(env, caller, position_id, payouts.0, payouts.1);

    custody.push(env, Asset::Native, to, payouts.0)?;
    custody.push(env, Asset::Token, to, payouts.1)?;
    Ok(payouts)
}

/// Add a reward of `amount` units of `asset` to slush.
pub fn deposit<C: Custody>(
    env: &Env,
    custody: &mut C,
    from: &Address,
    asset: Asset,
    magic: u32,
    amount: u128,
) -> Result<(), StakingError> {
    let state = storage::get_state(env)?;
    gate::require_closed(&state)?;
    if magic != DEPOSIT_MAGIC {
        log!(env, "bad magic number", magic);
        return Err(StakingError::BadMagicNumber);
    }
    if amount == 0 {
        return Err(StakingError::ZeroAmount);
    }

    custody.pull(env, asset, from, amount)?;

    let mut state = storage::get_state(env)?;
    add_to_slush(env, state.accumulator_mut(asset), amount)?;
    let held = state.custody_mut(asset);
    *held = held.checked_add(amount).ok_or(StakingError::AmountOverflow)?;
    storage::set_state(env, &state);

    events::deposit(env, from, asset, amount);
    Ok(())
}

/// What `collect` would pay `position_id` in `asset` right now.
///
/// Ignores time locks and changes nothing.
pub fn estimate_collection(env: &Env, position_id: u32, asset: Asset) -> Result<u128, StakingError> {
    let position = storage::get_position(env, position_id)?;
    let state = storage::get_state(env)?;
    estimate(
        env,
        state.accumulator(asset),
        state.total_shares,
        position.shares,
        position.snapshot(asset),
    )
}

/// Units owed to open positions: custody minus rounded-up slush.
pub fn reserve(env: &Env, asset: Asset) -> Result<u128, StakingError> {
    let state = storage::get_state(env)?;
    let slush = slush_in_units(env, &state.accumulator(asset).slush)?;
    Ok(state.custody(asset).saturating_sub(slush))
}

/// `(accumulator, slush)` as stored, without folding.
pub fn accumulator(env: &Env, asset: Asset) -> Result<(U256, U256), StakingError> {
    let state = storage::get_state(env)?;
    let acc = state.accumulator(asset);
    Ok((acc.accumulator.clone(), acc.slush.clone()))
}

/// Balance of `asset` that arrived outside `deposit` and `mint`.
pub fn estimate_excess<C: Custody>(env: &Env, custody: &C, asset: Asset) -> Result<u128, StakingError> {
    let state = storage::get_state(env)?;
    let balance = custody.balance(env, asset);
    let held = state.custody(asset);
    let slush_units = slush_in_units(env, &state.accumulator(asset).slush)?;
    debug_assert!(invariants::conservation_holds(
        balance,
        held.saturating_sub(slush_units),
        slush_units
    ));
    Ok(invariants::excess(balance, held))
}

/// Send all excess `asset` to `to`. Ledger state is not modified.
pub fn skim_excess<C: Custody>(
    env: &Env,
    _cap: &AdminCap,
    custody: &mut C,
    asset: Asset,
    to: &Address,
) -> Result<u128, StakingError> {
    let excess = estimate_excess(env, custody, asset)?;
    custody.push(env, asset, to, excess)?;
    events::excess_skimmed(env, to, asset, excess);
    Ok(excess)
}

/// Which of a position's two locks to extend.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Lock {
    /// Burn eligibility (`free_after`)
    Position,
    /// Collection eligibility (`withdraw_free_after`)
    Withdraw,
}

/// Push a lock of `caller`'s position out to at least `now + duration`.
///
/// Locks never move backwards. Returns the resulting lock height.
pub fn lock(
    env: &Env,
    caller: &Address,
    position_id: u32,
    duration: u32,
    kind: Lock,
) -> Result<u32, StakingError> {
    let state = storage::get_state(env)?;
    gate::require_closed(&state)?;
    if duration > MAX_GOVERNANCE_LOCK {
        return Err(StakingError::LockDurationExceedsMaximum);
    }

    let mut position = owned_position(env, caller, position_id)?;
    let until = now(env).saturating_add(duration);
    let lock_height = match kind {
        Lock::Position => {
            position.free_after = position.free_after.max(until);
            position.free_after
        }
        Lock::Withdraw => {
            position.withdraw_free_after = position.withdraw_free_after.max(until);
            position.withdraw_free_after
        }
    };
    storage::set_position(env, position_id, &position);

    match kind {
        Lock::Position => events::position_locked(env, position_id, lock_height),
        Lock::Withdraw => events::withdraw_locked(env, position_id, lock_height),
    }
    Ok(lock_height)
}

/// Governance lock on behalf of `caller`. Same rules as `lock`.
pub fn governance_lock(
    env: &Env,
    _cap: &AdminCap,
    caller: &Address,
    position_id: u32,
    duration: u32,
) -> Result<u32, StakingError> {
    lock(env, caller, position_id, duration, Lock::Position)
}
