// ============================================================================
// LIFECYCLE SPECIFICATIONS
// ============================================================================
//
// These rules call the contract entry points and compare stored state.
//
// ============================================================================

use cvlr::asserts::{cvlr_assert, cvlr_assume};
use cvlr_soroban_derive::rule;
use soroban_sdk::{Address, Env};
use staking_types::{StakingError, StakingVariant, DEPOSIT_MAGIC, MAX_GOVERNANCE_LOCK};

use super::model::{self, LedgerSnapshot};
use crate::{storage, StakingPool};

/// RULE: A successful mint adds exactly the minted shares
#[rule]
pub fn mint_adds_shares(
    env: Env,
    admin: Address,
    native: Address,
    token: Address,
    caller: Address,
    shares: u128,
) {
    model::init();
    cvlr_assume!(shares > 0);
    let _ = StakingPool::initialize(env.clone(), admin, native, token, StakingVariant::Public);

    let Ok(before) = storage::get_state(&env) else { return };
    if StakingPool::mint(env.clone(), caller, shares).is_ok() {
        model::add_shares_delta(shares as i128);
        let Ok(after) = storage::get_state(&env) else { return };
        let delta = (after.total_shares - before.total_shares) as i128;
        cvlr_assert!(delta == model::shares_delta());
        cvlr_assert!(after.next_position_id == before.next_position_id + 1);
    }
}

/// RULE: An open circuit breaker blocks mint and deposit
#[rule]
pub fn paused_ledger_rejects_entry(
    env: Env,
    admin: Address,
    native: Address,
    token: Address,
    caller: Address,
    shares: u128,
    amount: u128,
) {
    let _ = StakingPool::initialize(env.clone(), admin.clone(), native, token, StakingVariant::Public);
    cvlr_assume!(StakingPool::trip_circuit_breaker(env.clone(), admin).is_ok());

    let minted = StakingPool::mint(env.clone(), caller.clone(), shares);
    cvlr_assert!(minted == Err(StakingError::CircuitBreakerOpen));

    let deposited = StakingPool::deposit_native(env.clone(), caller, DEPOSIT_MAGIC, amount);
    cvlr_assert!(deposited == Err(StakingError::CircuitBreakerOpen));
}

/// RULE: An open circuit breaker never blocks collection
#[rule]
pub fn paused_ledger_allows_collect(env: Env, admin: Address, caller: Address) {
    model::init();
    let position_id = model::skolem_position_id();
    cvlr_assume!(StakingPool::trip_circuit_breaker(env.clone(), admin).is_ok());

    let result = StakingPool::collect_all_profits(env.clone(), caller, position_id);
    cvlr_assert!(result != Err(StakingError::CircuitBreakerOpen));
}

/// RULE: Skim moves no ledger accounting
#[rule]
pub fn skim_preserves_accounting(env: Env, admin: Address, to: Address) {
    let Ok(before) = storage::get_state(&env) else { return };
    let before = LedgerSnapshot::capture(&before);

    if StakingPool::skim_excess(env.clone(), admin, staking_types::Asset::Native, to).is_ok() {
        let Ok(after) = storage::get_state(&env) else { return };
        let after = LedgerSnapshot::capture(&after);
        cvlr_assert!(after.total_shares == before.total_shares);
        cvlr_assert!(after.custody_native == before.custody_native);
        cvlr_assert!(after.custody_token == before.custody_token);
        cvlr_assert!(after.accumulator_native == before.accumulator_native);
    }
}

/// RULE: Locks only ever move forward
#[rule]
pub fn lock_never_shortens(env: Env, caller: Address, duration: u32) {
    model::init();
    let position_id = model::skolem_position_id();
    cvlr_assume!(duration <= MAX_GOVERNANCE_LOCK);

    let Ok(before) = storage::get_position(&env, position_id) else { return };
    if StakingPool::lock_own_position(env.clone(), caller, position_id, duration).is_ok() {
        let Ok(after) = storage::get_position(&env, position_id) else { return };
        cvlr_assert!(after.free_after >= before.free_after);
        cvlr_assert!(after.withdraw_free_after == before.withdraw_free_after);
    }
}
