#![no_std]

#[cfg(test)]
extern crate std;

mod custody;
mod events;
mod gate;
mod invariants;
mod ledger;
mod registry;
mod storage;

#[cfg(feature = "certora")]
pub mod certora_specs;

#[cfg(test)]
mod test;

use custody::TokenCustody;
use gate::AdminCap;
use ledger::Lock;
use soroban_sdk::{contract, contractimpl, Address, Env, U256};
use staking_types::{
    Asset, LedgerConfig, LedgerState, Position, StakingError, StakingVariant, DEPOSIT_MAGIC,
    MAX_GOVERNANCE_LOCK, MAX_MINT_LOCK, SCALE_FACTOR,
};

#[contract]
pub struct StakingPool;

fn token_custody(env: &Env) -> Result<TokenCustody, StakingError> {
    Ok(TokenCustody::new(storage::get_config(env)?))
}

/// Checks shared by every position-opening and position-closing entry point.
fn authorize_minter(env: &Env, caller: &Address) -> Result<TokenCustody, StakingError> {
    let config = storage::get_config(env)?;
    gate::require_minter(&config, caller)?;
    caller.require_auth();
    Ok(TokenCustody::new(config))
}

#[contractimpl]
impl StakingPool {
    /// Initialize the ledger
    ///
    /// # Arguments
    /// * `admin` - Holder of the privileged role
    /// * `native_asset` - Token contract paying asset 1 rewards
    /// * `token_asset` - Token contract staked as principal and paying asset 2 rewards
    /// * `variant` - Public staking, or validator staking restricted to one pool
    pub fn initialize(
        env: Env,
        admin: Address,
        native_asset: Address,
        token_asset: Address,
        variant: StakingVariant,
    ) -> Result<(), StakingError> {
        if storage::is_initialized(&env) {
            return Err(StakingError::AlreadyInitialized);
        }

        let config = LedgerConfig {
            admin: admin.clone(),
            native_asset: native_asset.clone(),
            token_asset: token_asset.clone(),
            variant,
        };
        storage::set_config(&env, &config);
        storage::set_state(&env, &LedgerState::new(&env));

        events::initialized(&env, &admin, &native_asset, &token_asset);
        Ok(())
    }

    // === Position lifecycle ===

    /// Stake `shares` token units into a new position owned by `caller`
    pub fn mint(env: Env, caller: Address, shares: u128) -> Result<u32, StakingError> {
        let mut custody = authorize_minter(&env, &caller)?;
        ledger::mint(&env, &mut custody, &caller, &caller, shares, 1)
    }

    /// Stake into a new position owned by `to`, burnable after `lock_duration` ledgers
    pub fn mint_to(
        env: Env,
        caller: Address,
        to: Address,
        shares: u128,
        lock_duration: u32,
    ) -> Result<u32, StakingError> {
        let mut custody = authorize_minter(&env, &caller)?;
        ledger::mint(&env, &mut custody, &caller, &to, shares, lock_duration)
    }

    /// Close a position and pay principal plus profit to its owner
    ///
    /// # Returns
    /// (native payout, token payout including principal)
    pub fn burn(env: Env, caller: Address, position_id: u32) -> Result<(u128, u128), StakingError> {
        let mut custody = authorize_minter(&env, &caller)?;
        ledger::burn(&env, &mut custody, &caller, position_id, &caller)
    }

    /// Close a position and pay principal plus profit to `to`
    pub fn burn_to(
        env: Env,
        caller: Address,
        to: Address,
        position_id: u32,
    ) -> Result<(u128, u128), StakingError> {
        let mut custody = authorize_minter(&env, &caller)?;
        ledger::burn(&env, &mut custody, &caller, position_id, &to)
    }

    // === Rewards ===

    /// Add `amount` of the native asset to the reward pool for every open position
    ///
    /// # Arguments
    /// * `magic` - Must equal `DEPOSIT_MAGIC`, guarding against misdirected transfers
    /// * `amount` - Whole units pulled from `caller`
    pub fn deposit_native(env: Env, caller: Address, magic: u32, amount: u128) -> Result<(), StakingError> {
        caller.require_auth();
        ledger::deposit(&env, &mut token_custody(&env)?, &caller, Asset::Native, magic, amount)
    }

    /// Add `amount` of the staked token to the reward pool, see `deposit_native`
    pub fn deposit_token(env: Env, caller: Address, magic: u32, amount: u128) -> Result<(), StakingError> {
        caller.require_auth();
        ledger::deposit(&env, &mut token_custody(&env)?, &caller, Asset::Token, magic, amount)
    }

    /// Pay the native profit accrued by a position to its owner
    pub fn collect_native(env: Env, caller: Address, position_id: u32) -> Result<u128, StakingError> {
        Self::collect_native_to(env, caller.clone(), caller, position_id)
    }

    /// Pay the native profit accrued by a position to `to`
    pub fn collect_native_to(
        env: Env,
        caller: Address,
        to: Address,
        position_id: u32,
    ) -> Result<u128, StakingError> {
        caller.require_auth();
        let (native, _) = ledger::collect(
            &env,
            &mut token_custody(&env)?,
            &caller,
            position_id,
            &[Asset::Native],
            &to,
        )?;
        Ok(native)
    }

    /// Pay the token profit accrued by a position to its owner
    pub fn collect_token(env: Env, caller: Address, position_id: u32) -> Result<u128, StakingError> {
        Self::collect_token_to(env, caller.clone(), caller, position_id)
    }

    /// Pay the token profit accrued by a position to `to`
    pub fn collect_token_to(
        env: Env,
        caller: Address,
        to: Address,
        position_id: u32,
    ) -> Result<u128, StakingError> {
        caller.require_auth();
        let (_, token) = ledger::collect(
            &env,
            &mut token_custody(&env)?,
            &caller,
            position_id,
            &[Asset::Token],
            &to,
        )?;
        Ok(token)
    }

    /// Collect both reward streams against one folded state
    ///
    /// # Returns
    /// (native payout, token payout)
    pub fn collect_all_profits(
        env: Env,
        caller: Address,
        position_id: u32,
    ) -> Result<(u128, u128), StakingError> {
        Self::collect_all_profits_to(env, caller.clone(), caller, position_id)
    }

    /// `collect_all_profits`, paying both streams to `to`
    pub fn collect_all_profits_to(
        env: Env,
        caller: Address,
        to: Address,
        position_id: u32,
    ) -> Result<(u128, u128), StakingError> {
        caller.require_auth();
        ledger::collect(
            &env,
            &mut token_custody(&env)?,
            &caller,
            position_id,
            &[Asset::Native, Asset::Token],
            &to,
        )
    }

    // === Locks ===

    /// Governance lock: keep `caller`'s position from burning for `duration` ledgers
    pub fn lock_position(
        env: Env,
        admin: Address,
        caller: Address,
        position_id: u32,
        duration: u32,
    ) -> Result<u32, StakingError> {
        let cap = AdminCap::authorize(&env, &admin)?;
        ledger::governance_lock(&env, &cap, &caller, position_id, duration)
    }

    pub fn lock_own_position(
        env: Env,
        caller: Address,
        position_id: u32,
        duration: u32,
    ) -> Result<u32, StakingError> {
        caller.require_auth();
        ledger::lock(&env, &caller, position_id, duration, Lock::Position)
    }

    /// Keep `caller`'s position from collecting (and burning) for `duration` ledgers
    pub fn lock_withdraw(
        env: Env,
        caller: Address,
        position_id: u32,
        duration: u32,
    ) -> Result<u32, StakingError> {
        caller.require_auth();
        ledger::lock(&env, &caller, position_id, duration, Lock::Withdraw)
    }

    // === Admin ===

    /// Send balance the ledger never accounted for to `to`
    pub fn skim_excess(env: Env, admin: Address, asset: Asset, to: Address) -> Result<u128, StakingError> {
        let cap = AdminCap::authorize(&env, &admin)?;
        ledger::skim_excess(&env, &cap, &mut token_custody(&env)?, asset, &to)
    }

    pub fn trip_circuit_breaker(env: Env, admin: Address) -> Result<(), StakingError> {
        let cap = AdminCap::authorize(&env, &admin)?;
        gate::trip(&env, &cap)
    }

    pub fn reset_circuit_breaker(env: Env, admin: Address) -> Result<(), StakingError> {
        let cap = AdminCap::authorize(&env, &admin)?;
        gate::reset(&env, &cap)
    }

    // === Ownership ===

    /// Move a position, with its accrued profit, to `to`
    pub fn transfer(env: Env, from: Address, to: Address, position_id: u32) -> Result<(), StakingError> {
        from.require_auth();
        registry::transfer(&env, &from, &to, position_id)?;
        events::position_transferred(&env, &from, &to, position_id);
        Ok(())
    }

    pub fn owner_of(env: Env, position_id: u32) -> Result<Address, StakingError> {
        registry::owner_of(&env, position_id)
    }

    pub fn balance_of(env: Env, owner: Address) -> u32 {
        registry::balance_of(&env, &owner)
    }

    pub fn token_of_owner_by_index(env: Env, owner: Address, index: u32) -> Option<u32> {
        registry::token_of_owner_by_index(&env, &owner, index)
    }

    // === View Functions ===

    pub fn estimate_native_collection(env: Env, position_id: u32) -> Result<u128, StakingError> {
        ledger::estimate_collection(&env, position_id, Asset::Native)
    }

    pub fn estimate_token_collection(env: Env, position_id: u32) -> Result<u128, StakingError> {
        ledger::estimate_collection(&env, position_id, Asset::Token)
    }

    pub fn estimate_excess(env: Env, asset: Asset) -> Result<u128, StakingError> {
        ledger::estimate_excess(&env, &token_custody(&env)?, asset)
    }

    pub fn get_position(env: Env, position_id: u32) -> Result<Position, StakingError> {
        storage::get_position(&env, position_id)
    }

    pub fn get_total_shares(env: Env) -> Result<u128, StakingError> {
        Ok(storage::get_state(&env)?.total_shares)
    }

    pub fn get_reserve(env: Env, asset: Asset) -> Result<u128, StakingError> {
        ledger::reserve(&env, asset)
    }

    /// (accumulator, slush) for `asset`, as stored
    pub fn get_accumulator(env: Env, asset: Asset) -> Result<(U256, U256), StakingError> {
        ledger::accumulator(&env, asset)
    }

    pub fn get_circuit_breaker(env: Env) -> Result<bool, StakingError> {
        Ok(storage::get_state(&env)?.circuit_breaker_open)
    }

    pub fn get_config(env: Env) -> Result<LedgerConfig, StakingError> {
        storage::get_config(&env)
    }

    pub fn get_accumulator_scale_factor(_env: Env) -> u128 {
        SCALE_FACTOR
    }

    pub fn get_max_mint_lock(_env: Env) -> u32 {
        MAX_MINT_LOCK
    }

    pub fn get_max_governance_lock(_env: Env) -> u32 {
        MAX_GOVERNANCE_LOCK
    }

    pub fn get_deposit_magic(_env: Env) -> u32 {
        DEPOSIT_MAGIC
    }
}
