use soroban_sdk::{Address, Env};
use staking_types::{LedgerConfig, LedgerState, StakingError, StakingVariant};

use crate::{events, storage};

/// Proof that the configured admin authorized the current invocation.
///
/// Only `AdminCap::authorize` builds one, and every privileged ledger
/// operation takes it by reference.
pub struct AdminCap {
    _private: (),
}

impl AdminCap {
    pub fn authorize(env: &Env, caller: &Address) -> Result<Self, StakingError> {
        let config = storage::get_config(env)?;
        if *caller != config.admin {
            return Err(StakingError::Unauthorized);
        }
        caller.require_auth();
        Ok(Self { _private: () })
    }
}

/// Fails with `CircuitBreakerOpen` while the ledger is paused.
pub fn require_closed(state: &LedgerState) -> Result<(), StakingError> {
    if state.circuit_breaker_open {
        return Err(StakingError::CircuitBreakerOpen);
    }
    Ok(())
}

/// In the validator flavour only the validator pool opens and closes positions.
pub fn require_minter(config: &LedgerConfig, caller: &Address) -> Result<(), StakingError> {
    match &config.variant {
        StakingVariant::Public => Ok(()),
        StakingVariant::Validator(pool) if pool == caller => Ok(()),
        StakingVariant::Validator(_) => Err(StakingError::Unauthorized),
    }
}

pub fn trip(env: &Env, _cap: &AdminCap) -> Result<(), StakingError> {
    let mut state = storage::get_state(env)?;
    if state.circuit_breaker_open {
        return Err(StakingError::CircuitBreakerAlreadyOpen);
    }
    state.circuit_breaker_open = true;
    storage::set_state(env, &state);
    events::circuit_breaker(env, true);
    Ok(())
}

pub fn reset(env: &Env, _cap: &AdminCap) -> Result<(), StakingError> {
    let mut state = storage::get_state(env)?;
    if !state.circuit_breaker_open {
        return Err(StakingError::CircuitBreakerAlreadyClosed);
    }
    state.circuit_breaker_open = false;
    storage::set_state(env, &state);
    events::circuit_breaker(env, false);
    Ok(())
}
