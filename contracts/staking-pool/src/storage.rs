use soroban_sdk::{contracttype, Address, Env};
use staking_types::{LedgerConfig, LedgerState, Position, StakingError};

// ============================================================================
// STORAGE LAYOUT
// ============================================================================
// - Config and State live in instance storage; every operation reads both.
// - Each position, its owner and its slot in the owner's index are separate
//   persistent entries, so no single entry grows with the number of holders.
// - A mint or burn writes at most 6 persistent entries plus the instance.
// ============================================================================

/// Storage keys for the staking pool contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Deployment configuration (Instance storage)
    Config,
    /// Global ledger state (Instance storage)
    State,
    /// Position ID -> Position (Persistent storage)
    Position(u32),
    /// Position ID -> Owner
    PositionOwner(u32),
    /// Owner -> number of positions held
    OwnerPositionCount(Address),
    /// Owner -> index -> position ID
    OwnerPositionAt(Address, u32),
    /// Position ID -> index in owner's list (for O(1) removal)
    PositionIndex(u32),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

pub fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

// === Config ===

pub fn get_config(env: &Env) -> Result<LedgerConfig, StakingError> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(StakingError::NotInitialized)?;
    extend_instance_ttl(env);
    Ok(config)
}

pub fn set_config(env: &Env, config: &LedgerConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === State ===

pub fn get_state(env: &Env) -> Result<LedgerState, StakingError> {
    let state = env
        .storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(StakingError::NotInitialized)?;
    extend_instance_ttl(env);
    Ok(state)
}

pub fn set_state(env: &Env, state: &LedgerState) {
    env.storage().instance().set(&DataKey::State, state);
    extend_instance_ttl(env);
}

// === Position ===

pub fn get_position(env: &Env, position_id: u32) -> Result<Position, StakingError> {
    let key = DataKey::Position(position_id);
    let position = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(StakingError::InvalidPositionId)?;
    extend_persistent_ttl(env, &key);
    Ok(position)
}

pub fn set_position(env: &Env, position_id: u32, position: &Position) {
    let key = DataKey::Position(position_id);
    env.storage().persistent().set(&key, position);
    extend_persistent_ttl(env, &key);
}

pub fn remove_position(env: &Env, position_id: u32) {
    env.storage()
        .persistent()
        .remove(&DataKey::Position(position_id));
}
