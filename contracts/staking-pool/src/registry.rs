//! Exclusive, transferable ownership of position handles.
//!
//! Every owner has an indexed list of the ids they hold. Adds append, removals
//! swap the last entry into the freed slot, so both are O(1).

use soroban_sdk::{Address, Env};
use staking_types::StakingError;

use crate::storage::{extend_persistent_ttl, DataKey};

pub fn owner_of(env: &Env, position_id: u32) -> Result<Address, StakingError> {
    let key = DataKey::PositionOwner(position_id);
    let owner = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(StakingError::InvalidPositionId)?;
    extend_persistent_ttl(env, &key);
    Ok(owner)
}

/// Fails unless `caller` currently owns `position_id`.
pub fn require_owner(env: &Env, caller: &Address, position_id: u32) -> Result<(), StakingError> {
    if owner_of(env, position_id)? != *caller {
        return Err(StakingError::CallerNotPositionOwner);
    }
    Ok(())
}

pub fn balance_of(env: &Env, owner: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::OwnerPositionCount(owner.clone()))
        .unwrap_or(0)
}

pub fn token_of_owner_by_index(env: &Env, owner: &Address, index: u32) -> Option<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::OwnerPositionAt(owner.clone(), index))
}

/// Hand a freshly created handle to `owner`.
pub fn mint(env: &Env, owner: &Address, position_id: u32) {
    let key = DataKey::PositionOwner(position_id);
    env.storage().persistent().set(&key, owner);
    extend_persistent_ttl(env, &key);
    push_to_owner(env, owner, position_id);
}

/// Destroy a handle. The caller has already checked ownership.
pub fn burn(env: &Env, owner: &Address, position_id: u32) {
    env.storage()
        .persistent()
        .remove(&DataKey::PositionOwner(position_id));
    remove_from_owner(env, owner, position_id);
}

pub fn transfer(env: &Env, from: &Address, to: &Address, position_id: u32) -> Result<(), StakingError> {
    require_owner(env, from, position_id)?;

    let key = DataKey::PositionOwner(position_id);
    env.storage().persistent().set(&key, to);
    extend_persistent_ttl(env, &key);

    remove_from_owner(env, from, position_id);
    push_to_owner(env, to, position_id);
    Ok(())
}

fn push_to_owner(env: &Env, owner: &Address, position_id: u32) {
    let count = balance_of(env, owner);

    let slot = DataKey::OwnerPositionAt(owner.clone(), count);
    env.storage().persistent().set(&slot, &position_id);
    extend_persistent_ttl(env, &slot);

    let index = DataKey::PositionIndex(position_id);
    env.storage().persistent().set(&index, &count);
    extend_persistent_ttl(env, &index);

    let count_key = DataKey::OwnerPositionCount(owner.clone());
    env.storage().persistent().set(&count_key, &(count + 1));
    extend_persistent_ttl(env, &count_key);
}

fn remove_from_owner(env: &Env, owner: &Address, position_id: u32) {
    let count = balance_of(env, owner);
    if count == 0 {
        return;
    }

    let index: u32 = env
        .storage()
        .persistent()
        .get(&DataKey::PositionIndex(position_id))
        .unwrap_or(0);
    let last = count - 1;

    if index != last {
        if let Some(moved) = token_of_owner_by_index(env, owner, last) {
            env.storage()
                .persistent()
                .set(&DataKey::OwnerPositionAt(owner.clone(), index), &moved);
            env.storage()
                .persistent()
                .set(&DataKey::PositionIndex(moved), &index);
        }
    }

    env.storage()
        .persistent()
        .remove(&DataKey::OwnerPositionAt(owner.clone(), last));
    env.storage()
        .persistent()
        .remove(&DataKey::PositionIndex(position_id));

    let count_key = DataKey::OwnerPositionCount(owner.clone());
    if count > 1 {
        env.storage().persistent().set(&count_key, &(count - 1));
    } else {
        env.storage().persistent().remove(&count_key);
    }
}
