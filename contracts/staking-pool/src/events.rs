use soroban_sdk::{Address, Env, Symbol};
use staking_types::Asset;

pub fn initialized(env: &Env, admin: &Address, native_asset: &Address, token_asset: &Address) {
    env.events().publish(
        (Symbol::new(env, "initialized"),),
        (admin.clone(), native_asset.clone(), token_asset.clone()),
    );
}

pub fn position_minted(env: &Env, owner: &Address, position_id: u32, shares: u128, free_after: u32) {
    env.events().publish(
        (Symbol::new(env, "position_minted"), owner.clone()),
        (position_id, shares, free_after),
    );
}

pub fn position_burned(
    env: &Env,
    owner: &Address,
    position_id: u32,
    payout_native: u128,
    payout_token: u128,
) {
    env.events().publish(
        (Symbol::new(env, "position_burned"), owner.clone()),
        (position_id, payout_native, payout_token),
    );
}

pub fn profits_collected(
    env: &Env,
    owner: &Address,
    position_id: u32,
    payout_native: u128,
    payout_token: u128,
) {
    env.events().publish(
        (Symbol::new(env, "profits_collected"), owner.clone()),
        (position_id, payout_native, payout_token),
    );
}

pub fn deposit(env: &Env, from: &Address, asset: Asset, amount: u128) {
    env.events().publish(
        (Symbol::new(env, "deposit"), from.clone()),
        (asset, amount),
    );
}

pub fn excess_skimmed(env: &Env, to: &Address, asset: Asset, amount: u128) {
    env.events().publish(
        (Symbol::new(env, "excess_skimmed"), to.clone()),
        (asset, amount),
    );
}

pub fn circuit_breaker(env: &Env, open: bool) {
    env.events()
        .publish((Symbol::new(env, "circuit_breaker"),), (open,));
}

pub fn position_locked(env: &Env, position_id: u32, free_after: u32) {
    env.events().publish(
        (Symbol::new(env, "position_locked"),),
        (position_id, free_after),
    );
}

pub fn withdraw_locked(env: &Env, position_id: u32, withdraw_free_after: u32) {
    env.events().publish(
        (Symbol::new(env, "withdraw_locked"),),
        (position_id, withdraw_free_after),
    );
}

pub fn position_transferred(env: &Env, from: &Address, to: &Address, position_id: u32) {
    env.events().publish(
        (Symbol::new(env, "position_transferred"),),
        (from.clone(), to.clone(), position_id),
    );
}
