// ============================================================================
// ACCUMULATOR SPECIFICATIONS
// ============================================================================
//
// 1. Fold moves value from slush to the accumulator without creating any
// 2. A payout never exceeds the scaled entitlement plus slush
// 3. Wrapping difference undoes wrapping addition
//
// ============================================================================

use cvlr::asserts::{cvlr_assert, cvlr_assume, cvlr_satisfy};
use cvlr_soroban_derive::rule;
use soroban_sdk::{Env, U256};
use staking_math::{collect, deposit, fold, scale_factor, U168};
use staking_types::{Accumulator, MAX_TOTAL_SHARES};

/// RULE: Sanity - a deposit followed by a fold is reachable
#[rule]
pub fn sanity_deposit_fold(env: Env, amount: u128, total_shares: u128) {
    cvlr_assume!(amount > 0 && amount < (1u128 << 100));
    cvlr_assume!(total_shares > 0 && total_shares <= MAX_TOTAL_SHARES);

    let mut acc = Accumulator::new(&env);
    let _ = deposit(&env, &mut acc, amount);
    fold(&env, &mut acc, total_shares);
    cvlr_satisfy!(true);
}

/// RULE: Fold conserves scaled value
///
/// Property:
///   (acc' - acc) * total_shares + slush' == slush
#[rule]
pub fn fold_conserves_value(env: Env, amount: u128, total_shares: u128) {
    cvlr_assume!(amount > 0 && amount < (1u128 << 100));
    cvlr_assume!(total_shares > 0 && total_shares <= MAX_TOTAL_SHARES);

    let mut acc = Accumulator::new(&env);
    let _ = deposit(&env, &mut acc, amount);
    let before = acc.clone();
    fold(&env, &mut acc, total_shares);

    let credited = U168::new(&env, &acc.accumulator)
        .wrapping_sub(&env, &U168::new(&env, &before.accumulator))
        .into_u256()
        .mul(&U256::from_u128(&env, total_shares));
    cvlr_assert!(credited.add(&acc.slush) == before.slush);
    cvlr_assert!(acc.slush < U256::from_u128(&env, total_shares));
}

/// RULE: A non-sole holder is paid at most its share of the deposit
#[rule]
pub fn payout_bounded_by_share(env: Env, amount: u128, total_shares: u128, shares: u128) {
    cvlr_assume!(amount > 0 && amount < (1u128 << 100));
    cvlr_assume!(total_shares <= MAX_TOTAL_SHARES);
    cvlr_assume!(shares > 0 && shares < total_shares);

    let mut acc = Accumulator::new(&env);
    let mut snapshot = U256::from_u32(&env, 0);
    let _ = deposit(&env, &mut acc, amount);

    if let Ok(payout) = collect(&env, &mut acc, total_shares, shares, &mut snapshot) {
        let entitled = U256::from_u128(&env, amount)
            .mul(&U256::from_u128(&env, shares))
            .div(&U256::from_u128(&env, total_shares));
        cvlr_assert!(U256::from_u128(&env, payout) <= entitled);
        cvlr_assert!(snapshot == acc.accumulator);
    }
}

/// RULE: Wrapping difference is the inverse of wrapping addition
#[rule]
pub fn wrapping_sub_inverts_add(env: Env, start: u128, delta: u128) {
    let base = U168::new(&env, &U256::from_u128(&env, start).mul(&scale_factor(&env)));
    let step = U256::from_u128(&env, delta);
    let moved = base.wrapping_add(&env, &step);
    cvlr_assert!(moved.wrapping_sub(&env, &base).into_u256() == step);
}
