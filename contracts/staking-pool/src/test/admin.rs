use std::vec::Vec;

use staking_types::{Asset, StakingError, MAX_GOVERNANCE_LOCK, MAX_MINT_LOCK, SCALE_FACTOR};

use super::{setup, setup_validator, Lcg, START_LEDGER};

// === Reserve and excess ===

#[test]
fn test_direct_transfer_shows_up_as_excess() {
    let t = setup();
    let (user, id) = t.staker(30);
    t.staker(70);
    t.deposit(Asset::Native, 1_001);
    t.assert_conservation();
    assert_eq!(t.pool.estimate_excess(&Asset::Native), 0);

    let whale = t.user();
    t.fund(Asset::Native, &whale, 77);
    t.fund(Asset::Token, &whale, 5);
    t.native.transfer(&whale, &t.pool.address, &77);
    t.token.transfer(&whale, &t.pool.address, &5);

    assert_eq!(t.pool.estimate_excess(&Asset::Native), 77);
    assert_eq!(t.pool.estimate_excess(&Asset::Token), 5);
    t.assert_conservation();

    // excess is never paid out as profit
    t.advance(2);
    assert_eq!(t.pool.collect_native(&user, &id), 300);
    assert_eq!(t.pool.estimate_excess(&Asset::Native), 77);
}

#[test]
fn test_skim_removes_only_excess() {
    let t = setup();
    t.staker(30);
    t.staker(70);
    t.deposit(Asset::Native, 1_001);
    let whale = t.user();
    t.fund(Asset::Native, &whale, 77);
    t.native.transfer(&whale, &t.pool.address, &77);

    let reserve = t.pool.get_reserve(&Asset::Native);
    let accumulator = t.pool.get_accumulator(&Asset::Native);
    let shares = t.pool.get_total_shares();

    let dest = t.user();
    assert_eq!(t.pool.skim_excess(&t.admin, &Asset::Native, &dest), 77);
    assert_eq!(t.balance(Asset::Native, &dest), 77);
    assert_eq!(t.pool.estimate_excess(&Asset::Native), 0);
    assert_eq!(t.pool.get_reserve(&Asset::Native), reserve);
    assert_eq!(t.pool.get_accumulator(&Asset::Native), accumulator);
    assert_eq!(t.pool.get_total_shares(), shares);

    // balance == reserve + ceil(slush / scale) once excess is gone
    let slush = t.slush(Asset::Native);
    let slush_units = (slush + SCALE_FACTOR - 1) / SCALE_FACTOR;
    assert_eq!(t.balance(Asset::Native, &t.pool.address), reserve + slush_units);

    // nothing left to skim
    assert_eq!(t.pool.skim_excess(&t.admin, &Asset::Native, &dest), 0);
    assert_eq!(t.pool.skim_excess(&t.admin, &Asset::Token, &dest), 0);
}

#[test]
fn test_skim_requires_admin() {
    let t = setup();
    let stranger = t.user();
    assert_eq!(
        t.pool.try_skim_excess(&stranger, &Asset::Token, &stranger),
        Err(Ok(StakingError::Unauthorized))
    );
}

#[test]
fn test_reserve_excludes_undistributed_slush() {
    let t = setup();
    t.deposit(Asset::Token, 10);
    // nobody to pay yet: all of it is slush, none of it is owed
    assert_eq!(t.pool.get_reserve(&Asset::Token), 0);
    assert_eq!(t.slush(Asset::Token), 10 * SCALE_FACTOR);
    t.assert_conservation();

    t.staker(4);
    assert_eq!(t.pool.get_reserve(&Asset::Token), 4);
    t.staker(6);
    assert_eq!(t.pool.get_reserve(&Asset::Token), 20);
    t.assert_conservation();
}

// === Locks ===

#[test]
fn test_governance_lock() {
    let t = setup();
    let (user, id) = t.staker(10);
    let stranger = t.user();

    assert_eq!(t.pool.lock_position(&t.admin, &user, &id, &1_000), START_LEDGER + 1_000);
    assert_eq!(t.pool.get_position(&id).free_after, START_LEDGER + 1_000);
    t.advance(2);
    assert_eq!(t.pool.try_burn(&user, &id), Err(Ok(StakingError::BurnBeforeFreeTime)));

    // a shorter lock never shortens an existing one
    assert_eq!(t.pool.lock_position(&t.admin, &user, &id, &5), START_LEDGER + 1_000);

    assert_eq!(
        t.pool.try_lock_position(&t.admin, &user, &id, &(MAX_GOVERNANCE_LOCK + 1)),
        Err(Ok(StakingError::LockDurationExceedsMaximum))
    );
    assert_eq!(
        t.pool.try_lock_position(&t.admin, &stranger, &id, &5),
        Err(Ok(StakingError::CallerNotPositionOwner))
    );
    assert_eq!(
        t.pool.try_lock_position(&stranger, &user, &id, &5),
        Err(Ok(StakingError::Unauthorized))
    );

    // collection is governed by the other lock
    t.deposit(Asset::Native, 3);
    assert_eq!(t.pool.collect_native(&user, &id), 3);
}

#[test]
fn test_lock_own_position() {
    let t = setup();
    let (user, id) = t.staker(10);
    let stranger = t.user();

    assert_eq!(
        t.pool.lock_own_position(&user, &id, &MAX_GOVERNANCE_LOCK),
        START_LEDGER + MAX_GOVERNANCE_LOCK
    );
    assert_eq!(
        t.pool.try_lock_own_position(&user, &id, &(MAX_GOVERNANCE_LOCK + 1)),
        Err(Ok(StakingError::LockDurationExceedsMaximum))
    );
    assert_eq!(
        t.pool.try_lock_own_position(&stranger, &id, &1),
        Err(Ok(StakingError::CallerNotPositionOwner))
    );
    assert_eq!(
        t.pool.try_lock_own_position(&user, &(id + 1), &1),
        Err(Ok(StakingError::InvalidPositionId))
    );
    assert_eq!(t.pool.get_position(&id).withdraw_free_after, START_LEDGER + 1);
}

#[test]
fn test_lock_withdraw_blocks_collection() {
    let t = setup();
    let (user, id) = t.staker(10);
    t.deposit(Asset::Native, 8);

    assert_eq!(t.pool.lock_withdraw(&user, &id, &50), START_LEDGER + 50);
    assert_eq!(t.pool.get_position(&id).free_after, START_LEDGER + 1);

    t.advance(50);
    assert_eq!(
        t.pool.try_collect_native(&user, &id),
        Err(Ok(StakingError::WithdrawBeforeFreeTime))
    );
    assert_eq!(t.pool.estimate_native_collection(&id), 8);

    t.advance(1);
    assert_eq!(t.pool.collect_native(&user, &id), 8);
}

// === Ownership ===

#[test]
fn test_transfer_moves_position_and_profit() {
    let t = setup();
    let (alice, id) = t.staker(10);
    t.staker(10);
    let bob = t.user();
    t.deposit(Asset::Native, 20);
    t.advance(2);

    t.pool.transfer(&alice, &bob, &id);
    assert_eq!(t.pool.owner_of(&id), bob);
    assert_eq!(t.pool.balance_of(&alice), 0);
    assert_eq!(t.pool.balance_of(&bob), 1);
    assert_eq!(t.pool.token_of_owner_by_index(&bob, &0), Some(id));
    assert_eq!(t.pool.token_of_owner_by_index(&alice, &0), None);

    assert_eq!(
        t.pool.try_collect_native(&alice, &id),
        Err(Ok(StakingError::CallerNotPositionOwner))
    );
    assert_eq!(
        t.pool.try_transfer(&alice, &bob, &id),
        Err(Ok(StakingError::CallerNotPositionOwner))
    );
    assert_eq!(t.pool.collect_native(&bob, &id), 10);
    assert_eq!(t.pool.burn(&bob, &id), (0, 10));
}

#[test]
fn test_owner_index_survives_removal() {
    let t = setup();
    let owner = t.user();
    t.fund(Asset::Token, &owner, 6);
    let ids = [
        t.pool.mint(&owner, &1),
        t.pool.mint(&owner, &2),
        t.pool.mint(&owner, &3),
    ];
    t.advance(2);

    t.pool.burn(&owner, &ids[0]);
    assert_eq!(t.pool.balance_of(&owner), 2);
    let mut held = [
        t.pool.token_of_owner_by_index(&owner, &0).unwrap(),
        t.pool.token_of_owner_by_index(&owner, &1).unwrap(),
    ];
    held.sort();
    assert_eq!(held, [ids[1], ids[2]]);
    assert_eq!(t.pool.token_of_owner_by_index(&owner, &2), None);
}

#[test]
fn test_shares_stay_consistent_across_many_holders() {
    let t = setup();
    let mut rng = Lcg::new(42);
    let mut open = Vec::new();
    for _ in 0..60 {
        let shares = rng.next(5_000) as u128 + 1;
        let (owner, id) = t.staker(shares);
        open.push((owner, id, shares));
    }
    t.deposit(Asset::Native, 12_345);
    t.advance(2);

    let mut index = 0;
    open.retain(|(owner, id, _)| {
        index += 1;
        if index % 3 == 0 {
            t.pool.burn(owner, id);
            false
        } else {
            true
        }
    });
    for _ in 0..10 {
        let shares = rng.next(5_000) as u128 + 1;
        let (owner, id) = t.staker(shares);
        open.push((owner, id, shares));
    }

    let mut sum = 0u128;
    for (owner, id, shares) in open.iter() {
        let position = t.pool.get_position(id);
        assert_eq!(position.shares, *shares);
        assert_eq!(t.pool.owner_of(id), *owner);
        assert_eq!(t.pool.balance_of(owner), 1);
        sum += position.shares;
    }
    assert_eq!(sum, t.pool.get_total_shares());
    assert_eq!(t.pool.get_reserve(&Asset::Token), sum);
    t.assert_conservation();
}

// === Validator variant ===

#[test]
fn test_validator_variant_restricts_minting() {
    let t = setup_validator();
    let outsider = t.user();
    t.fund(Asset::Token, &outsider, 10);
    t.fund(Asset::Token, &t.validator_pool, 10);

    assert_eq!(t.pool.try_mint(&outsider, &10), Err(Ok(StakingError::Unauthorized)));
    assert_eq!(
        t.pool.try_mint_to(&outsider, &outsider, &10, &1),
        Err(Ok(StakingError::Unauthorized))
    );

    let id = t.pool.mint(&t.validator_pool, &10);
    assert_eq!(t.pool.owner_of(&id), t.validator_pool);

    // profit can be collected by whoever holds the position
    t.deposit(Asset::Token, 4);
    t.advance(2);
    t.pool.transfer(&t.validator_pool, &outsider, &id);
    assert_eq!(t.pool.collect_token(&outsider, &id), 4);
    assert_eq!(t.pool.try_burn(&outsider, &id), Err(Ok(StakingError::Unauthorized)));

    t.pool.transfer(&outsider, &t.validator_pool, &id);
    assert_eq!(t.pool.burn(&t.validator_pool, &id), (0, 10));
}

// === Getters ===

#[test]
fn test_constant_getters() {
    let t = setup();
    assert_eq!(t.pool.get_accumulator_scale_factor(), 1_000_000_000_000_000_000);
    assert_eq!(t.pool.get_max_mint_lock(), MAX_MINT_LOCK);
    assert_eq!(t.pool.get_max_mint_lock(), 1_051_200);
    assert_eq!(t.pool.get_max_governance_lock(), 172_800);
    assert_eq!(t.pool.get_deposit_magic(), 42);
    assert_eq!(t.pool.get_config().admin, t.admin);
}
