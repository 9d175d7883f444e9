// ============================================================================
// INVARIANTS MODULE
// ============================================================================
//
// Predicates over ledger state that must hold after every operation. The
// scenario tests assert them after each step and the certora rules state
// them as properties.
//
// 1. CONSERVATION
//    - Custody covers what is owed plus rounded-up slush
//    - Excess is exactly what arrived outside deposit and mint
//
// 2. POSITIONS
//    - No open position has zero shares or an expired mint lock
//
// 3. ACCUMULATOR
//    - Accumulator stays inside the 2^168 ring
//    - Slush stays below 2^167
//
// ============================================================================

use soroban_sdk::{Env, U256};
use staking_math::{accumulator_modulus, slush_limit};
use staking_types::{Accumulator, Position};

// ============================================================================
// CONSERVATION
// ============================================================================

/// Invariant: the ledger holds at least what it owes.
///
/// Property:
///   balance >= reserve + ceil(slush / SCALE_FACTOR)
pub fn conservation_holds(balance: u128, reserve: u128, slush_units: u128) -> bool {
    match reserve.checked_add(slush_units) {
        Some(owed) => balance >= owed,
        None => false,
    }
}

/// Balance not accounted for by custody. Never negative.
///
/// Property:
///   excess = balance - custody   if balance >= custody
///   excess = 0                   otherwise
pub fn excess(balance: u128, custody: u128) -> u128 {
    balance.saturating_sub(custody)
}

// ============================================================================
// POSITIONS
// ============================================================================

/// Invariant: a stored position always has principal and a lock past its mint.
pub fn position_well_formed(position: &Position, minted_at: u32) -> bool {
    position.shares > 0
        && position.free_after > minted_at
        && position.withdraw_free_after > minted_at
}

// ============================================================================
// ACCUMULATOR
// ============================================================================

/// Invariant: accumulator is reduced and slush is bounded.
///
/// Property:
///   accumulator < 2^168 && slush < 2^167
pub fn accumulator_in_range(env: &Env, acc: &Accumulator) -> bool {
    acc.accumulator < accumulator_modulus(env) && acc.slush < slush_limit(env)
}

/// Invariant: after a fold with outstanding shares, slush is below the share count.
pub fn folded_slush_below_shares(env: &Env, acc: &Accumulator, total_shares: u128) -> bool {
    total_shares == 0 || acc.slush < U256::from_u128(env, total_shares)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;
    use staking_math::{deposit, fold};

    #[test]
    fn test_conservation_holds() {
        assert!(conservation_holds(100, 90, 10));
        assert!(!conservation_holds(100, 91, 10));
        assert!(!conservation_holds(u128::MAX, u128::MAX, 1));
    }

    #[test]
    fn test_excess_never_negative() {
        assert_eq!(excess(100, 60), 40);
        assert_eq!(excess(60, 100), 0);
    }

    #[test]
    fn test_accumulator_in_range_after_fold() {
        let env = Env::default();
        let mut acc = Accumulator::new(&env);
        deposit(&env, &mut acc, 1_000).unwrap();
        fold(&env, &mut acc, 7);
        assert!(accumulator_in_range(&env, &acc));
        assert!(folded_slush_below_shares(&env, &acc, 7));
    }

    #[test]
    fn test_position_well_formed() {
        let env = Env::default();
        let zero = U256::from_u32(&env, 0);
        let position = Position::open(10, 5, 0, zero.clone(), zero);
        assert!(position_well_formed(&position, 10));
        assert!(!position_well_formed(&position, 11));
    }
}
