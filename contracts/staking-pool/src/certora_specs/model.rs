// ============================================================================
// GHOST STATE AND MODEL INITIALIZATION
// ============================================================================

use staking_types::LedgerState;
use soroban_sdk::U256;

/// Ghost: net shares added by the rule so far
static mut GHOST_SHARES_DELTA: i128 = 0;

/// Skolem variable for an arbitrary position
static mut SKOLEM_POSITION_ID: u32 = 0;

pub fn shares_delta() -> i128 {
    unsafe { GHOST_SHARES_DELTA }
}

pub fn add_shares_delta(delta: i128) {
    unsafe { GHOST_SHARES_DELTA += delta }
}

pub fn skolem_position_id() -> u32 {
    unsafe { SKOLEM_POSITION_ID }
}

/// Initialize ghost state with nondeterministic values
pub fn init() {
    use cvlr::nondet::nondet;

    unsafe {
        SKOLEM_POSITION_ID = nondet();
        GHOST_SHARES_DELTA = 0;
    }
}

// ============================================================================
// STATE SNAPSHOT HELPERS
// ============================================================================

/// Ledger fields compared before and after an operation
#[derive(Clone)]
pub struct LedgerSnapshot {
    pub total_shares: u128,
    pub custody_native: u128,
    pub custody_token: u128,
    pub accumulator_native: U256,
    pub accumulator_token: U256,
    pub circuit_breaker_open: bool,
}

impl LedgerSnapshot {
    pub fn capture(state: &LedgerState) -> Self {
        Self {
            total_shares: state.total_shares,
            custody_native: state.custody_native,
            custody_token: state.custody_token,
            accumulator_native: state.native.accumulator.clone(),
            accumulator_token: state.token.accumulator.clone(),
            circuit_breaker_open: state.circuit_breaker_open,
        }
    }
}
