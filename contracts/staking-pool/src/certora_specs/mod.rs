// ============================================================================
// CERTORA SUNBEAM FORMAL VERIFICATION SPECIFICATIONS
// ============================================================================
//
// Rules for the staking accumulator ledger.
//
// - model.rs              : Ghost state, Skolem variables, state snapshots
// - accumulator_specs.rs  : Deposit, fold and payout arithmetic
// - lifecycle_specs.rs    : Mint, collect, circuit breaker and locks
//
// USAGE:
// - Certora build: cargo build --features certora -p staking-pool
// - Verification: certoraSorobanProver staking_pool.conf
//
// ============================================================================

pub mod model;

pub mod accumulator_specs;
pub mod lifecycle_specs;
