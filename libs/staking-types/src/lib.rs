#![no_std]

mod error;
mod ledger;
mod position;

pub use error::*;
pub use ledger::*;
pub use position::*;

/// Tag every `deposit_*` call must carry.
pub const DEPOSIT_MAGIC: u32 = 42;

/// Fixed-point scale applied to deposits before they enter slush.
pub const SCALE_FACTOR: u128 = 1_000_000_000_000_000_000;

/// Width of the accumulator ring. Accumulators live in Z/2^168.
pub const ACCUMULATOR_BITS: u32 = 168;

/// Slush must stay strictly below 2^SLUSH_LIMIT_BITS.
pub const SLUSH_LIMIT_BITS: u32 = 167;

/// Longest lock (in ledgers) accepted by `mint_to`.
pub const MAX_MINT_LOCK: u32 = 1_051_200;

/// Longest lock (in ledgers) accepted by the locking operations.
pub const MAX_GOVERNANCE_LOCK: u32 = 172_800;

/// Upper bound on outstanding shares.
/// A 168-bit accumulator difference times 88-bit shares always fits in 256 bits.
pub const MAX_TOTAL_SHARES: u128 = (1 << 88) - 1;
