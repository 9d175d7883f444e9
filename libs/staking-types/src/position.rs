use soroban_sdk::{contracttype, Env, U256};

/// A stake record. Identified by the `u32` handle the registry hands out.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    /// Principal in units of the staked asset; also the reward weight
    pub shares: u128,
    /// Burn is allowed once the ledger sequence is strictly past this
    pub free_after: u32,
    /// Collection (and burn) is allowed once the ledger sequence is strictly past this
    pub withdraw_free_after: u32,
    /// Native accumulator value at the last payout
    pub accumulator_native: U256,
    /// Token accumulator value at the last payout
    pub accumulator_token: U256,
}

impl Position {
    /// Fresh position opened at ledger `now`.
    ///
    /// `lock_duration` of zero still holds the position for one ledger.
    pub fn open(
        now: u32,
        shares: u128,
        lock_duration: u32,
        accumulator_native: U256,
        accumulator_token: U256,
    ) -> Self {
        Self {
            shares,
            free_after: now.saturating_add(lock_duration.max(1)),
            withdraw_free_after: now.saturating_add(1),
            accumulator_native,
            accumulator_token,
        }
    }

    pub fn snapshot(&self, asset: Asset) -> &U256 {
        match asset {
            Asset::Native => &self.accumulator_native,
            Asset::Token => &self.accumulator_token,
        }
    }

    pub fn snapshot_mut(&mut self, asset: Asset) -> &mut U256 {
        match asset {
            Asset::Native => &mut self.accumulator_native,
            Asset::Token => &mut self.accumulator_token,
        }
    }

    pub fn can_burn(&self, now: u32) -> bool {
        now > self.free_after && now > self.withdraw_free_after
    }

    pub fn can_collect(&self, now: u32) -> bool {
        now > self.withdraw_free_after
    }
}

/// The two reward streams.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Asset {
    /// Asset 1: native currency
    Native,
    /// Asset 2: the staked token, which also pays rewards
    Token,
}

/// Running per-share total for one asset plus its undistributed remainder.
///
/// Both values are scaled by `SCALE_FACTOR`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Accumulator {
    /// Member of Z/2^168
    pub accumulator: U256,
    /// Scaled value not yet folded into `accumulator`
    pub slush: U256,
}

impl Accumulator {
    pub fn new(env: &Env) -> Self {
        Self {
            accumulator: U256::from_u32(env, 0),
            slush: U256::from_u32(env, 0),
        }
    }
}
