use soroban_sdk::{contracttype, Address, Env};

use crate::{Accumulator, Asset};

/// Which flavour of staking ledger this deployment is.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StakingVariant {
    /// Anyone may open and close their own positions
    Public,
    /// Only the given pool contract may open and close positions
    Validator(Address),
}

/// Deployment configuration, written once by `initialize`.
#[contracttype]
#[derive(Clone, Debug)]
pub struct LedgerConfig {
    /// Holder of the privileged role (skim, circuit breaker, governance lock)
    pub admin: Address,
    /// Token contract for asset 1
    pub native_asset: Address,
    /// Token contract for asset 2, staked as principal and paid as reward
    pub token_asset: Address,
    pub variant: StakingVariant,
}

impl LedgerConfig {
    pub fn asset_address(&self, asset: Asset) -> &Address {
        match asset {
            Asset::Native => &self.native_asset,
            Asset::Token => &self.token_asset,
        }
    }
}

/// Global ledger state. Exactly one instance per contract.
#[contracttype]
#[derive(Clone, Debug)]
pub struct LedgerState {
    /// Sum of `shares` over all open positions
    pub total_shares: u128,
    /// Native units the ledger accounts for (owed profit plus undistributed slush)
    pub custody_native: u128,
    /// Token units the ledger accounts for (principal, owed profit, undistributed slush)
    pub custody_token: u128,
    pub native: Accumulator,
    pub token: Accumulator,
    pub circuit_breaker_open: bool,
    /// Next position handle to hand out
    pub next_position_id: u32,
}

impl LedgerState {
    pub fn new(env: &Env) -> Self {
        Self {
            total_shares: 0,
            custody_native: 0,
            custody_token: 0,
            native: Accumulator::new(env),
            token: Accumulator::new(env),
            circuit_breaker_open: false,
            next_position_id: 1,
        }
    }

    pub fn accumulator(&self, asset: Asset) -> &Accumulator {
        match asset {
            Asset::Native => &self.native,
            Asset::Token => &self.token,
        }
    }

    pub fn accumulator_mut(&mut self, asset: Asset) -> &mut Accumulator {
        match asset {
            Asset::Native => &mut self.native,
            Asset::Token => &mut self.token,
        }
    }

    pub fn custody(&self, asset: Asset) -> u128 {
        match asset {
            Asset::Native => self.custody_native,
            Asset::Token => self.custody_token,
        }
    }

    pub fn custody_mut(&mut self, asset: Asset) -> &mut u128 {
        match asset {
            Asset::Native => &mut self.custody_native,
            Asset::Token => &mut self.custody_token,
        }
    }
}
