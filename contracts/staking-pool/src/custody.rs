use soroban_sdk::{token, Address, Env};
use staking_types::{Asset, LedgerConfig, StakingError};

/// Moves assets in and out of the ledger's custody.
///
/// The ledger finalizes its own state before calling `push`, so an
/// implementation is free to call back into the ledger from there.
pub trait Custody {
    /// Units of `asset` currently held by the ledger contract.
    fn balance(&self, env: &Env, asset: Asset) -> u128;

    /// Take `amount` of `asset` from `from` into custody.
    fn pull(&mut self, env: &Env, asset: Asset, from: &Address, amount: u128) -> Result<(), StakingError>;

    /// Send `amount` of `asset` out of custody to `to`.
    fn push(&mut self, env: &Env, asset: Asset, to: &Address, amount: u128) -> Result<(), StakingError>;
}

/// Custody backed by the two configured token contracts.
pub struct TokenCustody {
    config: LedgerConfig,
}

impl TokenCustody {
    pub fn new(config: LedgerConfig) -> Self {
        Self { config }
    }

    fn client<'a>(&self, env: &'a Env, asset: Asset) -> token::Client<'a> {
        token::Client::new(env, self.config.asset_address(asset))
    }
}

fn to_i128(amount: u128) -> Result<i128, StakingError> {
    i128::try_from(amount).map_err(|_| StakingError::AmountOverflow)
}

impl Custody for TokenCustody {
    fn balance(&self, env: &Env, asset: Asset) -> u128 {
        let held = self
            .client(env, asset)
            .balance(&env.current_contract_address());
        u128::try_from(held).unwrap_or(0)
    }

    fn pull(&mut self, env: &Env, asset: Asset, from: &Address, amount: u128) -> Result<(), StakingError> {
        let amount = to_i128(amount)?;
        let client = self.client(env, asset);
        if client.balance(from) < amount {
            return Err(StakingError::InsufficientAssetBalance);
        }

        match client.try_transfer(from, &env.current_contract_address(), &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(StakingError::TransferFailed),
        }
    }

    fn push(&mut self, env: &Env, asset: Asset, to: &Address, amount: u128) -> Result<(), StakingError> {
        if amount == 0 {
            return Ok(());
        }

        let amount = to_i128(amount)?;
        match self
            .client(env, asset)
            .try_transfer(&env.current_contract_address(), to, &amount)
        {
            Ok(Ok(())) => Ok(()),
            _ => Err(StakingError::TransferFailed),
        }
    }
}
