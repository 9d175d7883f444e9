mod admin;

use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env};
use staking_math::slush_in_units;
use staking_types::{Asset, StakingVariant, DEPOSIT_MAGIC};

use crate::{invariants, StakingPool, StakingPoolClient};

pub const START_LEDGER: u32 = 100;
pub const SCALE: u128 = 1_000_000_000_000_000_000;

pub struct Setup {
    pub env: Env,
    pub admin: Address,
    /// Only address allowed to mint in the validator flavour
    pub validator_pool: Address,
    pub pool: StakingPoolClient<'static>,
    pub native: TokenClient<'static>,
    pub native_admin: StellarAssetClient<'static>,
    pub token: TokenClient<'static>,
    pub token_admin: StellarAssetClient<'static>,
}

pub fn setup() -> Setup {
    deploy(false)
}

pub fn setup_validator() -> Setup {
    deploy(true)
}

fn deploy(validator: bool) -> Setup {
    let env = Env::default();
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();
    env.ledger().set_sequence_number(START_LEDGER);

    let admin = Address::generate(&env);
    let validator_pool = Address::generate(&env);
    let native_sac = env.register_stellar_asset_contract_v2(admin.clone());
    let token_sac = env.register_stellar_asset_contract_v2(admin.clone());

    let pool_id = env.register(StakingPool, ());
    let pool = StakingPoolClient::new(&env, &pool_id);
    let variant = if validator {
        StakingVariant::Validator(validator_pool.clone())
    } else {
        StakingVariant::Public
    };
    pool.initialize(&admin, &native_sac.address(), &token_sac.address(), &variant);

    Setup {
        native: TokenClient::new(&env, &native_sac.address()),
        native_admin: StellarAssetClient::new(&env, &native_sac.address()),
        token: TokenClient::new(&env, &token_sac.address()),
        token_admin: StellarAssetClient::new(&env, &token_sac.address()),
        env,
        admin,
        validator_pool,
        pool,
    }
}

impl Setup {
    pub fn user(&self) -> Address {
        Address::generate(&self.env)
    }

    pub fn fund(&self, asset: Asset, who: &Address, amount: u128) {
        let admin = match asset {
            Asset::Native => &self.native_admin,
            Asset::Token => &self.token_admin,
        };
        admin.mint(who, &(amount as i128));
    }

    pub fn balance(&self, asset: Asset, who: &Address) -> u128 {
        let client = match asset {
            Asset::Native => &self.native,
            Asset::Token => &self.token,
        };
        client.balance(who) as u128
    }

    /// Fresh address holding a position of `shares`.
    pub fn staker(&self, shares: u128) -> (Address, u32) {
        let who = self.user();
        self.fund(Asset::Token, &who, shares);
        let id = self.pool.mint(&who, &shares);
        (who, id)
    }

    /// Deposit `amount` of `asset` from a fresh, funded address.
    pub fn deposit(&self, asset: Asset, amount: u128) {
        let from = self.user();
        self.fund(asset, &from, amount);
        match asset {
            Asset::Native => self.pool.deposit_native(&from, &DEPOSIT_MAGIC, &amount),
            Asset::Token => self.pool.deposit_token(&from, &DEPOSIT_MAGIC, &amount),
        }
    }

    pub fn advance(&self, ledgers: u32) {
        let now = self.env.ledger().sequence();
        self.env.ledger().set_sequence_number(now + ledgers);
    }

    pub fn slush(&self, asset: Asset) -> u128 {
        let (_, slush) = self.pool.get_accumulator(&asset);
        slush.to_u128().unwrap()
    }

    pub fn accumulator(&self, asset: Asset) -> u128 {
        let (accumulator, _) = self.pool.get_accumulator(&asset);
        accumulator.to_u128().unwrap()
    }

    /// balance == reserve + ceil(slush) + excess, excess >= 0, for both assets.
    pub fn assert_conservation(&self) {
        for asset in [Asset::Native, Asset::Token] {
            let balance = self.balance(asset, &self.pool.address);
            let reserve = self.pool.get_reserve(&asset);
            let (_, slush) = self.pool.get_accumulator(&asset);
            let slush_units = slush_in_units(&self.env, &slush).unwrap();

            assert!(invariants::conservation_holds(balance, reserve, slush_units));
            assert_eq!(
                self.pool.estimate_excess(&asset),
                balance - reserve - slush_units
            );
        }
    }
}

/// Deterministic pseudo-random sequence for scenario tests.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self, bound: u64) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound
    }
}
