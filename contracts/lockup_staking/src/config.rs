use soroban_sdk::{contracttype, vec, Address, Env, Vec};

use crate::multiplier::{self, MultiplierTier, BPS_DENOMINATOR};
use crate::ContractError;

/// One day in ledger seconds.
pub const DAY: u64 = 86_400;

/// One-time contract configuration, fixed by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    /// SAC address of the custodied asset.
    pub stake_token: Address,
    /// Receives early-exit penalties and enforcement seizures.
    pub treasury: Address,
    /// The only address allowed to call `process_penalty`.
    pub enforcer: Address,
    /// Seconds between initiating an exit and completing it (both tracks).
    pub cooldown_delay: u64,
    /// Share of an early withdrawal diverted to the treasury, in bps.
    pub early_exit_penalty_bps: u32,
    /// Smallest opening deposit.
    pub min_stake: i128,
    /// Largest position total.
    pub max_stake: i128,
    /// Smallest amount a single exit initiation may earmark.
    pub min_unstake: i128,
    /// Shortest effective lockup, in seconds.
    pub min_lockup: u64,
    /// Longest effective lockup, in seconds.
    pub max_lockup: u64,
    pub tiers: Vec<MultiplierTier>,
}

impl StakingConfig {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.early_exit_penalty_bps > BPS_DENOMINATOR {
            return Err(ContractError::InvalidConfig);
        }
        if self.min_stake <= 0 || self.max_stake < self.min_stake {
            return Err(ContractError::InvalidConfig);
        }
        if self.min_unstake <= 0 {
            return Err(ContractError::InvalidConfig);
        }
        if self.min_lockup == 0 || self.max_lockup < self.min_lockup {
            return Err(ContractError::InvalidConfig);
        }
        if self.treasury == self.stake_token {
            return Err(ContractError::InvalidConfig);
        }
        multiplier::validate_tiers(&self.tiers)
    }
}

/// 30/90/180/365 days at 1.05x/1.10x/1.25x/1.50x.
pub fn default_tiers(env: &Env) -> Vec<MultiplierTier> {
    vec![
        env,
        MultiplierTier {
            duration: 30 * DAY,
            multiplier_bps: 10_500,
        },
        MultiplierTier {
            duration: 90 * DAY,
            multiplier_bps: 11_000,
        },
        MultiplierTier {
            duration: 180 * DAY,
            multiplier_bps: 12_500,
        },
        MultiplierTier {
            duration: 365 * DAY,
            multiplier_bps: 15_000,
        },
    ]
}
