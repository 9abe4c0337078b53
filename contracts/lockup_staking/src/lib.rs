#![no_std]

pub mod circuit_breaker;
pub mod config;
pub mod events;
pub mod exit;
pub mod lockup;
pub mod multiplier;
pub mod penalty;
pub mod position;
pub mod reentrancy;
pub mod storage;
pub mod vault;

use common::admin_tiers::{self, AdminTier};
use soroban_sdk::{contract, contractimpl, log, Address, Env, Vec};

pub use config::{default_tiers, StakingConfig, DAY};
pub use multiplier::MultiplierTier;
pub use position::{CooldownTrack, ExitIntent, StakePosition, StakeSummary};

use exit::ExitRules;
use lockup::Lockup;

// ── Contract errors ──────────────────────────────────────────────────────────

/// # Code ranges
/// | Range   | Purpose                    |
/// |---------|----------------------------|
/// | 1 – 9   | Lifecycle / configuration  |
/// | 10 – 19 | Authorization              |
/// | 20 – 29 | Input validation           |
/// | 30 – 49 | Position / exit state      |
/// | 50 – 59 | Circuit breaker / runtime  |
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidConfig = 3,

    Unauthorized = 10,

    InvalidAmount = 20,
    InvalidDuration = 21,
    BelowMinimumStake = 22,
    AboveMaximumStake = 23,
    BelowMinimumUnstake = 24,
    LockupTooLong = 25,

    NoPosition = 30,
    PositionExists = 31,
    StillLocked = 32,
    AlreadyUnlocked = 33,
    NormalCooldownActive = 34,
    EarlyCooldownActive = 35,
    ExitInProgress = 36,
    NoCooldown = 37,
    CooldownNotElapsed = 38,
    InsufficientBalance = 39,

    Paused = 50,
    Reentrancy = 51,
    ArithmeticOverflow = 52,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct LockupStakingContract;

#[contractimpl]
impl LockupStakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract. `admin` becomes the first SuperAdmin; the
    /// configuration cannot be changed afterwards.
    pub fn initialize(
        env: Env,
        admin: Address,
        config: StakingConfig,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();
        config.validate()?;

        storage::mark_initialized(&env, &config);
        admin_tiers::bootstrap(&env, &admin);

        events::publish_initialized(
            &env,
            admin,
            config.stake_token,
            config.treasury,
            config.enforcer,
            config.cooldown_delay,
        );
        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Open a position of `amount` locked for `duration` seconds.
    ///
    /// Accounts that already hold a position grow it with the `increase_*`
    /// entry points instead.
    pub fn deposit(
        env: Env,
        staker: Address,
        amount: i128,
        duration: u64,
    ) -> Result<StakePosition, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        circuit_breaker::require_not_paused(&env)?;

        reentrancy::guarded(&env, || {
            let config = storage::config(&env)?;
            if amount <= 0 {
                return Err(ContractError::InvalidAmount);
            }
            Self::check_amount_bounds(&config, amount)?;
            if amount < config.min_stake {
                return Err(ContractError::BelowMinimumStake);
            }
            Self::check_duration_bounds(&config, duration)?;

            let mut position = storage::load_position(&env, &staker);
            if position.is_active() {
                return Err(ContractError::PositionExists);
            }

            let now = env.ledger().timestamp();
            position.apply_lockup(Lockup::new(amount, now, duration), &config.tiers, now);
            storage::save_position(&env, &staker, &position);
            let total = storage::adjust_global_total(&env, amount)?;

            vault::transfer_in(&env, &config.stake_token, &staker, amount);

            events::publish_deposited(&env, staker.clone(), amount, &position, total);
            Ok(position)
        })
    }

    /// Add `delta` to an existing position, keeping its committed duration.
    /// An expired position is re-locked for that duration from now.
    pub fn increase_amount(
        env: Env,
        staker: Address,
        delta: i128,
    ) -> Result<StakePosition, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        circuit_breaker::require_not_paused(&env)?;

        reentrancy::guarded(&env, || {
            let config = storage::config(&env)?;
            let now = env.ledger().timestamp();
            let mut position = Self::load_growable(&env, &staker)?;

            let next = position.lockup().add_amount(delta, now)?;
            Self::check_amount_bounds(&config, next.amount)?;

            position.apply_lockup(next, &config.tiers, now);
            storage::save_position(&env, &staker, &position);
            let total = storage::adjust_global_total(&env, delta)?;

            vault::transfer_in(&env, &config.stake_token, &staker, delta);

            events::publish_amount_increased(&env, staker.clone(), delta, &position, total);
            Ok(position)
        })
    }

    /// Extend the lock by `extra` seconds on top of whatever is left of it.
    /// An expired position is locked for exactly `extra` from now.
    pub fn increase_lockup(
        env: Env,
        staker: Address,
        extra: u64,
    ) -> Result<StakePosition, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        circuit_breaker::require_not_paused(&env)?;

        reentrancy::guarded(&env, || {
            let config = storage::config(&env)?;
            let now = env.ledger().timestamp();
            let mut position = Self::load_growable(&env, &staker)?;

            let next = position.lockup().extend(extra, now)?;
            Self::check_duration_bounds(&config, next.duration)?;

            position.apply_lockup(next, &config.tiers, now);
            storage::save_position(&env, &staker, &position);

            events::publish_lockup_increased(&env, staker.clone(), extra, &position);
            Ok(position)
        })
    }

    /// `increase_lockup(extra)` followed by `increase_amount(delta)` in one
    /// atomic step.
    pub fn increase_stake(
        env: Env,
        staker: Address,
        delta: i128,
        extra: u64,
    ) -> Result<StakePosition, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        circuit_breaker::require_not_paused(&env)?;

        reentrancy::guarded(&env, || {
            let config = storage::config(&env)?;
            let now = env.ledger().timestamp();
            let mut position = Self::load_growable(&env, &staker)?;

            let next = position
                .lockup()
                .extend(extra, now)?
                .add_amount(delta, now)?;
            Self::check_amount_bounds(&config, next.amount)?;
            Self::check_duration_bounds(&config, next.duration)?;

            position.apply_lockup(next, &config.tiers, now);
            storage::save_position(&env, &staker, &position);
            let total = storage::adjust_global_total(&env, delta)?;

            vault::transfer_in(&env, &config.stake_token, &staker, delta);

            events::publish_stake_increased(&env, staker.clone(), delta, &position, total);
            Ok(position)
        })
    }

    // ── Normal exit ─────────────────────────────────────────────────────────

    /// Queue `amount` for penalty-free withdrawal. The lock must have
    /// expired. Restarts the cooldown for everything queued so far.
    ///
    /// Returns the instant from which `unstake` succeeds.
    pub fn initiate_unstake(env: Env, staker: Address, amount: i128) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        circuit_breaker::require_not_paused(&env)?;

        reentrancy::guarded(&env, || {
            let config = storage::config(&env)?;
            let now = env.ledger().timestamp();
            let mut position = storage::load_position(&env, &staker);

            let track = exit::initiate_normal(&mut position, amount, now, &Self::rules(&config))?;
            storage::save_position(&env, &staker, &position);

            let claimable_at = track.start.saturating_add(config.cooldown_delay);
            events::publish_unstake_initiated(
                &env,
                staker.clone(),
                amount,
                track.amount,
                claimable_at,
            );
            Ok(claimable_at)
        })
    }

    /// Withdraw `amount` from an elapsed normal cooldown, in full.
    pub fn unstake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        circuit_breaker::require_not_paused(&env)?;

        reentrancy::guarded(&env, || {
            let config = storage::config(&env)?;
            let now = env.ledger().timestamp();
            let mut position = storage::load_position(&env, &staker);

            exit::complete_normal(&mut position, amount, now, &Self::rules(&config))?;
            storage::save_position(&env, &staker, &position);
            let total = storage::adjust_global_total(&env, -amount)?;

            vault::transfer_out(&env, &config.stake_token, &staker, amount);

            events::publish_unstaked(&env, staker.clone(), amount, total);
            Ok(())
        })
    }

    // ── Early exit ──────────────────────────────────────────────────────────

    /// Queue `amount` for penalized withdrawal while still locked.
    ///
    /// Returns the instant from which `early_unstake` succeeds.
    pub fn initiate_early_unstake(
        env: Env,
        staker: Address,
        amount: i128,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        circuit_breaker::require_not_paused(&env)?;

        reentrancy::guarded(&env, || {
            let config = storage::config(&env)?;
            let now = env.ledger().timestamp();
            let mut position = storage::load_position(&env, &staker);

            let track = exit::initiate_early(&mut position, amount, now, &Self::rules(&config))?;
            storage::save_position(&env, &staker, &position);

            let claimable_at = track.start.saturating_add(config.cooldown_delay);
            events::publish_early_unstake_initiated(&env, staker.clone(), amount, claimable_at);
            Ok(claimable_at)
        })
    }

    /// Withdraw `amount` from an elapsed early cooldown. The penalty share
    /// goes to the treasury; returns what the staker received.
    pub fn early_unstake(env: Env, staker: Address, amount: i128) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        circuit_breaker::require_not_paused(&env)?;

        reentrancy::guarded(&env, || {
            let config = storage::config(&env)?;
            let now = env.ledger().timestamp();
            let mut position = storage::load_position(&env, &staker);

            let split = exit::complete_early(&mut position, amount, now, &Self::rules(&config))?;
            storage::save_position(&env, &staker, &position);
            let total = storage::adjust_global_total(&env, -amount)?;

            vault::transfer_out(&env, &config.stake_token, &config.treasury, split.penalty);
            vault::transfer_out(&env, &config.stake_token, &staker, split.payout);

            events::publish_early_unstaked(
                &env,
                staker.clone(),
                amount,
                split.payout,
                split.penalty,
                total,
            );
            Ok(split.payout)
        })
    }

    /// Abandon whichever exit track is in flight. Returns the amount that
    /// was queued; nothing leaves the position.
    pub fn cancel_unstake(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        circuit_breaker::require_not_paused(&env)?;

        reentrancy::guarded(&env, || {
            let now = env.ledger().timestamp();
            let mut position = storage::load_position(&env, &staker);

            let released = exit::cancel(&mut position, now)?;
            storage::save_position(&env, &staker, &position);

            events::publish_exit_cancelled(&env, staker.clone(), released);
            Ok(released)
        })
    }

    // ── Enforcement ─────────────────────────────────────────────────────────

    /// Seize up to `amount` from `account` on behalf of the enforcement
    /// collaborator. Ignores exit tracks and the circuit breaker.
    ///
    /// Returns the amount actually seized, capped at the position amount.
    pub fn process_penalty(
        env: Env,
        enforcer: Address,
        account: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        enforcer.require_auth();

        reentrancy::guarded(&env, || {
            let config = storage::config(&env)?;
            if enforcer != config.enforcer {
                return Err(ContractError::Unauthorized);
            }

            let now = env.ledger().timestamp();
            let mut position = storage::load_position(&env, &account);

            let applied = penalty::seize(&mut position, amount, now)?;
            storage::save_position(&env, &account, &position);
            let total = storage::adjust_global_total(&env, -applied)?;

            vault::transfer_out(&env, &config.stake_token, &config.treasury, applied);

            if applied < amount {
                log!(&env, "penalty capped at position amount", account, amount, applied);
            }
            events::publish_penalty_processed(
                &env,
                account.clone(),
                amount,
                applied,
                config.treasury.clone(),
                total,
            );
            Ok(applied)
        })
    }

    // ── View functions ──────────────────────────────────────────────────────

    /// The account's position; the all-zero record when none is open.
    pub fn get_position(env: Env, staker: Address) -> StakePosition {
        storage::load_position(&env, &staker)
    }

    pub fn get_summary(env: Env, staker: Address) -> StakeSummary {
        storage::load_position(&env, &staker).summary(env.ledger().timestamp())
    }

    /// Everything the account holds, including queued exits.
    pub fn get_total_staked(env: Env, staker: Address) -> i128 {
        storage::load_position(&env, &staker).amount
    }

    pub fn has_active_position(env: Env, staker: Address) -> bool {
        storage::has_position(&env, &staker)
    }

    /// Sum of every open position.
    pub fn global_total(env: Env) -> i128 {
        storage::global_total(&env)
    }

    /// Multiplier a fresh commitment of `duration` seconds would receive.
    pub fn get_multiplier(env: Env, duration: u64) -> Result<u32, ContractError> {
        let config = storage::config(&env)?;
        Ok(multiplier::multiplier(&config.tiers, duration))
    }

    pub fn get_config(env: Env) -> Result<StakingConfig, ContractError> {
        storage::config(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    /// The address that initialized the contract. Fixed at `initialize`:
    /// it does not follow later promotions or demotions, so use
    /// `get_admin_tier` to check what the address may currently do.
    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        admin_tiers::bootstrap_admin(&env).ok_or(ContractError::NotInitialized)
    }

    // ── Circuit breaker ─────────────────────────────────────────────────────

    /// Suspend every user-initiated mutation. Requires `OperatorAdmin`.
    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        circuit_breaker::pause(&env, &caller)
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        circuit_breaker::unpause(&env, &caller)
    }

    pub fn is_paused(env: Env) -> bool {
        circuit_breaker::is_paused(&env)
    }

    // ── Admin tier management ────────────────────────────────────────────────

    /// Assign `tier` to `target`. Only a `SuperAdmin` may call this.
    pub fn promote_admin(
        env: Env,
        caller: Address,
        target: Address,
        tier: AdminTier,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !admin_tiers::promote(&env, &caller, &target, tier) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Remove any tier from `target`. Only a `SuperAdmin` may call this,
    /// and never on itself.
    pub fn demote_admin(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !admin_tiers::demote(&env, &caller, &target) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    pub fn get_admin_tier(env: Env, admin: Address) -> Option<AdminTier> {
        admin_tiers::tier_of(&env, &admin)
    }

    pub fn list_admins(env: Env) -> Vec<Address> {
        admin_tiers::list_admins(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !storage::is_initialized(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Loads a position that may be grown: it must exist and have no exit
    /// in flight.
    fn load_growable(env: &Env, staker: &Address) -> Result<StakePosition, ContractError> {
        let position = storage::load_position(env, staker);
        if !position.is_active() {
            return Err(ContractError::NoPosition);
        }
        if position.has_exit_in_progress() {
            return Err(ContractError::ExitInProgress);
        }
        Ok(position)
    }

    fn check_amount_bounds(config: &StakingConfig, total: i128) -> Result<(), ContractError> {
        if total > config.max_stake {
            return Err(ContractError::AboveMaximumStake);
        }
        Ok(())
    }

    fn check_duration_bounds(config: &StakingConfig, duration: u64) -> Result<(), ContractError> {
        if duration == 0 || duration < config.min_lockup {
            return Err(ContractError::InvalidDuration);
        }
        if duration > config.max_lockup {
            return Err(ContractError::LockupTooLong);
        }
        Ok(())
    }

    fn rules(config: &StakingConfig) -> ExitRules {
        ExitRules {
            cooldown_delay: config.cooldown_delay,
            early_exit_penalty_bps: config.early_exit_penalty_bps,
            min_unstake: config.min_unstake,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────




#[cfg(test)]
mod test_penalty;

#[cfg(test)]
mod test_pause;
