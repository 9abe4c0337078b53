use soroban_sdk::{contracttype, Vec};

use crate::lockup::{LockState, Lockup};
use crate::multiplier::{self, MultiplierTier};

/// Amount earmarked for exit and the instant the cooldown (re)started.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CooldownTrack {
    pub amount: i128,
    pub start: u64,
}

/// Which exit track, if any, a position is on. The two tracks are mutually
/// exclusive by construction.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExitIntent {
    Idle,
    /// Post-expiry, penalty-free exit.
    Normal(CooldownTrack),
    /// Pre-expiry exit that pays the early-exit penalty.
    Early(CooldownTrack),
}

/// Per-account ledger record.
///
/// `amount` covers everything the account still holds, including whatever
/// is earmarked on an exit track. A closed position (`amount == 0`) is not
/// stored; reads return [`StakePosition::empty`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakePosition {
    pub amount: i128,
    pub weighted_start_time: u64,
    pub effective_lockup_duration: u64,
    pub effective_multiplier: u32,
    pub exit: ExitIntent,
    pub last_update_time: u64,
}

/// Read-side view returned by `get_summary`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeSummary {
    pub total_staked: i128,
    pub total_unlocked: i128,
    pub total_locked: i128,
    pub cooldown_amount: i128,
    pub early_cooldown_amount: i128,
    pub multiplier: u32,
    pub effective_lockup_duration: u64,
    pub time_until_unlock: u64,
}

impl StakePosition {
    pub fn empty() -> Self {
        Self {
            amount: 0,
            weighted_start_time: 0,
            effective_lockup_duration: 0,
            effective_multiplier: 0,
            exit: ExitIntent::Idle,
            last_update_time: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.amount > 0
    }

    pub fn lockup(&self) -> Lockup {
        Lockup::new(
            self.amount,
            self.weighted_start_time,
            self.effective_lockup_duration,
        )
    }

    /// Replaces the lockup triple and recomputes the multiplier.
    pub fn apply_lockup(&mut self, lockup: Lockup, tiers: &Vec<MultiplierTier>, now: u64) {
        self.amount = lockup.amount;
        self.weighted_start_time = lockup.start;
        self.effective_lockup_duration = lockup.duration;
        self.effective_multiplier = multiplier::multiplier(tiers, lockup.duration);
        debug_assert!(
            self.effective_multiplier >= multiplier::min_multiplier(tiers)
                && self.effective_multiplier <= multiplier::max_multiplier(tiers)
        );
        self.last_update_time = now;
    }

    pub fn lock_state(&self, now: u64) -> LockState {
        LockState::of(self.weighted_start_time, self.effective_lockup_duration, now)
    }

    pub fn is_locked(&self, now: u64) -> bool {
        self.is_active() && !self.lock_state(now).is_expired()
    }

    pub fn time_until_unlock(&self, now: u64) -> u64 {
        if !self.is_active() {
            return 0;
        }
        self.lock_state(now).remaining()
    }

    pub fn cooldown_amount(&self) -> i128 {
        match &self.exit {
            ExitIntent::Normal(track) => track.amount,
            _ => 0,
        }
    }

    pub fn cooldown_start(&self) -> u64 {
        match &self.exit {
            ExitIntent::Normal(track) => track.start,
            _ => 0,
        }
    }

    pub fn early_cooldown_amount(&self) -> i128 {
        match &self.exit {
            ExitIntent::Early(track) => track.amount,
            _ => 0,
        }
    }

    pub fn early_cooldown_start(&self) -> u64 {
        match &self.exit {
            ExitIntent::Early(track) => track.start,
            _ => 0,
        }
    }

    pub fn has_exit_in_progress(&self) -> bool {
        !matches!(self.exit, ExitIntent::Idle)
    }

    pub fn summary(&self, now: u64) -> StakeSummary {
        let total_unlocked = if self.is_active() && !self.is_locked(now) {
            self.amount
        } else {
            0
        };
        StakeSummary {
            total_staked: self.amount,
            total_unlocked,
            total_locked: self.amount - total_unlocked,
            cooldown_amount: self.cooldown_amount(),
            early_cooldown_amount: self.early_cooldown_amount(),
            multiplier: self.effective_multiplier,
            effective_lockup_duration: self.effective_lockup_duration,
            time_until_unlock: self.time_until_unlock(now),
        }
    }
}
