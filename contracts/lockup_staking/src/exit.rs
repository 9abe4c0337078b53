//! Dual-track exit state machine.
//!
//! ```text
//!   Locked ── initiate_early ──▶ Early ── complete_early (after delay) ──▶ paid minus penalty
//!   Unlocked ─ initiate_normal ─▶ Normal ─ complete_normal (after delay) ─▶ paid in full
//! ```
//!
//! Every `initiate_normal` restarts the cooldown for the whole accumulated
//! amount, so a stale window opened with a trivial amount can never carry a
//! later, larger amount past its own delay. Each initiator checks the
//! opposing track explicitly before touching state.
//!
//! These functions only move the position; the caller persists it, adjusts
//! the global total and performs the transfers.

use crate::multiplier::BPS_DENOMINATOR;
use crate::position::{CooldownTrack, ExitIntent, StakePosition};
use crate::ContractError;

/// Split of an early withdrawal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EarlyExit {
    pub payout: i128,
    pub penalty: i128,
}

/// Exit parameters taken from the contract configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExitRules {
    pub cooldown_delay: u64,
    pub early_exit_penalty_bps: u32,
    pub min_unstake: i128,
}

fn require_position(position: &StakePosition, amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    if !position.is_active() {
        return Err(ContractError::NoPosition);
    }
    Ok(())
}

/// Dust below `min_unstake` is only accepted when it clears everything left.
fn require_granularity(
    amount: i128,
    available: i128,
    rules: &ExitRules,
) -> Result<(), ContractError> {
    if amount > available {
        return Err(ContractError::InsufficientBalance);
    }
    if amount < rules.min_unstake && amount != available {
        return Err(ContractError::BelowMinimumUnstake);
    }
    Ok(())
}

fn require_elapsed(
    track: &CooldownTrack,
    now: u64,
    rules: &ExitRules,
) -> Result<(), ContractError> {
    if now < track.start.saturating_add(rules.cooldown_delay) {
        return Err(ContractError::CooldownNotElapsed);
    }
    Ok(())
}

/// Moves `amount` onto the normal track and restarts its cooldown at `now`.
pub fn initiate_normal(
    position: &mut StakePosition,
    amount: i128,
    now: u64,
    rules: &ExitRules,
) -> Result<CooldownTrack, ContractError> {
    require_position(position, amount)?;
    if position.is_locked(now) {
        return Err(ContractError::StillLocked);
    }

    let queued = match &position.exit {
        ExitIntent::Early(_) => return Err(ContractError::EarlyCooldownActive),
        ExitIntent::Normal(track) => track.amount,
        ExitIntent::Idle => 0,
    };
    require_granularity(amount, position.amount - queued, rules)?;

    let track = CooldownTrack {
        amount: queued + amount,
        start: now,
    };
    position.exit = ExitIntent::Normal(track.clone());
    position.last_update_time = now;
    Ok(track)
}

/// Pays out `amount` from an elapsed normal track. No penalty.
pub fn complete_normal(
    position: &mut StakePosition,
    amount: i128,
    now: u64,
    rules: &ExitRules,
) -> Result<(), ContractError> {
    require_position(position, amount)?;
    let track = match &position.exit {
        ExitIntent::Normal(track) => track.clone(),
        _ => return Err(ContractError::NoCooldown),
    };
    require_elapsed(&track, now, rules)?;
    if amount > track.amount {
        return Err(ContractError::InsufficientBalance);
    }

    let left = track.amount - amount;
    position.exit = if left == 0 {
        ExitIntent::Idle
    } else {
        ExitIntent::Normal(CooldownTrack {
            amount: left,
            start: track.start,
        })
    };
    position.amount -= amount;
    position.last_update_time = now;
    Ok(())
}

/// Opens the early track for `amount`. One early exit in flight at a time.
pub fn initiate_early(
    position: &mut StakePosition,
    amount: i128,
    now: u64,
    rules: &ExitRules,
) -> Result<CooldownTrack, ContractError> {
    require_position(position, amount)?;
    if !position.is_locked(now) {
        return Err(ContractError::AlreadyUnlocked);
    }
    match &position.exit {
        ExitIntent::Normal(_) => return Err(ContractError::NormalCooldownActive),
        ExitIntent::Early(_) => return Err(ContractError::EarlyCooldownActive),
        ExitIntent::Idle => {}
    }
    require_granularity(amount, position.amount, rules)?;

    let track = CooldownTrack { amount, start: now };
    position.exit = ExitIntent::Early(track.clone());
    position.last_update_time = now;
    Ok(track)
}

/// Pays out `amount` from an elapsed early track, minus the penalty.
pub fn complete_early(
    position: &mut StakePosition,
    amount: i128,
    now: u64,
    rules: &ExitRules,
) -> Result<EarlyExit, ContractError> {
    require_position(position, amount)?;
    let track = match &position.exit {
        ExitIntent::Early(track) => track.clone(),
        _ => return Err(ContractError::NoCooldown),
    };
    require_elapsed(&track, now, rules)?;
    if amount > track.amount {
        return Err(ContractError::InsufficientBalance);
    }

    let penalty = early_exit_penalty(amount, rules.early_exit_penalty_bps)?;
    let left = track.amount - amount;
    position.exit = if left == 0 {
        ExitIntent::Idle
    } else {
        ExitIntent::Early(CooldownTrack {
            amount: left,
            start: track.start,
        })
    };
    position.amount -= amount;
    position.last_update_time = now;

    Ok(EarlyExit {
        payout: amount - penalty,
        penalty,
    })
}

/// Drops whichever track is in flight. Returns the amount that was queued.
pub fn cancel(position: &mut StakePosition, now: u64) -> Result<i128, ContractError> {
    if !position.is_active() {
        return Err(ContractError::NoPosition);
    }
    let queued = match &position.exit {
        ExitIntent::Idle => return Err(ContractError::NoCooldown),
        ExitIntent::Normal(track) | ExitIntent::Early(track) => track.amount,
    };
    position.exit = ExitIntent::Idle;
    position.last_update_time = now;
    Ok(queued)
}

/// `floor(amount * bps / 10_000)`.
pub fn early_exit_penalty(amount: i128, bps: u32) -> Result<i128, ContractError> {
    let scaled = amount
        .checked_mul(i128::from(bps))
        .ok_or(ContractError::ArithmeticOverflow)?;
    Ok(scaled / i128::from(BPS_DENOMINATOR))
}
