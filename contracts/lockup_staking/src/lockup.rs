//! Weighted combination of lockups.
//!
//! A [`Lockup`] is the `(amount, start, duration)` triple behind a position.
//! Every way of growing a position goes through [`LockState::of`] first: an
//! expired lockup is never blended, it is restarted from `now`. Blending an
//! expired lockup would let a large, long top-up drag the weighted unlock
//! instant below both the old and the new commitment.
//!
//! Weighted averages round up. A blended lockup therefore never unlocks
//! before the exact rational average would.

use crate::ContractError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Lockup {
    pub amount: i128,
    pub start: u64,
    pub duration: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LockState {
    /// Still locked, `remaining` seconds to go.
    Active { remaining: u64 },
    /// `now >= start + duration`.
    Expired,
}

impl LockState {
    pub fn of(start: u64, duration: u64, now: u64) -> Self {
        let unlock_at = start.saturating_add(duration);
        if now >= unlock_at {
            LockState::Expired
        } else {
            LockState::Active {
                remaining: unlock_at - now,
            }
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, LockState::Expired)
    }

    pub fn remaining(&self) -> u64 {
        match self {
            LockState::Active { remaining } => *remaining,
            LockState::Expired => 0,
        }
    }
}

impl Lockup {
    pub fn new(amount: i128, start: u64, duration: u64) -> Self {
        Self {
            amount,
            start,
            duration,
        }
    }

    pub fn state(&self, now: u64) -> LockState {
        LockState::of(self.start, self.duration, now)
    }

    pub fn unlock_at(&self) -> u64 {
        self.start.saturating_add(self.duration)
    }

    /// Folds `amount` committed for `duration` at `now` into this lockup.
    ///
    /// Active: start and duration become amount-weighted averages.
    /// Expired: the result restarts at `now` for exactly `duration`.
    pub fn combine(&self, amount: i128, duration: u64, now: u64) -> Result<Lockup, ContractError> {
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let total = self
            .amount
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        match self.state(now) {
            LockState::Expired => Ok(Lockup::new(total, now, duration)),
            LockState::Active { .. } => {
                let start = weighted_average(self.start, self.amount, now, amount)?;
                let duration = weighted_average(self.duration, self.amount, duration, amount)?;
                Ok(Lockup::new(total, start, duration))
            }
        }
    }

    /// Adds `delta` while keeping the committed duration.
    pub fn add_amount(&self, delta: i128, now: u64) -> Result<Lockup, ContractError> {
        self.combine(delta, self.duration, now)
    }

    /// Restarts the lockup at `now` for whatever was left plus `extra`.
    /// An expired lockup has nothing left, so it gets exactly `extra`.
    pub fn extend(&self, extra: u64, now: u64) -> Result<Lockup, ContractError> {
        if extra == 0 {
            return Err(ContractError::InvalidDuration);
        }
        let duration = self
            .state(now)
            .remaining()
            .checked_add(extra)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Ok(Lockup::new(self.amount, now, duration))
    }
}

/// `ceil((a * wa + b * wb) / (wa + wb))` over non-negative inputs.
pub fn weighted_average(a: u64, wa: i128, b: u64, wb: i128) -> Result<u64, ContractError> {
    if wa < 0 || wb < 0 {
        return Err(ContractError::InvalidAmount);
    }
    let weight = wa.checked_add(wb).ok_or(ContractError::ArithmeticOverflow)?;
    if weight == 0 {
        return Err(ContractError::InvalidAmount);
    }

    let lhs = i128::from(a)
        .checked_mul(wa)
        .ok_or(ContractError::ArithmeticOverflow)?;
    let rhs = i128::from(b)
        .checked_mul(wb)
        .ok_or(ContractError::ArithmeticOverflow)?;
    let numerator = lhs
        .checked_add(rhs)
        .ok_or(ContractError::ArithmeticOverflow)?;

    let quotient = numerator / weight;
    let rounded = if numerator % weight == 0 {
        quotient
    } else {
        quotient + 1
    };
    u64::try_from(rounded).map_err(|_| ContractError::ArithmeticOverflow)
}
