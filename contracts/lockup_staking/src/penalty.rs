//! Enforcement seizure.
//!
//! Seizure ignores the exit tracks: an account cannot shelter value by
//! starting an exit. What can be taken is the position `amount` alone,
//! because tracked cooldown amounts are part of it, not on top of it.

use crate::position::{CooldownTrack, ExitIntent, StakePosition};
use crate::ContractError;

/// Takes up to `requested` from `position` and returns what was taken.
///
/// Requests larger than the position are capped at the position amount.
/// A track left holding more than the reduced amount is clamped down; a
/// track clamped to zero is cleared.
pub fn seize(
    position: &mut StakePosition,
    requested: i128,
    now: u64,
) -> Result<i128, ContractError> {
    if requested <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    if !position.is_active() {
        return Err(ContractError::NoPosition);
    }

    let applied = requested.min(position.amount);
    position.amount -= applied;
    position.exit = clamp(&position.exit, position.amount);
    position.last_update_time = now;
    Ok(applied)
}

fn clamp(exit: &ExitIntent, ceiling: i128) -> ExitIntent {
    let shrink = |track: &CooldownTrack| CooldownTrack {
        amount: track.amount.min(ceiling),
        start: track.start,
    };
    match exit {
        ExitIntent::Normal(track) if ceiling > 0 => ExitIntent::Normal(shrink(track)),
        ExitIntent::Early(track) if ceiling > 0 => ExitIntent::Early(shrink(track)),
        _ => ExitIntent::Idle,
    }
}
