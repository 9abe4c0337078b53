//! Duration-tiered reward multiplier.
//!
//! A tier table maps commitment durations (seconds) to multipliers in basis
//! points, where [`BPS_DENOMINATOR`] is 1.00x. Durations between two
//! breakpoints are linearly interpolated with floor division; durations at
//! or below the first breakpoint take the first tier and durations past the
//! last breakpoint clamp to the last tier. The staked amount never enters
//! the computation.

use soroban_sdk::{contracttype, Vec};

use crate::ContractError;

/// 10_000 bps == 1.00x.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// One breakpoint of the multiplier table.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MultiplierTier {
    /// Commitment duration in seconds.
    pub duration: u64,
    /// Multiplier in basis points at exactly `duration`.
    pub multiplier_bps: u32,
}

/// Multiplier in basis points for a commitment of `duration` seconds.
///
/// An empty table yields [`BPS_DENOMINATOR`]; tables are validated with
/// [`validate_tiers`] before they are stored, so that only happens in tests.
pub fn multiplier(tiers: &Vec<MultiplierTier>, duration: u64) -> u32 {
    let mut iter = tiers.iter();
    let Some(mut low) = iter.next() else {
        return BPS_DENOMINATOR;
    };
    if duration <= low.duration {
        return low.multiplier_bps;
    }

    for high in iter {
        if duration <= high.duration {
            return interpolate(&low, &high, duration);
        }
        low = high;
    }

    low.multiplier_bps
}

/// `low.m + (high.m - low.m) * (d - low.d) / (high.d - low.d)`, rounded down.
fn interpolate(low: &MultiplierTier, high: &MultiplierTier, duration: u64) -> u32 {
    let width = u128::from(high.duration - low.duration);
    let offset = u128::from(duration - low.duration);
    let span = u128::from(high.multiplier_bps.saturating_sub(low.multiplier_bps));

    // offset <= width, so the step never exceeds span and fits in u32.
    let step = (span * offset / width) as u32;
    low.multiplier_bps + step
}

/// Smallest multiplier a non-empty position can carry.
pub fn min_multiplier(tiers: &Vec<MultiplierTier>) -> u32 {
    tiers
        .first()
        .map(|tier| tier.multiplier_bps)
        .unwrap_or(BPS_DENOMINATOR)
}

/// Largest multiplier a position can carry.
pub fn max_multiplier(tiers: &Vec<MultiplierTier>) -> u32 {
    tiers
        .last()
        .map(|tier| tier.multiplier_bps)
        .unwrap_or(BPS_DENOMINATOR)
}

/// Rejects tables that are empty, whose durations are not strictly
/// increasing, whose multipliers decrease, or that dip below 1.00x.
pub fn validate_tiers(tiers: &Vec<MultiplierTier>) -> Result<(), ContractError> {
    if tiers.is_empty() {
        return Err(ContractError::InvalidConfig);
    }

    let mut previous: Option<MultiplierTier> = None;
    for tier in tiers.iter() {
        if tier.duration == 0 || tier.multiplier_bps < BPS_DENOMINATOR {
            return Err(ContractError::InvalidConfig);
        }
        if let Some(prev) = previous {
            if tier.duration <= prev.duration || tier.multiplier_bps < prev.multiplier_bps {
                return Err(ContractError::InvalidConfig);
            }
        }
        previous = Some(tier);
    }

    Ok(())
}
