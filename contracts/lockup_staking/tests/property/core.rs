#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the pure lockup arithmetic.
//!
//! Invariants tested:
//! - The multiplier is monotonically non-decreasing in duration and stays
//!   between the first and last tier
//! - A weighted average lies between its inputs and never rounds below the
//!   exact value
//! - Combining into an active lockup never unlocks earlier than the
//!   existing commitment would for the blended duration

use lockup_staking::lockup::{weighted_average, Lockup};
use lockup_staking::multiplier::{max_multiplier, min_multiplier, multiplier};
use lockup_staking::{default_tiers, DAY};
use proptest::prelude::*;
use soroban_sdk::Env;

proptest! {
    #[test]
    fn prop_multiplier_monotonic(a in 0u64..=2_000 * DAY, b in 0u64..=2_000 * DAY) {
        let env = Env::default();
        let tiers = default_tiers(&env);
        let (short, long) = if a <= b { (a, b) } else { (b, a) };

        prop_assert!(multiplier(&tiers, short) <= multiplier(&tiers, long));
    }

    #[test]
    fn prop_multiplier_within_bounds(duration in any::<u64>()) {
        let env = Env::default();
        let tiers = default_tiers(&env);
        let m = multiplier(&tiers, duration);

        prop_assert!(m >= min_multiplier(&tiers));
        prop_assert!(m <= max_multiplier(&tiers));
    }

    #[test]
    fn prop_weighted_average_bounded(
        a in 0u64..=u32::MAX as u64,
        b in 0u64..=u32::MAX as u64,
        wa in 0i128..=1_000_000_000,
        wb in 1i128..=1_000_000_000,
    ) {
        let avg = weighted_average(a, wa, b, wb).unwrap();

        prop_assert!(avg >= a.min(b));
        prop_assert!(avg <= a.max(b));

        // Ceiling: avg * weight >= exact numerator, and within one weight of it.
        let numerator = i128::from(a) * wa + i128::from(b) * wb;
        let weight = wa + wb;
        prop_assert!(i128::from(avg) * weight >= numerator);
        prop_assert!(i128::from(avg) * weight - numerator < weight);
    }

    #[test]
    fn prop_combine_conserves_amount(
        base in 1i128..=1_000_000,
        added in 1i128..=1_000_000,
        duration_days in 1u64..=365,
        elapsed_days in 0u64..=400,
    ) {
        let start = 1_000_000u64;
        let lockup = Lockup::new(base, start, duration_days * DAY);
        let now = start + elapsed_days * DAY;

        let combined = lockup.add_amount(added, now).unwrap();
        prop_assert_eq!(combined.amount, base + added);
        prop_assert_eq!(combined.duration, duration_days * DAY);
        prop_assert!(combined.start <= now);
        prop_assert!(combined.start >= start);
    }

    #[test]
    fn prop_extend_adds_to_remaining(
        duration_days in 1u64..=365,
        elapsed_days in 0u64..=400,
        extra_days in 1u64..=365,
    ) {
        let start = 1_000_000u64;
        let lockup = Lockup::new(1_000, start, duration_days * DAY);
        let now = start + elapsed_days * DAY;

        let remaining = lockup.unlock_at().saturating_sub(now);
        let extended = lockup.extend(extra_days * DAY, now).unwrap();

        prop_assert_eq!(extended.start, now);
        prop_assert_eq!(extended.duration, remaining + extra_days * DAY);
        prop_assert!(extended.unlock_at() >= lockup.unlock_at());
    }
}
