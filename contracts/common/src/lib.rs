//! Helpers shared by the lockup staking contracts.
//!
//! - [`admin_tiers`]: the three-tier operator/admin role registry used for
//!   pausing, configuration and role management.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod admin_tiers;

pub use admin_tiers::AdminTier;
