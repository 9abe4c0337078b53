#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::position::StakePosition;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub stake_token: Address,
    pub treasury: Address,
    pub enforcer: Address,
    pub cooldown_delay: u64,
    pub timestamp: u64,
}

/// Fired when a position is opened, grown, or re-locked.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionChangedEvent {
    pub staker: Address,
    pub amount_added: i128,
    pub new_amount: i128,
    pub weighted_start_time: u64,
    pub effective_lockup_duration: u64,
    pub effective_multiplier: u32,
    pub new_global_total: i128,
    pub timestamp: u64,
}

/// Fired when only the lockup of a position is extended. No value moves.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockupExtendedEvent {
    pub staker: Address,
    pub extra: u64,
    pub weighted_start_time: u64,
    pub effective_lockup_duration: u64,
    pub effective_multiplier: u32,
    pub timestamp: u64,
}

/// Fired when an exit track is opened or topped up.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExitInitiatedEvent {
    pub staker: Address,
    pub amount: i128,
    pub queued_total: i128,
    pub claimable_at: u64,
    pub timestamp: u64,
}

/// Fired when value leaves a position through an exit track.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub staker: Address,
    pub amount: i128,
    pub payout: i128,
    pub penalty: i128,
    pub new_global_total: i128,
    pub timestamp: u64,
}

/// Fired when a pending exit is abandoned.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExitCancelledEvent {
    pub staker: Address,
    pub released: i128,
    pub timestamp: u64,
}

/// Fired when the enforcement collaborator seizes stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PenaltyProcessedEvent {
    pub account: Address,
    pub requested: i128,
    pub applied: i128,
    pub treasury: Address,
    pub new_global_total: i128,
    pub timestamp: u64,
}

/// Fired when the circuit breaker changes state.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CircuitBreakerEvent {
    pub caller: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    stake_token: Address,
    treasury: Address,
    enforcer: Address,
    cooldown_delay: u64,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            stake_token,
            treasury,
            enforcer,
            cooldown_delay,
            timestamp: env.ledger().timestamp(),
        },
    );
}

fn position_changed(
    env: &Env,
    staker: Address,
    amount_added: i128,
    position: &StakePosition,
    new_global_total: i128,
) -> PositionChangedEvent {
    PositionChangedEvent {
        staker,
        amount_added,
        new_amount: position.amount,
        weighted_start_time: position.weighted_start_time,
        effective_lockup_duration: position.effective_lockup_duration,
        effective_multiplier: position.effective_multiplier,
        new_global_total,
        timestamp: env.ledger().timestamp(),
    }
}

pub fn publish_deposited(
    env: &Env,
    staker: Address,
    amount: i128,
    position: &StakePosition,
    new_global_total: i128,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), staker.clone()),
        position_changed(env, staker, amount, position, new_global_total),
    );
}

pub fn publish_amount_increased(
    env: &Env,
    staker: Address,
    delta: i128,
    position: &StakePosition,
    new_global_total: i128,
) {
    env.events().publish(
        (symbol_short!("INC_AMT"), staker.clone()),
        position_changed(env, staker, delta, position, new_global_total),
    );
}

pub fn publish_lockup_increased(env: &Env, staker: Address, extra: u64, position: &StakePosition) {
    env.events().publish(
        (symbol_short!("INC_LOCK"), staker.clone()),
        LockupExtendedEvent {
            staker,
            extra,
            weighted_start_time: position.weighted_start_time,
            effective_lockup_duration: position.effective_lockup_duration,
            effective_multiplier: position.effective_multiplier,
            timestamp: env.ledger().timestamp(),
        },
    );
}

/// Value and lockup grown together; `amount_added` carries the inflow.
pub fn publish_stake_increased(
    env: &Env,
    staker: Address,
    delta: i128,
    position: &StakePosition,
    new_global_total: i128,
) {
    env.events().publish(
        (symbol_short!("INC_STK"), staker.clone()),
        position_changed(env, staker, delta, position, new_global_total),
    );
}

pub fn publish_unstake_initiated(
    env: &Env,
    staker: Address,
    amount: i128,
    queued_total: i128,
    claimable_at: u64,
) {
    env.events().publish(
        (symbol_short!("UNSTK_REQ"), staker.clone()),
        ExitInitiatedEvent {
            staker,
            amount,
            queued_total,
            claimable_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(env: &Env, staker: Address, amount: i128, new_global_total: i128) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), staker.clone()),
        WithdrawnEvent {
            staker,
            amount,
            payout: amount,
            penalty: 0,
            new_global_total,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_early_unstake_initiated(
    env: &Env,
    staker: Address,
    amount: i128,
    claimable_at: u64,
) {
    env.events().publish(
        (symbol_short!("EARLY_REQ"), staker.clone()),
        ExitInitiatedEvent {
            staker,
            amount,
            queued_total: amount,
            claimable_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_early_unstaked(
    env: &Env,
    staker: Address,
    amount: i128,
    payout: i128,
    penalty: i128,
    new_global_total: i128,
) {
    env.events().publish(
        (symbol_short!("EARLY_OUT"), staker.clone()),
        WithdrawnEvent {
            staker,
            amount,
            payout,
            penalty,
            new_global_total,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_exit_cancelled(env: &Env, staker: Address, released: i128) {
    env.events().publish(
        (symbol_short!("EXIT_CNCL"), staker.clone()),
        ExitCancelledEvent {
            staker,
            released,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_penalty_processed(
    env: &Env,
    account: Address,
    requested: i128,
    applied: i128,
    treasury: Address,
    new_global_total: i128,
) {
    env.events().publish(
        (symbol_short!("PENALTY"), account.clone()),
        PenaltyProcessedEvent {
            account,
            requested,
            applied,
            treasury,
            new_global_total,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_paused(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("PAUSED"), caller.clone()),
        CircuitBreakerEvent {
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unpaused(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("UNPAUSED"), caller.clone()),
        CircuitBreakerEvent {
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}
