use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::config::StakingConfig;
use crate::position::StakePosition;
use crate::ContractError;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");

// Per-account persistent storage uses tuple keys: (prefix, staker)
const POSITION: Symbol = symbol_short!("POS");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Lifecycle ────────────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn mark_initialized(env: &Env, config: &StakingConfig) {
    env.storage().instance().set(&INITIALIZED, &true);
    env.storage().instance().set(&CONFIG, config);
}

pub fn config(env: &Env) -> Result<StakingConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

// ── Ledger ───────────────────────────────────────────────────────────────────

fn position_key(staker: &Address) -> (Symbol, Address) {
    (POSITION, staker.clone())
}

/// The stored position, or the all-zero record when none is open.
pub fn load_position(env: &Env, staker: &Address) -> StakePosition {
    let key = position_key(staker);
    match env.storage().persistent().get::<_, StakePosition>(&key) {
        Some(position) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
            position
        }
        None => StakePosition::empty(),
    }
}

/// Persists `position`; a position whose amount reached zero is removed so
/// no residual state survives it.
pub fn save_position(env: &Env, staker: &Address, position: &StakePosition) {
    let key = position_key(staker);
    if position.is_active() {
        env.storage().persistent().set(&key, position);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    } else {
        env.storage().persistent().remove(&key);
    }
}

pub fn has_position(env: &Env, staker: &Address) -> bool {
    env.storage().persistent().has(&position_key(staker))
}

// ── Global accounting ────────────────────────────────────────────────────────

pub fn global_total(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
}

/// Moves the global total by `delta` and returns the new value.
pub fn adjust_global_total(env: &Env, delta: i128) -> Result<i128, ContractError> {
    let total = global_total(env)
        .checked_add(delta)
        .ok_or(ContractError::ArithmeticOverflow)?;
    if total < 0 {
        return Err(ContractError::ArithmeticOverflow);
    }
    env.storage().instance().set(&TOTAL_STAKED, &total);
    Ok(total)
}
