use common::admin_tiers::{self, AdminTier};
use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::{events, ContractError};

const PAUSED: Symbol = symbol_short!("P_GLOB");

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

/// Guard for user-initiated mutations. Enforcement and reads skip it.
pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
    if is_paused(env) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

fn require_operator(env: &Env, caller: &Address) -> Result<(), ContractError> {
    if !admin_tiers::has_tier(env, caller, &AdminTier::OperatorAdmin) {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// Engages the breaker. Requires at least `OperatorAdmin`.
pub fn pause(env: &Env, caller: &Address) -> Result<(), ContractError> {
    require_operator(env, caller)?;
    env.storage().instance().set(&PAUSED, &true);
    events::publish_paused(env, caller.clone());
    Ok(())
}

/// Releases the breaker. Requires at least `OperatorAdmin`.
pub fn unpause(env: &Env, caller: &Address) -> Result<(), ContractError> {
    require_operator(env, caller)?;
    env.storage().instance().set(&PAUSED, &false);
    events::publish_unpaused(env, caller.clone());
    Ok(())
}
