use soroban_sdk::{symbol_short, Env, Symbol};

use crate::ContractError;

const GUARD: Symbol = symbol_short!("GUARD");

/// Marks a mutating call as in progress; fails if one already is.
pub fn enter(env: &Env) -> Result<(), ContractError> {
    if env.storage().instance().get(&GUARD).unwrap_or(false) {
        return Err(ContractError::Reentrancy);
    }
    env.storage().instance().set(&GUARD, &true);
    Ok(())
}

pub fn exit(env: &Env) {
    env.storage().instance().remove(&GUARD);
}

/// Runs `body` with the guard held. An `Err` from `body` rolls back the
/// whole invocation, guard included.
pub fn guarded<T>(
    env: &Env,
    body: impl FnOnce() -> Result<T, ContractError>,
) -> Result<T, ContractError> {
    enter(env)?;
    let result = body();
    exit(env);
    result
}
