//! Boundary to the token-transfer collaborator.
//!
//! Callers finish every ledger write before reaching here.

use soroban_sdk::{token, Address, Env};

/// Pulls `amount` of `token` from `from` into the contract.
pub fn transfer_in(env: &Env, token: &Address, from: &Address, amount: i128) {
    if amount <= 0 {
        return;
    }
    token::Client::new(env, token).transfer(from, &env.current_contract_address(), &amount);
}

/// Pays `amount` of `token` from the contract to `to`.
pub fn transfer_out(env: &Env, token: &Address, to: &Address, amount: i128) {
    if amount <= 0 {
        return;
    }
    token::Client::new(env, token).transfer(&env.current_contract_address(), to, &amount);
}
