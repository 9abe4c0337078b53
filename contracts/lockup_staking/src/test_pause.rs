extern crate std;

use common::admin_tiers::AdminTier;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};

use crate::{
    default_tiers, reentrancy, ContractError, LockupStakingContract, LockupStakingContractClient,
    StakingConfig, DAY,
};

fn setup_test() -> (
    Env,
    LockupStakingContractClient<'static>,
    Address, // admin
    Address, // stake_token
    Address, // enforcer
) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000_000);

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(LockupStakingContract, ());
    let client = LockupStakingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let enforcer = Address::generate(&env);
    client.initialize(
        &admin,
        &StakingConfig {
            stake_token: stake_token.clone(),
            treasury: Address::generate(&env),
            enforcer: enforcer.clone(),
            cooldown_delay: 2 * DAY,
            early_exit_penalty_bps: 2_000,
            min_stake: 1,
            max_stake: 1_000_000,
            min_unstake: 1,
            min_lockup: DAY,
            max_lockup: 4 * 365 * DAY,
            tiers: default_tiers(&env),
        },
    );

    (env, client, admin, stake_token, enforcer)
}

fn funded(env: &Env, stake_token: &Address, amount: i128) -> Address {
    let staker = Address::generate(env);
    StellarAssetClient::new(env, stake_token).mint(&staker, &amount);
    staker
}

// ── Circuit breaker ───────────────────────────────────────────────────────────

#[test]
fn test_pause_blocks_user_mutations() {
    let (env, client, admin, stake_token, _) = setup_test();
    let staker = funded(&env, &stake_token, 10_000);
    client.deposit(&staker, &1_000, &(30 * DAY));

    client.pause(&admin);
    assert!(client.is_paused());

    let newcomer = funded(&env, &stake_token, 1_000);
    assert_eq!(
        client.try_deposit(&newcomer, &1_000, &(30 * DAY)).unwrap_err().unwrap(),
        ContractError::Paused
    );
    assert_eq!(
        client.try_increase_amount(&staker, &100).unwrap_err().unwrap(),
        ContractError::Paused
    );
    assert_eq!(
        client.try_increase_lockup(&staker, &DAY).unwrap_err().unwrap(),
        ContractError::Paused
    );
    assert_eq!(
        client.try_increase_stake(&staker, &100, &DAY).unwrap_err().unwrap(),
        ContractError::Paused
    );
    assert_eq!(
        client.try_initiate_early_unstake(&staker, &100).unwrap_err().unwrap(),
        ContractError::Paused
    );
    assert_eq!(
        client.try_early_unstake(&staker, &100).unwrap_err().unwrap(),
        ContractError::Paused
    );
    assert_eq!(
        client.try_initiate_unstake(&staker, &100).unwrap_err().unwrap(),
        ContractError::Paused
    );
    assert_eq!(
        client.try_unstake(&staker, &100).unwrap_err().unwrap(),
        ContractError::Paused
    );
    assert_eq!(
        client.try_cancel_unstake(&staker).unwrap_err().unwrap(),
        ContractError::Paused
    );

    // Reads stay available.
    assert_eq!(client.get_total_staked(&staker), 1_000);
    assert_eq!(client.global_total(), 1_000);

    client.unpause(&admin);
    assert!(!client.is_paused());
    client.deposit(&newcomer, &1_000, &(30 * DAY));
    assert_eq!(client.global_total(), 2_000);
}

#[test]
fn test_penalty_hook_ignores_pause() {
    let (env, client, admin, stake_token, enforcer) = setup_test();
    let staker = funded(&env, &stake_token, 1_000);
    client.deposit(&staker, &1_000, &(30 * DAY));

    client.pause(&admin);
    assert_eq!(client.process_penalty(&enforcer, &staker, &400), 400);
    assert_eq!(client.global_total(), 600);
}

#[test]
fn test_operator_can_pause() {
    let (env, client, admin, _, _) = setup_test();
    let operator = Address::generate(&env);

    client.promote_admin(&admin, &operator, &AdminTier::OperatorAdmin);
    client.pause(&operator);
    assert!(client.is_paused());
    client.unpause(&operator);
    assert!(!client.is_paused());
}

#[test]
fn test_non_admin_cannot_pause() {
    let (env, client, _, _, _) = setup_test();
    let stranger = Address::generate(&env);

    assert_eq!(
        client.try_pause(&stranger).unwrap_err().unwrap(),
        ContractError::Unauthorized
    );
    assert!(!client.is_paused());
}

// ── Reentrancy guard ──────────────────────────────────────────────────────────

#[test]
fn test_nested_mutation_rejected_while_guard_held() {
    let (env, client, _, stake_token, enforcer) = setup_test();
    let staker = funded(&env, &stake_token, 2_000);
    client.deposit(&staker, &1_000, &(30 * DAY));

    assert_eq!(
        env.as_contract(&client.address, || reentrancy::enter(&env)),
        Ok(())
    );

    assert_eq!(
        client.try_increase_amount(&staker, &100).unwrap_err().unwrap(),
        ContractError::Reentrancy
    );
    assert_eq!(
        client.try_process_penalty(&enforcer, &staker, &100).unwrap_err().unwrap(),
        ContractError::Reentrancy
    );

    env.as_contract(&client.address, || reentrancy::exit(&env));
    client.increase_amount(&staker, &100);
    assert_eq!(client.global_total(), 1_100);
}

#[test]
fn test_failed_call_releases_guard() {
    let (env, client, _, stake_token, _) = setup_test();
    let staker = funded(&env, &stake_token, 2_000);

    assert_eq!(
        client.try_deposit(&staker, &0, &(30 * DAY)).unwrap_err().unwrap(),
        ContractError::InvalidAmount
    );
    client.deposit(&staker, &1_000, &(30 * DAY));
    assert_eq!(client.global_total(), 1_000);
}
