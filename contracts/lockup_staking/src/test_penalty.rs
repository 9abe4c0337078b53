extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

use crate::{
    default_tiers, ContractError, CooldownTrack, ExitIntent, LockupStakingContract,
    LockupStakingContractClient, StakePosition, StakingConfig, DAY,
};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (
    Env,
    LockupStakingContractClient<'static>,
    Address, // stake_token
    Address, // treasury
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

    let treasury = Address::generate(&env);
    let enforcer = Address::generate(&env);
    client.initialize(
        &Address::generate(&env),
        &StakingConfig {
            stake_token: stake_token.clone(),
            treasury: treasury.clone(),
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

    (env, client, stake_token, treasury, enforcer)
}

fn staked(
    env: &Env,
    client: &LockupStakingContractClient,
    stake_token: &Address,
    amount: i128,
) -> Address {
    let staker = Address::generate(env);
    StellarAssetClient::new(env, stake_token).mint(&staker, &amount);
    client.deposit(&staker, &amount, &(90 * DAY));
    staker
}

// ── Seizure ───────────────────────────────────────────────────────────────────

#[test]
fn test_penalty_moves_stake_to_treasury() {
    let (env, client, stake_token, treasury, enforcer) = setup();
    let token = TokenClient::new(&env, &stake_token);
    let account = staked(&env, &client, &stake_token, 1_000);

    let applied = client.process_penalty(&enforcer, &account, &300);

    assert_eq!(applied, 300);
    assert_eq!(client.get_total_staked(&account), 700);
    assert_eq!(client.global_total(), 700);
    assert_eq!(token.balance(&treasury), 300);
    assert_eq!(token.balance(&client.address), 700);
}

#[test]
fn test_penalty_is_capped_at_position() {
    let (env, client, stake_token, treasury, enforcer) = setup();
    let token = TokenClient::new(&env, &stake_token);
    let account = staked(&env, &client, &stake_token, 1_000);
    let bystander = staked(&env, &client, &stake_token, 500);

    let applied = client.process_penalty(&enforcer, &account, &5_000);

    assert_eq!(applied, 1_000);
    assert_eq!(client.get_position(&account), StakePosition::empty());
    assert!(!client.has_active_position(&account));
    assert_eq!(token.balance(&treasury), 1_000);

    // Other holders are untouched.
    assert_eq!(client.get_total_staked(&bystander), 500);
    assert_eq!(client.global_total(), 500);
    assert_eq!(token.balance(&client.address), 500);
}

#[test]
fn test_penalty_does_not_double_count_cooldown() {
    let (env, client, stake_token, treasury, enforcer) = setup();
    let token = TokenClient::new(&env, &stake_token);
    let account = staked(&env, &client, &stake_token, 1_000);

    let started = env.ledger().timestamp();
    client.initiate_early_unstake(&account, &800);

    // 800 queued is part of the 1_000, so at most 1_000 can be taken.
    assert_eq!(client.process_penalty(&enforcer, &account, &1_800), 1_000);
    assert_eq!(token.balance(&treasury), 1_000);
    assert_eq!(client.global_total(), 0);

    let other = staked(&env, &client, &stake_token, 1_000);
    client.initiate_early_unstake(&other, &800);
    assert_eq!(client.process_penalty(&enforcer, &other, &500), 500);

    // Track clamped to what is left, original start kept.
    assert_eq!(
        client.get_position(&other).exit,
        ExitIntent::Early(CooldownTrack {
            amount: 500,
            start: started,
        })
    );
}

#[test]
fn test_penalty_ignores_pending_exit_delay() {
    let (env, client, stake_token, _, enforcer) = setup();
    let account = staked(&env, &client, &stake_token, 1_000);

    env.ledger().set_timestamp(env.ledger().timestamp() + 91 * DAY);
    client.initiate_unstake(&account, &1_000);

    // No cooldown wait applies to seizure.
    assert_eq!(client.process_penalty(&enforcer, &account, &250), 250);
    assert_eq!(client.get_summary(&account).cooldown_amount, 750);
}

#[test]
fn test_penalty_requires_enforcer() {
    let (env, client, stake_token, _, _) = setup();
    let account = staked(&env, &client, &stake_token, 1_000);
    let impostor = Address::generate(&env);

    match client.try_process_penalty(&impostor, &account, &100) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.get_total_staked(&account), 1_000);
}

#[test]
fn test_penalty_input_validation() {
    let (env, client, stake_token, _, enforcer) = setup();
    let account = staked(&env, &client, &stake_token, 1_000);
    let nobody = Address::generate(&env);

    match client.try_process_penalty(&enforcer, &account, &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidAmount),
        _ => unreachable!("Expected InvalidAmount error"),
    }
    match client.try_process_penalty(&enforcer, &nobody, &100) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPosition),
        _ => unreachable!("Expected NoPosition error"),
    }
}
