#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lockup_staking::{
    default_tiers, LockupStakingContract, LockupStakingContractClient, StakingConfig, DAY,
};
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};

const FUNDING: i128 = 1_000_000_000;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { amount: u32, days: u16 },
    IncreaseAmount { amount: u32 },
    IncreaseLockup { days: u16 },
    IncreaseStake { amount: u32, days: u16 },
    InitiateUnstake { amount: u32 },
    Unstake { amount: u32 },
    InitiateEarlyUnstake { amount: u32 },
    EarlyUnstake { amount: u32 },
    CancelUnstake,
    Penalty { amount: u64 },
    Advance { secs: u32 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(LockupStakingContract, ());
    let client = LockupStakingContractClient::new(&env, &contract_id);

    let enforcer = Address::generate(&env);
    client.initialize(
        &Address::generate(&env),
        &StakingConfig {
            stake_token: stake_token.clone(),
            treasury: Address::generate(&env),
            enforcer: enforcer.clone(),
            cooldown_delay: 2 * DAY,
            early_exit_penalty_bps: 2_000,
            min_stake: 1,
            max_stake: FUNDING,
            min_unstake: 1,
            min_lockup: 1,
            max_lockup: 4 * 365 * DAY,
            tiers: default_tiers(&env),
        },
    );

    let minter = StellarAssetClient::new(&env, &stake_token);
    let mut users = Vec::new();
    for _ in 0..4 {
        let user = Address::generate(&env);
        minter.mint(&user, &FUNDING);
        users.push(user);
    }
    let token = TokenClient::new(&env, &stake_token);

    // Failures are fine; any panic or broken accounting is a finding.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Deposit { amount, days } => {
                let _ = client.try_deposit(caller, &i128::from(amount), &(u64::from(days) * DAY));
            }
            FuzzAction::IncreaseAmount { amount } => {
                let _ = client.try_increase_amount(caller, &i128::from(amount));
            }
            FuzzAction::IncreaseLockup { days } => {
                let _ = client.try_increase_lockup(caller, &(u64::from(days) * DAY));
            }
            FuzzAction::IncreaseStake { amount, days } => {
                let _ = client.try_increase_stake(
                    caller,
                    &i128::from(amount),
                    &(u64::from(days) * DAY),
                );
            }
            FuzzAction::InitiateUnstake { amount } => {
                let _ = client.try_initiate_unstake(caller, &i128::from(amount));
            }
            FuzzAction::Unstake { amount } => {
                let _ = client.try_unstake(caller, &i128::from(amount));
            }
            FuzzAction::InitiateEarlyUnstake { amount } => {
                let _ = client.try_initiate_early_unstake(caller, &i128::from(amount));
            }
            FuzzAction::EarlyUnstake { amount } => {
                let _ = client.try_early_unstake(caller, &i128::from(amount));
            }
            FuzzAction::CancelUnstake => {
                let _ = client.try_cancel_unstake(caller);
            }
            FuzzAction::Penalty { amount } => {
                let _ = client.try_process_penalty(&enforcer, caller, &i128::from(amount));
            }
            FuzzAction::Advance { secs } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + u64::from(secs));
            }
        }

        let sum: i128 = users.iter().map(|u| client.get_total_staked(u)).sum();
        assert_eq!(sum, client.global_total());
        assert_eq!(token.balance(&contract_id), client.global_total());
    }
});
