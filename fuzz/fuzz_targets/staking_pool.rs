#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{token, Address, Env};
use staking_pool::{ContractError, StakingPoolContract, StakingPoolContractClient};

const STAKERS: usize = 4;
const MAX_ACTIONS: usize = 64;

#[derive(Arbitrary, Debug)]
enum Action {
    Stake { who: u8, amount: u32 },
    Unstake { who: u8, amount: u32 },
    Claim { who: u8 },
    Advance { seconds: u32 },
    Refund { amount: u32 },
}

#[derive(Arbitrary, Debug)]
struct Input {
    duration_days: u8,
    lockin_days: u8,
    rewards: u32,
    actions: Vec<Action>,
}

fuzz_target!(|input: Input| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);

    let admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(admin.clone());
    let token = token::Client::new(&env, &sac.address());
    token::StellarAssetClient::new(&env, &sac.address()).mint(&admin, &i128::from(u64::MAX));

    let contract_id = env.register(StakingPoolContract, ());
    let client = StakingPoolContractClient::new(&env, &contract_id);

    let duration_days = u64::from(input.duration_days % 30).max(1);
    let lockin_days = u64::from(input.lockin_days % 5);
    client.initialize(&admin, &sac.address(), &duration_days, &lockin_days);

    let rewards = i128::from(input.rewards).max(1);
    client.add_rewards(&admin, &rewards);

    let stakers: Vec<Address> = (0..STAKERS).map(|_| Address::generate(&env)).collect();
    for who in stakers.iter() {
        token.transfer(&admin, who, &1_000_000_000);
    }

    let mut last_rpt = 0i128;
    for action in input.actions.iter().take(MAX_ACTIONS) {
        match *action {
            Action::Stake { who, amount } => {
                let who = &stakers[usize::from(who) % STAKERS];
                let _ = client.try_stake_tokens(who, &i128::from(amount));
            }
            Action::Unstake { who, amount } => {
                let who = &stakers[usize::from(who) % STAKERS];
                let _ = client.try_unstake_tokens(who, &i128::from(amount));
            }
            Action::Claim { who } => {
                let who = &stakers[usize::from(who) % STAKERS];
                let _ = client.try_claim_rewards(who);
            }
            Action::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + u64::from(seconds % 200_000));
            }
            Action::Refund { amount } => {
                let res = client.try_add_rewards(&admin, &i128::from(amount));
                assert_eq!(res, Err(Ok(ContractError::AlreadyFunded)));
            }
        }

        let pool = client.get_pool();
        assert!(pool.reward_per_token_stored >= last_rpt);
        last_rpt = pool.reward_per_token_stored;

        let staked: i128 = stakers.iter().map(|s| client.get_stake(s).amount).sum();
        assert_eq!(pool.total_staked, staked);

        let owed: i128 = stakers.iter().map(|s| client.earned(s)).sum();
        assert!(owed + pool.total_rewards_paid <= rewards);

        assert_eq!(
            token.balance(&contract_id),
            rewards - pool.total_rewards_paid + pool.total_staked
        );
    }
});
