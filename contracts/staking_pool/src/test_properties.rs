use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};

use crate::controller::{add_rewards, claim_rewards, stake_tokens, unstake_tokens};
use crate::registry::StakeRecord;
use crate::rewards::PoolState;
use crate::test_ledger::FakeLedger;
use crate::ContractError;

const DURATION: u64 = 100_000;
const STAKERS: usize = 3;
const STARTING_BALANCE: i128 = 50_000;

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Stake {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
        #[proptest(strategy = "1i128..20_000")]
        amount: i128,
    },
    Unstake {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
        #[proptest(strategy = "1i128..20_000")]
        amount: i128,
    },
    Claim {
        #[proptest(strategy = "0usize..STAKERS")]
        who: usize,
    },
    Wait {
        #[proptest(strategy = "0u64..25_000")]
        seconds: u64,
    },
}

/// Run `op` against working copies and keep them only on success.
fn attempt<F>(pool: &mut PoolState, record: &mut StakeRecord, op: F) -> Result<(), ContractError>
where
    F: FnOnce(&mut PoolState, &mut StakeRecord) -> Result<(), ContractError>,
{
    let mut pool_copy = pool.clone();
    let mut record_copy = record.clone();
    op(&mut pool_copy, &mut record_copy)?;
    *pool = pool_copy;
    *record = record_copy;
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn accounting_invariants_hold(
        ops in proptest::collection::vec(any::<Op>(), 1..40),
        rewards in 1i128..10_000_000,
        lockin in 0u64..5_000,
    ) {
        let env = Env::default();
        let ledger = FakeLedger::new(&env);
        let funder = Address::generate(&env);
        ledger.mint(&funder, rewards);

        let mut pool = PoolState::new(DURATION, lockin);
        add_rewards(&mut pool, &ledger, &funder, rewards, 0).unwrap();

        let stakers: [Address; STAKERS] = core::array::from_fn(|_| Address::generate(&env));
        for who in stakers.iter() {
            ledger.mint(who, STARTING_BALANCE);
        }
        let mut records: [StakeRecord; STAKERS] = Default::default();
        let mut now = 0u64;
        let mut last_rpt = 0i128;

        for op in ops {
            let pool_balance_before = ledger.pool_balance();
            let outcome = match op {
                Op::Stake { who, amount } => attempt(&mut pool, &mut records[who], |p, r| {
                    stake_tokens(p, r, &ledger, &stakers[who], amount, now)
                }),
                Op::Unstake { who, amount } => attempt(&mut pool, &mut records[who], |p, r| {
                    unstake_tokens(p, r, &ledger, &stakers[who], amount, now)
                }),
                Op::Claim { who } => attempt(&mut pool, &mut records[who], |p, r| {
                    claim_rewards(p, r, &ledger, &stakers[who], now).map(|_| ())
                }),
                Op::Wait { seconds } => {
                    now += seconds;
                    Ok(())
                }
            };

            if outcome.is_err() {
                prop_assert_eq!(ledger.pool_balance(), pool_balance_before);
            }

            prop_assert!(pool.reward_per_token_stored >= last_rpt);
            last_rpt = pool.reward_per_token_stored;
            prop_assert!(pool.last_update_time <= now.min(pool.end_time));

            let staked: i128 = records.iter().map(|r| r.amount).sum();
            prop_assert_eq!(pool.total_staked, staked);

            let mut owed = 0i128;
            for record in records.iter() {
                owed += pool.earned(record, now).unwrap();
            }
            prop_assert!(owed + pool.total_rewards_paid <= rewards);

            let paid: i128 = records.iter().map(|r| r.rewards_paid).sum();
            prop_assert_eq!(paid, pool.total_rewards_paid);
            prop_assert_eq!(
                ledger.pool_balance(),
                rewards - pool.total_rewards_paid + pool.total_staked
            );
        }
    }

    #[test]
    fn equal_simultaneous_stakes_earn_equally(
        amount in 1i128..1_000_000,
        rewards in 1i128..1_000_000_000,
        start in 0u64..DURATION,
        waits in proptest::collection::vec(0u64..DURATION, 1..8),
    ) {
        let env = Env::default();
        let ledger = FakeLedger::new(&env);
        let funder = Address::generate(&env);
        let alice = Address::generate(&env);
        let bob = Address::generate(&env);
        ledger.mint(&funder, rewards);
        ledger.mint(&alice, amount);
        ledger.mint(&bob, amount);

        let mut pool = PoolState::new(DURATION, 0);
        add_rewards(&mut pool, &ledger, &funder, rewards, 0).unwrap();

        let mut a = StakeRecord::default();
        let mut b = StakeRecord::default();
        stake_tokens(&mut pool, &mut a, &ledger, &alice, amount, start).unwrap();
        stake_tokens(&mut pool, &mut b, &ledger, &bob, amount, start).unwrap();

        let mut now = start;
        for wait in waits {
            now += wait;
            prop_assert_eq!(pool.earned(&a, now), pool.earned(&b, now));
        }
    }

    #[test]
    fn repeated_checkpoint_adds_nothing(
        amount in 1i128..1_000_000,
        rewards in 1i128..1_000_000_000,
        at in 0u64..(2 * DURATION),
    ) {
        let env = Env::default();
        let ledger = FakeLedger::new(&env);
        let funder = Address::generate(&env);
        ledger.mint(&funder, rewards);

        let mut pool = PoolState::new(DURATION, 0);
        add_rewards(&mut pool, &ledger, &funder, rewards, 0).unwrap();

        let mut record = StakeRecord::default();
        crate::registry::stake(&mut pool, &mut record, amount, 0).unwrap();

        pool.checkpoint(at).unwrap();
        pool.settle(&mut record).unwrap();
        let credited = record.rewards_accrued;

        pool.checkpoint(at).unwrap();
        prop_assert_eq!(pool.settle(&mut record).unwrap(), 0);
        prop_assert_eq!(record.rewards_accrued, credited);
    }
}
