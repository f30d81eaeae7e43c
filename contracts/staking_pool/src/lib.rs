#![no_std]

#[cfg(test)]
extern crate std;

pub mod controller;
pub mod events;
pub mod fixed_point;
pub mod ledger;
pub mod registry;
pub mod rewards;
pub mod storage;

use soroban_sdk::{contract, contractimpl, contracttype, log, Address, Env};

use ledger::TokenClientLedger;
use registry::StakeRecord;
use rewards::PoolState;

pub const SECONDS_PER_DAY: u64 = 86_400;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    ZeroAmount = 5,
    AlreadyFunded = 6,
    NotFunded = 7,
    Locked = 8,
    InsufficientStake = 9,
    TransferFailed = 10,
    ArithmeticOverflow = 11,
    RewardsTooLarge = 12,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Snapshot of a participant's position returned by `get_staker_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakerInfo {
    pub staked: i128,
    pub pending_rewards: i128,
    pub unlock_time: u64,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingPoolContract;

#[contractimpl]
impl StakingPoolContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Create the pool.
    ///
    /// * `token`         – SAC address of the token that is both staked and
    ///   paid out as reward.
    /// * `duration_days` – length of the reward emission window.
    /// * `lockin_days`   – minimum dwell time between a deposit and a
    ///   withdrawal; zero disables the lock-in.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        duration_days: u64,
        lockin_days: u64,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        if duration_days == 0 {
            return Err(ContractError::InvalidInput);
        }

        let duration_seconds = days_to_seconds(duration_days)?;
        let lockin_seconds = days_to_seconds(lockin_days)?;
        let pool = PoolState::new(duration_seconds, lockin_seconds);

        storage::init(&env, &admin, &token, &pool);

        events::publish_initialized(&env, admin, token, duration_seconds, lockin_seconds);

        Ok(())
    }

    // ── Funding ─────────────────────────────────────────────────────────────

    /// Deposit the whole reward budget and start the emission clock.
    ///
    /// One-shot: any later call fails with `AlreadyFunded`.
    pub fn add_rewards(env: Env, funder: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        funder.require_auth();
        Self::require_admin(&env, &funder)?;

        let mut pool = storage::get_pool(&env)?;
        let token = storage::get_token(&env)?;
        let ledger = TokenClientLedger::new(&env, &token);
        let now = env.ledger().timestamp();

        controller::add_rewards(&mut pool, &ledger, &funder, amount, now)?;

        storage::set_pool(&env, &pool);

        events::publish_rewards_added(&env, funder, amount, pool.start_time, pool.end_time);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` tokens as principal.
    ///
    /// Restarts the participant's lock-in.
    pub fn stake_tokens(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut pool = storage::get_pool(&env)?;
        let mut record = registry::load(&env, &staker);
        let token = storage::get_token(&env)?;
        let ledger = TokenClientLedger::new(&env, &token);
        let now = env.ledger().timestamp();

        controller::stake_tokens(&mut pool, &mut record, &ledger, &staker, amount, now)?;

        registry::store(&env, &staker, &record);
        storage::set_pool(&env, &pool);

        let unlock_time = record.unlock_time(pool.lockin_seconds);
        events::publish_staked(&env, staker, amount, pool.total_staked, unlock_time);

        Ok(())
    }

    /// Withdraw `amount` of principal once the lock-in has elapsed.
    ///
    /// Rewards accrued up to now stay credited to the participant.
    pub fn unstake_tokens(
        env: Env,
        staker: Address,
        amount: i128,
    ) -> Result<StakeRecord, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut pool = storage::get_pool(&env)?;
        let mut record = registry::load(&env, &staker);
        let token = storage::get_token(&env)?;
        let ledger = TokenClientLedger::new(&env, &token);
        let now = env.ledger().timestamp();
        let unlock_time = record.unlock_time(pool.lockin_seconds);

        if let Err(err) =
            controller::unstake_tokens(&mut pool, &mut record, &ledger, &staker, amount, now)
        {
            if err == ContractError::Locked {
                log!(&env, "stake locked", staker, unlock_time, now);
            }
            return Err(err);
        }

        registry::store(&env, &staker, &record);
        storage::set_pool(&env, &pool);

        events::publish_unstaked(&env, staker, amount, pool.total_staked);

        Ok(record)
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out everything credited to `staker`.
    ///
    /// Returns the amount paid. With nothing accrued this returns 0 without
    /// touching storage.
    pub fn claim_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut pool = storage::get_pool(&env)?;
        let mut record = registry::load(&env, &staker);
        let token = storage::get_token(&env)?;
        let ledger = TokenClientLedger::new(&env, &token);
        let now = env.ledger().timestamp();

        let paid = controller::claim_rewards(&mut pool, &mut record, &ledger, &staker, now)?;
        if paid == 0 {
            return Ok(0);
        }

        registry::store(&env, &staker, &record);
        storage::set_pool(&env, &pool);

        events::publish_rewards_claimed(&env, staker, paid);

        Ok(paid)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Sum of all participants' principal.
    pub fn total_staked(env: Env) -> i128 {
        storage::get_pool(&env)
            .map(|pool| pool.total_staked)
            .unwrap_or(0)
    }

    /// The reward budget, or 0 before funding.
    pub fn total_pool_rewards(env: Env) -> i128 {
        storage::get_pool(&env)
            .map(|pool| pool.total_pool_rewards)
            .unwrap_or(0)
    }

    /// Real-time claimable rewards for `participant` without mutating state.
    pub fn earned(env: Env, participant: Address) -> Result<i128, ContractError> {
        let pool = storage::get_pool(&env)?;
        let record = registry::load(&env, &participant);
        pool.earned(&record, env.ledger().timestamp())
    }

    /// The participant's stored record; empty if they never staked.
    pub fn get_stake(env: Env, participant: Address) -> StakeRecord {
        registry::load(&env, &participant)
    }

    /// Combined position: principal, claimable rewards and unlock time.
    pub fn get_staker_info(env: Env, participant: Address) -> Result<StakerInfo, ContractError> {
        let pool = storage::get_pool(&env)?;
        let record = registry::load(&env, &participant);

        Ok(StakerInfo {
            staked: record.amount,
            pending_rewards: pool.earned(&record, env.ledger().timestamp())?,
            unlock_time: record.unlock_time(pool.lockin_seconds),
        })
    }

    /// Earliest timestamp at which `participant` may withdraw.
    pub fn unlock_time(env: Env, participant: Address) -> Result<u64, ContractError> {
        let pool = storage::get_pool(&env)?;
        Ok(registry::load(&env, &participant).unlock_time(pool.lockin_seconds))
    }

    /// Full pool accounting state.
    pub fn get_pool(env: Env) -> Result<PoolState, ContractError> {
        storage::get_pool(&env)
    }

    /// Per-second emission scaled by `fixed_point::PRECISION`.
    pub fn reward_rate(env: Env) -> i128 {
        storage::get_pool(&env)
            .map(|pool| pool.reward_rate)
            .unwrap_or(0)
    }

    /// Whether the reward budget has been deposited.
    pub fn is_funded(env: Env) -> bool {
        storage::get_pool(&env)
            .map(|pool| pool.is_funded())
            .unwrap_or(false)
    }

    /// Whether `initialize` has run.
    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    /// The address allowed to fund the pool.
    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        storage::get_admin(&env)
    }

    /// The staked and rewarded token.
    pub fn get_token(env: Env) -> Result<Address, ContractError> {
        storage::get_token(&env)
    }

    /// Contract interface version.
    pub fn version() -> u32 {
        1
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !storage::is_initialized(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin = storage::get_admin(env)?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }
}

fn days_to_seconds(days: u64) -> Result<u64, ContractError> {
    days.checked_mul(SECONDS_PER_DAY)
        .ok_or(ContractError::ArithmeticOverflow)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test_ledger;


#[cfg(test)]
mod test_properties;
