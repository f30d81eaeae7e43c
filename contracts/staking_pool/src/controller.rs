//! Lifecycle orchestration for the pool.
//!
//! Every operation works on caller-owned copies of the pool and the acting
//! participant's record. The order is fixed: checkpoint the accumulator at
//! the pre-change stake, settle the participant, apply the principal
//! change, and only then move tokens. On `Err` the copies are simply
//! dropped, so storage never sees a partial update.

use soroban_sdk::Address;

use crate::fixed_point::checked_add;
use crate::ledger::TokenLedger;
use crate::registry::{self, StakeRecord};
use crate::rewards::PoolState;
use crate::ContractError;

fn require_funded(pool: &PoolState) -> Result<(), ContractError> {
    if !pool.is_funded() {
        return Err(ContractError::NotFunded);
    }
    Ok(())
}

/// Fund the reward budget once and start the emission clock.
pub fn add_rewards<L: TokenLedger>(
    pool: &mut PoolState,
    ledger: &L,
    funder: &Address,
    amount: i128,
    now: u64,
) -> Result<(), ContractError> {
    pool.fund(amount, now)?;
    ledger.transfer_in(funder, amount)
}

pub fn stake_tokens<L: TokenLedger>(
    pool: &mut PoolState,
    record: &mut StakeRecord,
    ledger: &L,
    staker: &Address,
    amount: i128,
    now: u64,
) -> Result<(), ContractError> {
    require_funded(pool)?;
    if amount <= 0 {
        return Err(ContractError::ZeroAmount);
    }

    pool.checkpoint(now)?;
    pool.settle(record)?;
    registry::stake(pool, record, amount, now)?;

    ledger.transfer_in(staker, amount)
}

pub fn unstake_tokens<L: TokenLedger>(
    pool: &mut PoolState,
    record: &mut StakeRecord,
    ledger: &L,
    staker: &Address,
    amount: i128,
    now: u64,
) -> Result<(), ContractError> {
    require_funded(pool)?;
    if amount <= 0 {
        return Err(ContractError::ZeroAmount);
    }

    pool.checkpoint(now)?;
    pool.settle(record)?;
    registry::unstake(pool, record, amount, now)?;

    ledger.transfer_out(staker, amount)
}

/// Pay out everything credited to `staker`. Returns the amount paid; zero
/// means nothing was owed and no transfer happened.
pub fn claim_rewards<L: TokenLedger>(
    pool: &mut PoolState,
    record: &mut StakeRecord,
    ledger: &L,
    staker: &Address,
    now: u64,
) -> Result<i128, ContractError> {
    require_funded(pool)?;

    pool.checkpoint(now)?;
    pool.settle(record)?;

    let reward = record.rewards_accrued;
    if reward <= 0 {
        return Ok(0);
    }

    record.rewards_accrued = 0;
    record.rewards_paid = checked_add(record.rewards_paid, reward)?;
    pool.total_rewards_paid = checked_add(pool.total_rewards_paid, reward)?;

    ledger.transfer_out(staker, reward)?;
    Ok(reward)
}
