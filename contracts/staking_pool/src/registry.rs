use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::fixed_point::{checked_add, checked_sub};
use crate::rewards::PoolState;
use crate::storage::{TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::ContractError;

// ── Types ───────────────────────────────────────────────────────────────────

/// A participant's position in the pool.
///
/// Created on first stake and never removed; `amount` may fall back to zero
/// while the reward bookkeeping stays on record.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StakeRecord {
    /// Staked principal.
    pub amount: i128,
    /// Timestamp of the latest deposit. Every top-up restarts the lock-in.
    pub deposit_time: u64,
    /// Accumulator value at this participant's last settlement.
    pub reward_per_token_paid: i128,
    /// Credited rewards not yet transferred.
    pub rewards_accrued: i128,
    /// Rewards already transferred to this participant.
    pub rewards_paid: i128,
}

impl StakeRecord {
    pub fn unlock_time(&self, lockin_seconds: u64) -> u64 {
        self.deposit_time.saturating_add(lockin_seconds)
    }

    pub fn is_unlocked(&self, lockin_seconds: u64, now: u64) -> bool {
        now >= self.unlock_time(lockin_seconds)
    }
}

// ── Record transitions ──────────────────────────────────────────────────────

/// Add `amount` to the participant's principal and to the pool total.
///
/// Callers must checkpoint and settle first; this only moves principal.
pub fn stake(
    pool: &mut PoolState,
    record: &mut StakeRecord,
    amount: i128,
    now: u64,
) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::ZeroAmount);
    }

    let new_amount = checked_add(record.amount, amount)?;
    let new_total = checked_add(pool.total_staked, amount)?;

    record.amount = new_amount;
    record.deposit_time = now;
    pool.total_staked = new_total;
    Ok(())
}

/// Remove `amount` from the participant's principal and from the pool total.
///
/// Fails with `InsufficientStake` past the balance and with `Locked` before
/// `deposit_time + lockin_seconds`. The unlock instant itself is allowed.
pub fn unstake(
    pool: &mut PoolState,
    record: &mut StakeRecord,
    amount: i128,
    now: u64,
) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::ZeroAmount);
    }
    if amount > record.amount {
        return Err(ContractError::InsufficientStake);
    }
    if !record.is_unlocked(pool.lockin_seconds, now) {
        return Err(ContractError::Locked);
    }

    let new_amount = checked_sub(record.amount, amount)?;
    let new_total = checked_sub(pool.total_staked, amount)?;

    record.amount = new_amount;
    pool.total_staked = new_total;
    Ok(())
}

// ── Storage helpers ─────────────────────────────────────────────────────────

const STAKE: Symbol = symbol_short!("STAKE");

fn record_key(participant: &Address) -> (Symbol, Address) {
    (STAKE, participant.clone())
}

/// Load a participant's record, or an empty one if they never staked.
pub fn load(env: &Env, participant: &Address) -> StakeRecord {
    let key = record_key(participant);
    let storage = env.storage().persistent();
    match storage.get::<_, StakeRecord>(&key) {
        Some(record) => {
            storage.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
            record
        }
        None => StakeRecord::default(),
    }
}

/// Persist a participant's record.
pub fn store(env: &Env, participant: &Address, record: &StakeRecord) {
    let key = record_key(participant);
    let storage = env.storage().persistent();
    storage.set(&key, record);
    storage.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
