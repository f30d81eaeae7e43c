use soroban_sdk::contracttype;

use crate::fixed_point::{checked_add, checked_sub, mul_div, PRECISION};
use crate::registry::StakeRecord;
use crate::ContractError;

/// Largest budget the accumulator can carry.
///
/// With one native unit staked for the whole window, `reward_per_token_stored`
/// reaches `budget * PRECISION`, so a budget at or below this bound keeps every
/// accumulator value, and every settled amount, inside `i128`.
pub const MAX_POOL_REWARDS: i128 = i128::MAX / PRECISION;

/// Pool-wide accounting: the reward schedule, the principal total, and the
/// reward-per-token accumulator.
///
/// `reward_rate` and `reward_per_token_stored` are scaled by [`PRECISION`];
/// every other amount is in the token's native unit.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    /// Length of the reward emission window.
    pub duration_seconds: u64,
    /// Minimum dwell time between a deposit and a withdrawal.
    pub lockin_seconds: u64,
    /// Ledger timestamp at funding; 0 while unfunded.
    pub start_time: u64,
    /// `start_time + duration_seconds`; 0 while unfunded.
    pub end_time: u64,
    /// Reward budget, set exactly once.
    pub total_pool_rewards: i128,
    /// Rewards emitted per second across all stakers, scaled by `PRECISION`.
    pub reward_rate: i128,
    /// Sum of every participant's principal.
    pub total_staked: i128,
    /// Cumulative reward per staked unit since funding, scaled by `PRECISION`.
    pub reward_per_token_stored: i128,
    /// Timestamp of the last checkpoint, never past `min(now, end_time)`.
    pub last_update_time: u64,
    /// Rewards already transferred out to participants.
    pub total_rewards_paid: i128,
}

impl PoolState {
    pub fn new(duration_seconds: u64, lockin_seconds: u64) -> Self {
        PoolState {
            duration_seconds,
            lockin_seconds,
            start_time: 0,
            end_time: 0,
            total_pool_rewards: 0,
            reward_rate: 0,
            total_staked: 0,
            reward_per_token_stored: 0,
            last_update_time: 0,
            total_rewards_paid: 0,
        }
    }

    pub fn is_funded(&self) -> bool {
        self.total_pool_rewards != 0
    }

    /// Set the reward budget and start the emission clock at `now`.
    ///
    /// The clock starts regardless of whether anything is staked yet; any
    /// interval with zero stake emits to nobody.
    pub fn fund(&mut self, amount: i128, now: u64) -> Result<(), ContractError> {
        if self.is_funded() {
            return Err(ContractError::AlreadyFunded);
        }
        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }
        if amount > MAX_POOL_REWARDS {
            return Err(ContractError::RewardsTooLarge);
        }
        let end_time = now
            .checked_add(self.duration_seconds)
            .ok_or(ContractError::ArithmeticOverflow)?;

        self.reward_rate = reward_rate(amount, self.duration_seconds)?;
        self.total_pool_rewards = amount;
        self.start_time = now;
        self.end_time = end_time;
        self.last_update_time = now;
        Ok(())
    }

    /// Emission stops at `end_time`; time past it accrues nothing.
    pub fn applicable_time(&self, now: u64) -> u64 {
        now.min(self.end_time)
    }

    /// The accumulator value as of `now`, without writing it back.
    pub fn reward_per_token_at(&self, now: u64) -> Result<i128, ContractError> {
        let applicable = self.applicable_time(now);
        let elapsed = applicable.saturating_sub(self.last_update_time);
        compute_reward_per_token(
            self.reward_per_token_stored,
            self.reward_rate,
            elapsed,
            self.total_staked,
        )
    }

    /// Advance the accumulator to `now`.
    ///
    /// Must run before anything changes `total_staked`, so the elapsed
    /// interval is priced at the stake that was actually present.
    pub fn checkpoint(&mut self, now: u64) -> Result<(), ContractError> {
        self.reward_per_token_stored = self.reward_per_token_at(now)?;
        self.last_update_time = self.last_update_time.max(self.applicable_time(now));
        Ok(())
    }

    /// Credit `record` with everything accrued since its last snapshot.
    ///
    /// Returns the newly credited amount. Assumes [`Self::checkpoint`] has
    /// already run for the current instant.
    pub fn settle(&self, record: &mut StakeRecord) -> Result<i128, ContractError> {
        let fresh = pending(
            record.amount,
            self.reward_per_token_stored,
            record.reward_per_token_paid,
        )?;
        record.rewards_accrued = checked_add(record.rewards_accrued, fresh)?;
        record.reward_per_token_paid = self.reward_per_token_stored;
        Ok(fresh)
    }

    /// Claimable rewards for `record` as of `now`, leaving all state as is.
    pub fn earned(&self, record: &StakeRecord, now: u64) -> Result<i128, ContractError> {
        let current = self.reward_per_token_at(now)?;
        let fresh = pending(record.amount, current, record.reward_per_token_paid)?;
        checked_add(record.rewards_accrued, fresh)
    }
}

/// Per-second emission for a budget spread linearly over `duration_seconds`,
/// scaled by `PRECISION`.
pub fn reward_rate(total_rewards: i128, duration_seconds: u64) -> Result<i128, ContractError> {
    if duration_seconds == 0 {
        return Err(ContractError::InvalidInput);
    }
    mul_div(total_rewards, PRECISION, duration_seconds as i128)
}

/// One O(1) accumulation step:
///
/// ```text
/// Δrpt = reward_rate × elapsed / total_staked
/// new_rpt = stored_rpt + Δrpt
/// ```
///
/// `reward_rate` already carries the `PRECISION` factor. With nothing staked
/// the accumulator does not move and the interval's emission is forfeited.
pub fn compute_reward_per_token(
    stored: i128,
    reward_rate: i128,
    elapsed: u64,
    total_staked: i128,
) -> Result<i128, ContractError> {
    if total_staked <= 0 || elapsed == 0 {
        return Ok(stored);
    }

    let delta = mul_div(reward_rate, elapsed as i128, total_staked)?;
    checked_add(stored, delta)
}

/// Rewards for `staked` units across the accumulator movement since
/// `user_rpt_paid`, truncated.
pub fn pending(staked: i128, current_rpt: i128, user_rpt_paid: i128) -> Result<i128, ContractError> {
    let movement = checked_sub(current_rpt, user_rpt_paid)?;
    mul_div(staked, movement, PRECISION)
}
