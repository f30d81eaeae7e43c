use crate::ContractError;

/// Fixed-point scaling factor for the reward-per-token accumulator.
///
/// Reward-per-token values and the per-second reward rate are multiplied by
/// this constant before storage so sub-unit precision survives integer
/// division. 10^12 keeps 12 decimal places and bounds the reward budget at
/// `i128::MAX / PRECISION` (about 1.7 * 10^26 native units).
pub const PRECISION: i128 = 1_000_000_000_000;

/// `a * b / denom`, truncated toward zero.
///
/// All operands are expected to be non-negative. When the direct product
/// overflows `i128` the product is formed exactly in 256 bits and divided
/// back down, so this only fails when the quotient itself is out of range.
pub fn mul_div(a: i128, b: i128, denom: i128) -> Result<i128, ContractError> {
    if a < 0 || b < 0 || denom <= 0 {
        return Err(ContractError::InvalidInput);
    }

    if let Some(product) = a.checked_mul(b) {
        return Ok(product / denom);
    }

    let (hi, lo) = widening_mul(a as u128, b as u128);
    let quotient = div_wide(hi, lo, denom as u128).ok_or(ContractError::ArithmeticOverflow)?;
    i128::try_from(quotient).map_err(|_| ContractError::ArithmeticOverflow)
}

/// Full 256-bit product of two `u128`s as `(high, low)` limbs.
fn widening_mul(a: u128, b: u128) -> (u128, u128) {
    const MASK: u128 = u64::MAX as u128;
    let (a_hi, a_lo) = (a >> 64, a & MASK);
    let (b_hi, b_lo) = (b >> 64, b & MASK);

    let ll = a_lo * b_lo;
    let lh = a_lo * b_hi;
    let hl = a_hi * b_lo;
    let hh = a_hi * b_hi;

    // Below 3 * 2^64, so it cannot overflow.
    let mid = (ll >> 64) + (lh & MASK) + (hl & MASK);
    let lo = (ll & MASK) | (mid << 64);
    let hi = hh + (lh >> 64) + (hl >> 64) + (mid >> 64);
    (hi, lo)
}

/// `(hi * 2^128 + lo) / d` by shift-subtract long division.
///
/// `d` must be below 2^127 so the running remainder can shift left without
/// losing its top bit; every positive `i128` qualifies. Returns `None` when
/// the quotient does not fit in `u128`.
fn div_wide(hi: u128, lo: u128, d: u128) -> Option<u128> {
    if hi >= d {
        return None;
    }

    let mut rem = hi;
    let mut quo: u128 = 0;
    for bit in (0..128).rev() {
        rem = (rem << 1) | ((lo >> bit) & 1);
        quo <<= 1;
        if rem >= d {
            rem -= d;
            quo |= 1;
        }
    }
    Some(quo)
}

pub fn checked_add(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::ArithmeticOverflow)
}

pub fn checked_sub(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_sub(b).ok_or(ContractError::ArithmeticOverflow)
}
