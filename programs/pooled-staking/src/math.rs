use anchor_lang::prelude::*;

use crate::constants::REWARD_PRECISION;
use crate::error::PoolError;

/// Exact value of `rate * stake / PRECISION` as `(whole, remainder)`
/// where the value is `whole + remainder / PRECISION`
///
/// The product can exceed u128 even when the result fits, so the rate is
/// split as `q * PRECISION + r` with `r < PRECISION < 2^60`. `r * stake`
/// then stays below 2^124.
pub fn scaled_share(rate: u128, stake: u64) -> Result<(u128, u64)> {
    let stake = stake as u128;
    let q = rate / REWARD_PRECISION;
    let r = rate % REWARD_PRECISION;

    // r * stake < 2^124
    let partial = r * stake;

    let whole = q
        .checked_mul(stake)
        .ok_or(PoolError::MathOverflow)?
        .checked_add(partial / REWARD_PRECISION)
        .ok_or(PoolError::MathOverflow)?;
    let remainder = (partial % REWARD_PRECISION) as u64;

    Ok((whole, remainder))
}

/// Add two exact fixed-point values, carrying the remainder
pub fn add_scaled(a: (u128, u64), b: (u128, u64)) -> Result<(u128, u64)> {
    // both remainders < 10^18, the sum fits u128 easily
    let sum = a.1 as u128 + b.1 as u128;
    let carry = sum / REWARD_PRECISION;

    let whole = a
        .0
        .checked_add(b.0)
        .and_then(|w| w.checked_add(carry))
        .ok_or(PoolError::MathOverflow)?;

    Ok((whole, (sum % REWARD_PRECISION) as u64))
}

/// floor(a - b) for exact fixed-point values, None if b > a
pub fn floor_sub_scaled(a: (u128, u64), b: (u128, u64)) -> Option<u128> {
    let borrow = u128::from(a.1 < b.1);
    a.0.checked_sub(b.0)?.checked_sub(borrow)
}

/// Rate increase for distributing `amount` over `total_stake`
/// Formula: floor(amount * PRECISION / total_stake)
pub fn rate_increment(amount: u64, total_stake: u64) -> Result<u128> {
    let increment = (amount as u128)
        .checked_mul(REWARD_PRECISION)
        .ok_or(PoolError::MathOverflow)?
        .checked_div(total_stake as u128)
        .ok_or(PoolError::DivisionByZero)?;

    Ok(increment)
}
