use anchor_lang::prelude::*;

use crate::error::PoolError;
use crate::math::{add_scaled, floor_sub_scaled, scaled_share};

/// Per-account staking position
/// PDA: ["staker", pool, owner]
#[account]
#[derive(Default, Debug)]
pub struct Staker {
    /// The pool this position belongs to
    pub pool: Pubkey,

    /// Owner of this staking position
    pub owner: Pubkey,

    /// Amount of tokens staked, zero means no active stake
    pub active_stake: u64,

    /// Discount reward - reward accrued before each deposit increment existed
    /// Each deposit adds distribution_rate * amount / PRECISION
    /// reward = floor(distribution_rate * active_stake / PRECISION - discount)
    /// This is the whole part of the exact sum, carries included, so it can
    /// exceed the sum of per-deposit floors by the carried fractions
    pub discount_reward: u128,

    /// Fractional part of the discount, scaled by PRECISION (always < PRECISION)
    pub discount_remainder: u64,

    /// Timestamp of first deposit of the current stake
    pub first_deposit_time: i64,

    /// Timestamp of last deposit
    pub last_deposit_time: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl Staker {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // pool
        32 + // owner
        8 +  // active_stake
        16 + // discount_reward (u128)
        8 +  // discount_remainder
        8 +  // first_deposit_time
        8 +  // last_deposit_time
        1 +  // bump
        32;  // padding for future fields

    /// Read the entry at `info`, None if this program has never written it
    pub fn load(info: &AccountInfo) -> Result<Option<Staker>> {
        if info.owner != &crate::ID || info.data_is_empty() {
            return Ok(None);
        }

        let data = info.try_borrow_data()?;
        Staker::try_deserialize(&mut &data[..]).map(Some)
    }

    /// Read an entry that holds stake
    /// A missing entry and a zeroed one are both `NoActiveStake`
    pub fn load_active(info: &AccountInfo) -> Result<Staker> {
        Staker::load(info)?
            .filter(Staker::has_active_stake)
            .ok_or_else(|| error!(PoolError::NoActiveStake))
    }

    /// Reward of the entry at `info`, zero if it does not exist
    pub fn reward_at(info: &AccountInfo, distribution_rate: u128) -> Result<u64> {
        match Staker::load(info)? {
            Some(staker) => staker.current_reward(distribution_rate),
            None => Ok(0),
        }
    }

    /// Write the entry back, discriminator included
    pub fn store(&self, info: &AccountInfo) -> Result<()> {
        let mut data = info.try_borrow_mut_data()?;
        let mut dst: &mut [u8] = &mut data[..];
        self.try_serialize(&mut dst)
    }

    pub fn has_active_stake(&self) -> bool {
        self.active_stake > 0
    }

    fn discount(&self) -> (u128, u64) {
        (self.discount_reward, self.discount_remainder)
    }

    /// Reward currently withdrawable at `distribution_rate`
    pub fn current_reward(&self, distribution_rate: u128) -> Result<u64> {
        if self.active_stake == 0 {
            return Ok(0);
        }

        let accrued = scaled_share(distribution_rate, self.active_stake)?;

        // Deposits only ever add discount at a rate no greater than the current
        // one, so this cannot go negative unless the ledger is corrupt
        let reward = floor_sub_scaled(accrued, self.discount())
            .ok_or(PoolError::RewardInvariantViolated)?;

        u64::try_from(reward).map_err(|_| error!(PoolError::MathOverflow))
    }

    /// Record a deposit
    /// The new stake is discounted at the current rate so it earns nothing retroactively
    pub fn record_deposit(
        &mut self,
        amount: u64,
        distribution_rate: u128,
        timestamp: i64,
    ) -> Result<()> {
        require!(amount > 0, PoolError::InvalidAmount);

        let active_stake = self
            .active_stake
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;
        let discount = scaled_share(distribution_rate, amount)?;
        let (whole, remainder) = add_scaled(self.discount(), discount)?;

        if self.active_stake == 0 {
            self.first_deposit_time = timestamp;
        }

        self.active_stake = active_stake;
        self.discount_reward = whole;
        self.discount_remainder = remainder;

        self.last_deposit_time = timestamp;

        Ok(())
    }

    /// Close out the position
    /// Returns (stake, reward) and leaves the entry zeroed
    pub fn settle_withdrawal(&mut self, distribution_rate: u128) -> Result<(u64, u64)> {
        require!(self.active_stake > 0, PoolError::NoActiveStake);

        let reward = self.current_reward(distribution_rate)?;
        let stake = self.active_stake;

        self.active_stake = 0;
        self.discount_reward = 0;
        self.discount_remainder = 0;
        self.first_deposit_time = 0;

        Ok((stake, reward))
    }
}
