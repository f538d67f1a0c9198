use anchor_lang::prelude::*;

use crate::error::PoolError;
use crate::math::rate_increment;

/// Global pool state
/// PDA: ["pool", stake_mint]
#[account]
#[derive(Default)]
pub struct Pool {
    /// Token staked and distributed by this pool
    pub stake_mint: Pubkey,

    /// Vault holding all staked and distributed tokens
    /// PDA: ["vault", pool]
    pub vault: Pubkey,

    /// Role registry authorizing distributions
    /// PDA: ["roles", pool]
    pub role_registry: Pubkey,

    /// Sum of every staker's active stake
    pub total_active_stake: u64,

    /// Cumulative reward per unit of stake (scaled by REWARD_PRECISION)
    /// Only ever increases
    pub distribution_rate: u128,

    /// Total rewards distributed (lifetime)
    pub total_distributed: u64,

    /// Number of accounts with nonzero stake
    pub staker_count: u64,

    /// Last time rewards were distributed
    pub last_distribution_time: i64,

    /// PDA bump seed
    pub bump: u8,

    /// Vault bump seed
    pub vault_bump: u8,
}

impl Pool {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // stake_mint
        32 + // vault
        32 + // role_registry
        8 +  // total_active_stake
        16 + // distribution_rate (u128)
        8 +  // total_distributed
        8 +  // staker_count
        8 +  // last_distribution_time
        1 +  // bump
        1 +  // vault_bump
        64;  // padding for future fields

    /// Add a deposit to the pool totals
    /// `new_staker` is set when the depositor had no active stake before
    pub fn record_deposit(&mut self, amount: u64, new_staker: bool) -> Result<()> {
        require!(amount > 0, PoolError::InvalidAmount);

        self.total_active_stake = self
            .total_active_stake
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;

        if new_staker {
            self.staker_count = self
                .staker_count
                .checked_add(1)
                .ok_or(PoolError::MathOverflow)?;
        }

        Ok(())
    }

    /// Spread `amount` over all active stake
    /// Formula: distribution_rate += (amount * PRECISION) / total_active_stake
    ///
    /// Touches no staker entry, so the cost is independent of staker count.
    pub fn record_distribution(&mut self, amount: u64, timestamp: i64) -> Result<()> {
        require!(amount > 0, PoolError::InvalidAmount);
        require!(self.total_active_stake > 0, PoolError::NoActiveStakers);

        let increase = rate_increment(amount, self.total_active_stake)?;
        let distribution_rate = self
            .distribution_rate
            .checked_add(increase)
            .ok_or(PoolError::MathOverflow)?;
        let total_distributed = self
            .total_distributed
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;

        self.distribution_rate = distribution_rate;
        self.total_distributed = total_distributed;
        self.last_distribution_time = timestamp;

        Ok(())
    }

    /// Remove a fully withdrawn stake from the pool totals
    pub fn record_withdrawal(&mut self, stake: u64) -> Result<()> {
        self.total_active_stake = self
            .total_active_stake
            .checked_sub(stake)
            .ok_or(PoolError::MathUnderflow)?;

        self.staker_count = self
            .staker_count
            .checked_sub(1)
            .ok_or(PoolError::MathUnderflow)?;

        Ok(())
    }
}
