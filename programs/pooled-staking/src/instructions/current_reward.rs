use anchor_lang::prelude::*;

use crate::constants::{POOL_SEED, STAKER_SEED};
use crate::state::{Pool, Staker};

/// Read-only query of an account's withdrawable reward
///
/// The ledger entry may not exist yet, so it is taken unchecked and read only
/// when this program owns it. A missing entry is the same as a zeroed one.
#[derive(Accounts)]
pub struct CurrentReward<'info> {
    #[account(
        seeds = [POOL_SEED, pool.stake_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: Any address, only used to derive the staker PDA
    pub owner: UncheckedAccount<'info>,

    /// CHECK: Ledger entry PDA, deserialized by `Staker::reward_at` only if initialized
    #[account(
        seeds = [STAKER_SEED, pool.key().as_ref(), owner.key().as_ref()],
        bump
    )]
    pub staker: UncheckedAccount<'info>,
}

pub fn handler_current_reward(ctx: Context<CurrentReward>) -> Result<u64> {
    let info = ctx.accounts.staker.to_account_info();
    let reward = Staker::reward_at(&info, ctx.accounts.pool.distribution_rate)?;

    msg!(
        "Current reward for {}: {}",
        ctx.accounts.owner.key(),
        reward
    );

    Ok(reward)
}
