use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{POOL_SEED, ROLES_SEED, VAULT_SEED};
use crate::error::PoolError;
use crate::events::Distributed;
use crate::state::{Pool, RoleRegistry};

/// Distribute rewards over all active stake
///
/// Called by a holder of the distributor role. It transfers tokens from the
/// distributor to the vault and raises the distribution rate so every staker's
/// share grows pro-rata. No staker account is touched.
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of tokens to distribute
///
/// # Flow
/// 1. Check the distributor role and that the pool has stake
/// 2. Transfer tokens from distributor to vault
/// 3. Update pool's distribution_rate
///
#[derive(Accounts)]
pub struct Distribute<'info> {
    #[account(mut)]
    pub distributor: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED, pool.stake_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        seeds = [ROLES_SEED, pool.key().as_ref()],
        bump = role_registry.bump,
        constraint = role_registry.key() == pool.role_registry @ PoolError::InvalidRoleRegistry
    )]
    pub role_registry: Account<'info, RoleRegistry>,

    #[account(
        constraint = stake_mint.key() == pool.stake_mint @ PoolError::InvalidStakeMint
    )]
    pub stake_mint: Account<'info, Mint>,

    /// Source of rewards, must be owned by the distributor
    #[account(
        mut,
        token::mint = stake_mint,
        constraint = reward_source.owner == distributor.key() @ PoolError::InvalidTokenAccountOwner
    )]
    pub reward_source: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [VAULT_SEED, pool.key().as_ref()],
        bump = pool.vault_bump,
        constraint = vault.key() == pool.vault @ PoolError::InvalidVault
    )]
    pub vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_distribute(ctx: Context<Distribute>, amount: u64) -> Result<()> {
    ctx.accounts
        .role_registry
        .require_distributor(&ctx.accounts.distributor.key())?;
    require!(amount > 0, PoolError::InvalidAmount);
    // Rewards sent into an empty pool could never be claimed
    require!(
        ctx.accounts.pool.total_active_stake > 0,
        PoolError::NoActiveStakers
    );

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.reward_source.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.distributor.to_account_info(),
            },
        ),
        amount,
    )?;

    let pool_key = ctx.accounts.pool.key();
    let pool = &mut ctx.accounts.pool;
    pool.record_distribution(amount, Clock::get()?.unix_timestamp)?;

    msg!(
        "Distributed {}. Total distributed: {}, Stakers: {}, distribution_rate: {}",
        amount,
        pool.total_distributed,
        pool.staker_count,
        pool.distribution_rate
    );

    emit!(Distributed {
        pool: pool_key,
        distributor: ctx.accounts.distributor.key(),
        amount,
        distribution_rate: pool.distribution_rate,
    });

    Ok(())
}
