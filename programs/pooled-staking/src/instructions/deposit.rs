use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{POOL_SEED, STAKER_SEED, VAULT_SEED};
use crate::error::PoolError;
use crate::events::Deposited;
use crate::state::{Pool, Staker};

/// Deposit tokens into the pool
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of tokens to stake
///
/// # Flow
/// 1. Validate amount
/// 2. Transfer tokens from user to vault
/// 3. Update staker position (with discount at the current rate)
/// 4. Update pool totals
///
#[derive(Accounts)]
pub struct Deposit<'info> {
    /// User depositing their tokens
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED, pool.stake_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// User's ledger entry (created on first deposit)
    #[account(
        init_if_needed,
        payer = user,
        space = Staker::SIZE,
        seeds = [STAKER_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub staker: Account<'info, Staker>,

    #[account(
        constraint = stake_mint.key() == pool.stake_mint @ PoolError::InvalidStakeMint
    )]
    pub stake_mint: Account<'info, Mint>,

    #[account(
        mut,
        token::mint = stake_mint,
        constraint = user_token_account.owner == user.key() @ PoolError::InvalidTokenAccountOwner
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [VAULT_SEED, pool.key().as_ref()],
        bump = pool.vault_bump,
        constraint = vault.key() == pool.vault @ PoolError::InvalidVault
    )]
    pub vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    require!(amount > 0, PoolError::InvalidAmount);

    let pool_key = ctx.accounts.pool.key();
    let user_key = ctx.accounts.user.key();

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        amount,
    )?;

    let pool = &mut ctx.accounts.pool;
    let staker = &mut ctx.accounts.staker;

    // Fresh or fully withdrawn entries get their identity (re)bound
    let new_staker = !staker.has_active_stake();
    if new_staker {
        staker.pool = pool_key;
        staker.owner = user_key;
        staker.bump = ctx.bumps.staker;
    }

    staker.record_deposit(amount, pool.distribution_rate, Clock::get()?.unix_timestamp)?;
    pool.record_deposit(amount, new_staker)?;

    msg!(
        "Deposited {}. User stake: {}, Pool total: {}",
        amount,
        staker.active_stake,
        pool.total_active_stake
    );

    emit!(Deposited {
        pool: pool_key,
        account: user_key,
        amount,
    });

    Ok(())
}
