use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{POOL_SEED, STAKER_SEED, VAULT_SEED};
use crate::error::PoolError;
use crate::events::Withdrawn;
use crate::state::{Pool, Staker};

/// Withdraw the whole stake plus accrued reward
///
/// # Arguments
/// * `ctx` - The context containing all accounts
///
/// # Flow
/// 1. Load the staker position, missing or empty is `NoActiveStake`
/// 2. Settle it (stake + reward, entry zeroed)
/// 3. Update pool totals
/// 4. Transfer payout from vault to user
///
/// The ledger is final before any token leaves the vault.
#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED, pool.stake_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: Ledger entry PDA, may never have been created
    /// Read and written back through `Staker::load_active` / `Staker::store`
    #[account(
        mut,
        seeds = [STAKER_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub staker: UncheckedAccount<'info>,

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

    pub token_program: Program<'info, Token>,
}

pub fn handler_withdraw(ctx: Context<Withdraw>) -> Result<()> {
    // A caller who never deposited has no entry at all
    let staker_info = ctx.accounts.staker.to_account_info();
    let mut staker = Staker::load_active(&staker_info)?;
    require!(
        staker.owner == ctx.accounts.user.key(),
        PoolError::InvalidAuthority
    );

    let pool = &mut ctx.accounts.pool;

    let (stake, reward) = staker.settle_withdrawal(pool.distribution_rate)?;
    pool.record_withdrawal(stake)?;
    staker.store(&staker_info)?;

    let payout = stake.checked_add(reward).ok_or(PoolError::MathOverflow)?;

    msg!(
        "Withdrawing {} (stake: {}, reward: {}). Pool total: {}",
        payout,
        stake,
        reward,
        pool.total_active_stake
    );

    // Transfer from vault back to user, pool PDA signs as authority
    let stake_mint_key = pool.stake_mint;
    let seeds = &[POOL_SEED, stake_mint_key.as_ref(), &[pool.bump]];
    let signer_seeds = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.user_token_account.to_account_info(),
                authority: ctx.accounts.pool.to_account_info(),
            },
            signer_seeds,
        ),
        payout,
    )?;

    emit!(Withdrawn {
        pool: ctx.accounts.pool.key(),
        account: ctx.accounts.user.key(),
        payout,
        reward,
    });

    Ok(())
}
