use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{POOL_SEED, ROLES_SEED, VAULT_SEED};
use crate::events::PoolInitialized;
use crate::state::{Pool, RoleRegistry};

/// Initialize a new pool
///
/// # Accounts
/// * `admin` - Receives the admin and distributor roles (signer, payer)
/// * `pool` - The pool PDA to create
/// * `role_registry` - The role registry PDA to create
/// * `stake_mint` - The token staked and distributed
/// * `vault` - The vault holding every token of the pool
///
#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = Pool::SIZE,
        seeds = [POOL_SEED, stake_mint.key().as_ref()],
        bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        init,
        payer = admin,
        space = 8 + RoleRegistry::INIT_SPACE,
        seeds = [ROLES_SEED, pool.key().as_ref()],
        bump
    )]
    pub role_registry: Account<'info, RoleRegistry>,

    pub stake_mint: Account<'info, Mint>,

    /// Vault holding stake and undistributed rewards
    #[account(
        init,
        payer = admin,
        seeds = [VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = stake_mint,
        token::authority = pool
    )]
    pub vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_initialize(ctx: Context<Initialize>) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let admin = ctx.accounts.admin.key();

    let pool = &mut ctx.accounts.pool;
    pool.stake_mint = ctx.accounts.stake_mint.key();
    pool.vault = ctx.accounts.vault.key();
    pool.role_registry = ctx.accounts.role_registry.key();
    pool.total_active_stake = 0;
    pool.distribution_rate = 0;
    pool.total_distributed = 0;
    pool.staker_count = 0;
    pool.last_distribution_time = 0;
    pool.bump = ctx.bumps.pool;
    pool.vault_bump = ctx.bumps.vault;

    // Deployer holds both roles
    let role_registry = &mut ctx.accounts.role_registry;
    role_registry.pool = pool_key;
    role_registry.admin = admin;
    role_registry.distributors = Vec::new();
    role_registry.bump = ctx.bumps.role_registry;
    role_registry.grant_distributor(admin)?;

    msg!(
        "Pool initialized: stake_mint={}, admin={}",
        pool.stake_mint,
        admin
    );

    emit!(PoolInitialized {
        pool: pool_key,
        stake_mint: pool.stake_mint,
        admin,
    });

    Ok(())
}
