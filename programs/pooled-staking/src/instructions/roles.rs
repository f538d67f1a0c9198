use anchor_lang::prelude::*;

use crate::constants::{POOL_SEED, ROLES_SEED};
use crate::error::PoolError;
use crate::events::{AdminTransferred, DistributorGranted, DistributorRevoked};
use crate::state::{Pool, RoleRegistry};

// =============================================================================
// Grant Distributor
// =============================================================================

#[derive(Accounts)]
pub struct GrantDistributor<'info> {
    #[account(
        constraint = role_registry.is_admin(&admin.key()) @ PoolError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        seeds = [POOL_SEED, pool.stake_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        seeds = [ROLES_SEED, pool.key().as_ref()],
        bump = role_registry.bump
    )]
    pub role_registry: Account<'info, RoleRegistry>,

    /// CHECK: Account receiving the role, validated to not be default
    pub member: UncheckedAccount<'info>,
}

pub fn grant_distributor(ctx: Context<GrantDistributor>) -> Result<()> {
    let member = ctx.accounts.member.key();
    ctx.accounts.role_registry.grant_distributor(member)?;

    msg!(
        "Distributor role granted to {} ({} distributors)",
        member,
        ctx.accounts.role_registry.distributors.len()
    );

    emit!(DistributorGranted {
        pool: ctx.accounts.pool.key(),
        member,
        admin: ctx.accounts.admin.key(),
    });

    Ok(())
}

// =============================================================================
// Revoke Distributor
// =============================================================================

#[derive(Accounts)]
pub struct RevokeDistributor<'info> {
    #[account(
        constraint = role_registry.is_admin(&admin.key()) @ PoolError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        seeds = [POOL_SEED, pool.stake_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        seeds = [ROLES_SEED, pool.key().as_ref()],
        bump = role_registry.bump
    )]
    pub role_registry: Account<'info, RoleRegistry>,

    /// CHECK: Account losing the role
    pub member: UncheckedAccount<'info>,
}

pub fn revoke_distributor(ctx: Context<RevokeDistributor>) -> Result<()> {
    let member = ctx.accounts.member.key();
    ctx.accounts.role_registry.revoke_distributor(&member)?;

    msg!("Distributor role revoked from {}", member);

    emit!(DistributorRevoked {
        pool: ctx.accounts.pool.key(),
        member,
        sender: ctx.accounts.admin.key(),
    });

    Ok(())
}

// =============================================================================
// Renounce Distributor
// =============================================================================

#[derive(Accounts)]
pub struct RenounceDistributor<'info> {
    pub distributor: Signer<'info>,

    #[account(
        seeds = [POOL_SEED, pool.stake_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        seeds = [ROLES_SEED, pool.key().as_ref()],
        bump = role_registry.bump
    )]
    pub role_registry: Account<'info, RoleRegistry>,
}

pub fn renounce_distributor(ctx: Context<RenounceDistributor>) -> Result<()> {
    let member = ctx.accounts.distributor.key();
    ctx.accounts.role_registry.revoke_distributor(&member)?;

    msg!("Distributor role renounced by {}", member);

    emit!(DistributorRevoked {
        pool: ctx.accounts.pool.key(),
        member,
        sender: member,
    });

    Ok(())
}

// =============================================================================
// Transfer Admin
// =============================================================================

#[derive(Accounts)]
pub struct TransferAdmin<'info> {
    #[account(
        constraint = role_registry.is_admin(&admin.key()) @ PoolError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        seeds = [POOL_SEED, pool.stake_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        seeds = [ROLES_SEED, pool.key().as_ref()],
        bump = role_registry.bump
    )]
    pub role_registry: Account<'info, RoleRegistry>,

    /// CHECK: New admin address, validated to not be default or the current admin
    pub new_admin: UncheckedAccount<'info>,
}

pub fn transfer_admin(ctx: Context<TransferAdmin>) -> Result<()> {
    let old_admin = ctx.accounts.role_registry.admin;
    let new_admin = ctx.accounts.new_admin.key();
    ctx.accounts.role_registry.transfer_admin(new_admin)?;

    msg!("Admin transferred from {} to {}", old_admin, new_admin);

    emit!(AdminTransferred {
        pool: ctx.accounts.pool.key(),
        old_admin,
        new_admin,
    });

    Ok(())
}
