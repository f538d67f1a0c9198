use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;

#[cfg(test)]
mod scenarios;

use instructions::*;

declare_id!("H4vmtGCT2E99gjAnBPLNGYVyf7auZD5dGLdKh6EtnKHD");

#[program]
pub mod pooled_staking {
    use super::*;

    /// Initialize a new pool for a stake mint
    ///
    /// The caller becomes admin and is granted the distributor role.
    ///
    /// # Accounts
    /// * `admin` - Pool admin (signer, payer)
    /// * `pool` - Pool PDA to create
    /// * `role_registry` - Role registry PDA to create
    /// * `stake_mint` - Token staked and distributed
    /// * `vault` - Vault to hold the pool's tokens
    ///
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler_initialize(ctx)
    }

    /// Deposit tokens into the pool
    ///
    /// Repeated deposits accumulate into one stake. New stake does not earn
    /// rewards distributed before it arrived.
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of tokens to stake
    ///
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handler_deposit(ctx, amount)
    }

    /// Distribute rewards pro-rata over all active stake (distributor only)
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of tokens to distribute
    ///
    pub fn distribute(ctx: Context<Distribute>, amount: u64) -> Result<()> {
        instructions::distribute::handler_distribute(ctx, amount)
    }

    /// Withdraw the whole stake plus accrued reward
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    ///
    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        instructions::withdraw::handler_withdraw(ctx)
    }

    /// Reward currently withdrawable by `owner` (read-only)
    ///
    /// Returns 0 for accounts without active stake.
    pub fn current_reward(ctx: Context<CurrentReward>) -> Result<u64> {
        instructions::current_reward::handler_current_reward(ctx)
    }

    /// Grant the distributor role (admin only)
    pub fn grant_distributor(ctx: Context<GrantDistributor>) -> Result<()> {
        instructions::roles::grant_distributor(ctx)
    }

    /// Revoke the distributor role (admin only)
    pub fn revoke_distributor(ctx: Context<RevokeDistributor>) -> Result<()> {
        instructions::roles::revoke_distributor(ctx)
    }

    /// Give up the caller's own distributor role
    pub fn renounce_distributor(ctx: Context<RenounceDistributor>) -> Result<()> {
        instructions::roles::renounce_distributor(ctx)
    }

    /// Transfer admin rights to a new address (admin only)
    pub fn transfer_admin(ctx: Context<TransferAdmin>) -> Result<()> {
        instructions::roles::transfer_admin(ctx)
    }
}
