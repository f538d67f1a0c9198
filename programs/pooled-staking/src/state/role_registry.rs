use anchor_lang::prelude::*;

use crate::constants::MAX_DISTRIBUTORS;
use crate::error::PoolError;

/// Capabilities for a pool, kept apart from the accounting state
/// PDA: ["roles", pool]
#[account]
#[derive(Default, InitSpace)]
pub struct RoleRegistry {
    /// The pool these roles apply to
    pub pool: Pubkey,

    /// Holder of the administrative capability
    /// Can grant and revoke the distributor role
    pub admin: Pubkey,

    /// Holders of the distributor capability
    #[max_len(MAX_DISTRIBUTORS)]
    pub distributors: Vec<Pubkey>,

    /// PDA bump seed
    pub bump: u8,
}

impl RoleRegistry {
    pub fn is_admin(&self, key: &Pubkey) -> bool {
        self.admin == *key
    }

    pub fn is_distributor(&self, key: &Pubkey) -> bool {
        self.distributors.contains(key)
    }

    /// Gate for `distribute`
    pub fn require_distributor(&self, key: &Pubkey) -> Result<()> {
        require!(self.is_distributor(key), PoolError::Unauthorized);
        Ok(())
    }

    pub fn grant_distributor(&mut self, member: Pubkey) -> Result<()> {
        require!(member != Pubkey::default(), PoolError::InvalidAuthority);
        require!(!self.is_distributor(&member), PoolError::AlreadyDistributor);
        require!(
            self.distributors.len() < MAX_DISTRIBUTORS,
            PoolError::RegistryFull
        );

        self.distributors.push(member);
        Ok(())
    }

    pub fn revoke_distributor(&mut self, member: &Pubkey) -> Result<()> {
        let index = self
            .distributors
            .iter()
            .position(|d| d == member)
            .ok_or(PoolError::NotDistributor)?;

        self.distributors.swap_remove(index);
        Ok(())
    }

    pub fn transfer_admin(&mut self, new_admin: Pubkey) -> Result<()> {
        require!(new_admin != Pubkey::default(), PoolError::InvalidAuthority);
        require!(new_admin != self.admin, PoolError::InvalidAuthority);

        self.admin = new_admin;
        Ok(())
    }
}
