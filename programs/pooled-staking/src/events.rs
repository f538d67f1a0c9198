use anchor_lang::prelude::*;

#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub stake_mint: Pubkey,
    pub admin: Pubkey,
}

#[event]
pub struct Deposited {
    pub pool: Pubkey,
    pub account: Pubkey,
    pub amount: u64,
}

#[event]
pub struct Distributed {
    pub pool: Pubkey,
    pub distributor: Pubkey,
    pub amount: u64,
    pub distribution_rate: u128,
}

/// `payout` is stake plus `reward`
#[event]
pub struct Withdrawn {
    pub pool: Pubkey,
    pub account: Pubkey,
    pub payout: u64,
    pub reward: u64,
}

#[event]
pub struct DistributorGranted {
    pub pool: Pubkey,
    pub member: Pubkey,
    pub admin: Pubkey,
}

#[event]
pub struct DistributorRevoked {
    pub pool: Pubkey,
    pub member: Pubkey,
    pub sender: Pubkey,
}

#[event]
pub struct AdminTransferred {
    pub pool: Pubkey,
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
}
