use anchor_lang::prelude::*;

#[error_code]
pub enum PoolError {
    // Amount Errors (6000-6009)
    #[msg("Invalid amount: must be greater than zero")]
    InvalidAmount,

    #[msg("No active stakers to distribute")]
    NoActiveStakers,

    #[msg("No active stake to withdraw")]
    NoActiveStake,

    // Authorization Errors (6010-6019)
    #[msg("Unauthorized: missing required role")]
    Unauthorized,

    #[msg("Invalid authority")]
    InvalidAuthority,

    #[msg("Account already holds the distributor role")]
    AlreadyDistributor,

    #[msg("Account does not hold the distributor role")]
    NotDistributor,

    #[msg("Role registry is full")]
    RegistryFull,

    // Math Errors (6020-6029)
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Division by zero")]
    DivisionByZero,

    #[msg("Reward invariant violated: discount exceeds accrued reward")]
    RewardInvariantViolated,

    // Account Validation Errors (6030-6039)
    #[msg("Invalid stake mint")]
    InvalidStakeMint,

    #[msg("Invalid vault")]
    InvalidVault,

    #[msg("Invalid role registry")]
    InvalidRoleRegistry,

    #[msg("Invalid token account owner")]
    InvalidTokenAccountOwner,
}
