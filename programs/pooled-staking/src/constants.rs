// =============================================================================
// Pooled Staking Constants
// =============================================================================

// PDA Seeds
pub const POOL_SEED: &[u8] = b"pool";
pub const VAULT_SEED: &[u8] = b"vault";
pub const ROLES_SEED: &[u8] = b"roles";
pub const STAKER_SEED: &[u8] = b"staker";

// Precision for the distribution rate (18 decimals)
// rate * stake / PRECISION is computed in u128, see math.rs
pub const REWARD_PRECISION: u128 = 1_000_000_000_000_000_000; // 10^18

// Role registry capacity
pub const MAX_DISTRIBUTORS: usize = 16;
