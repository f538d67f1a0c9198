// =============================================================================
// Instructions Module - Pooled Staking
// =============================================================================

pub mod current_reward;
pub mod deposit;
pub mod distribute;
pub mod initialize;
pub mod roles;
pub mod withdraw;

pub use current_reward::*;
pub use deposit::*;
pub use distribute::*;
pub use initialize::*;
pub use roles::*;
pub use withdraw::*;
