pub mod pool;
pub mod role_registry;
pub mod staker;

pub use pool::*;
pub use role_registry::*;
pub use staker::*;
