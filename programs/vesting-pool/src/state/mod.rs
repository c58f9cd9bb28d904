pub mod pool;
pub mod vesting_schedule;

pub use pool::*;
pub use vesting_schedule::*;
