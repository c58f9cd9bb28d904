pub mod initialize_pool;
pub mod add_vesting_schedule;
pub mod add_vesting_schedules;
pub mod claim;
pub mod vesting_quote;
pub mod get_vesting_schedule;
pub mod pool_info;

pub use initialize_pool::*;
pub use add_vesting_schedule::*;
pub use add_vesting_schedules::*;
pub use claim::*;
pub use vesting_quote::*;
pub use get_vesting_schedule::*;
pub use pool_info::*;
