//! Program-wide constants.

/// Quantization step for linear vesting release (30 days).
pub const UNIT_VESTING_INTERVAL: u64 = 30 * SECONDS_PER_DAY;

/// Seconds per day (UTC).
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Max schedules admitted by a single `add_vesting_schedules` call.
pub const MAX_BATCH_SCHEDULES: usize = 10;

pub const POOL_SEED: &[u8] = b"vesting_pool";
pub const VAULT_SEED: &[u8] = b"vault";
pub const SCHEDULE_SEED: &[u8] = b"vesting_schedule";
