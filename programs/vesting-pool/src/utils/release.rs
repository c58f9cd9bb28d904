//! Release formula for a single schedule, measured from the pool launch time.
//! - lockup tranche: released in full at `launch + lockup_duration` (inclusive)
//! - vesting start: lockup release time, pushed out by one `UNIT_VESTING_INTERVAL`
//!   when the schedule carries a non-zero lockup tranche
//! - vesting tranche: released in whole-interval steps, in full once
//!   `vesting_duration` has elapsed since vesting start
//!
//! Instants are widened to i128 so `launch + durations` can never overflow.

use crate::constants::UNIT_VESTING_INTERVAL;
use crate::error::VestingPoolError;

/// Amounts and offsets that drive the release curve of one schedule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReleaseTerms {
    pub lockup_amount: u64,
    pub lockup_duration: u64,
    pub vesting_amount: u64,
    pub vesting_duration: u64,
}

pub fn lockup_release_time(launch_time: i64, terms: &ReleaseTerms) -> i128 {
    launch_time as i128 + terms.lockup_duration as i128
}

pub fn vesting_start_time(launch_time: i64, terms: &ReleaseTerms) -> i128 {
    let grace = if terms.lockup_amount > 0 {
        UNIT_VESTING_INTERVAL
    } else {
        0
    };
    lockup_release_time(launch_time, terms) + grace as i128
}

pub fn lockup_released(launch_time: i64, terms: &ReleaseTerms, now: i64) -> u64 {
    if now as i128 >= lockup_release_time(launch_time, terms) {
        terms.lockup_amount
    } else {
        0
    }
}

/// Vesting tranche released as of `now`, truncated to whole unit intervals.
pub fn vesting_released(
    launch_time: i64,
    terms: &ReleaseTerms,
    now: i64,
) -> Result<u64, VestingPoolError> {
    let start = vesting_start_time(launch_time, terms);
    let now = now as i128;
    if now < start {
        return Ok(0);
    }

    // now >= start, so the difference is non-negative and fits in u128.
    let elapsed = (now - start) as u128;
    if elapsed >= terms.vesting_duration as u128 {
        return Ok(terms.vesting_amount);
    }

    // elapsed < vesting_duration, hence vesting_duration > 0 here.
    let unit = UNIT_VESTING_INTERVAL as u128;
    let elapsed_units = elapsed / unit * unit;
    let v = (terms.vesting_amount as u128)
        .checked_mul(elapsed_units)
        .ok_or(VestingPoolError::MathOverflow)?
        .checked_div(terms.vesting_duration as u128)
        .ok_or(VestingPoolError::MathOverflow)?;
    u64::try_from(v).map_err(|_| VestingPoolError::MathOverflow)
}

/// Cumulative amount released (lockup + vesting) as of `now`, before
/// subtracting anything already claimed.
pub fn total_released(
    launch_time: i64,
    terms: &ReleaseTerms,
    now: i64,
) -> Result<u64, VestingPoolError> {
    let vested = vesting_released(launch_time, terms, now)?;
    lockup_released(launch_time, terms, now)
        .checked_add(vested)
        .ok_or(VestingPoolError::MathOverflow)
}
