use anchor_lang::prelude::*;

use crate::constants::{POOL_SEED, SCHEDULE_SEED};
use crate::state::VestingPool;
use crate::utils::accounts;

/// Unclaimed part of the caller's released amount as of now; zero if the
/// caller has no schedule.
pub fn get_claimable_handler(ctx: Context<ReadVestingQuote>) -> Result<u64> {
    let (_, claimable) = quote(&ctx)?;
    Ok(claimable)
}

/// Cumulative amount released to the caller as of now, claimed or not.
pub fn get_total_released_handler(ctx: Context<ReadVestingQuote>) -> Result<u64> {
    let (released, _) = quote(&ctx)?;
    Ok(released)
}

/// Emits a `VestingQuote` for the caller and returns (released, claimable).
fn quote(ctx: &Context<ReadVestingQuote>) -> Result<(u64, u64)> {
    let now = Clock::get()?.unix_timestamp;
    let launch_time = ctx.accounts.vesting_pool.launch_time;
    let schedule = accounts::load_schedule(&ctx.accounts.vesting_schedule.to_account_info())?
        .unwrap_or_default();

    let released = schedule.released_at(launch_time, now)?;
    let claimable = schedule.claimable_at(launch_time, now)?;
    emit!(VestingQuote {
        beneficiary: ctx.accounts.caller.key(),
        timestamp: now,
        released,
        claimed: schedule.claimed,
        claimable,
    });
    Ok((released, claimable))
}

#[derive(Accounts)]
pub struct ReadVestingQuote<'info> {
    #[account(
        seeds = [
            POOL_SEED,
            vesting_pool.admin.as_ref(),
            vesting_pool.mint.as_ref(),
            vesting_pool.pool_id.to_le_bytes().as_ref()
        ],
        bump = vesting_pool.bump
    )]
    pub vesting_pool: Account<'info, VestingPool>,

    /// CHECK: schedule PDA for (pool, caller); read-only, may be uninitialised.
    #[account(
        seeds = [SCHEDULE_SEED, vesting_pool.key().as_ref(), caller.key().as_ref()],
        bump
    )]
    pub vesting_schedule: UncheckedAccount<'info>,

    pub caller: Signer<'info>,
}

#[event]
pub struct VestingQuote {
    pub beneficiary: Pubkey,
    pub timestamp: i64,
    pub released: u64,
    pub claimed: u64,
    pub claimable: u64,
}
