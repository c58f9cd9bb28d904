use anchor_lang::prelude::*;

use crate::constants::{POOL_SEED, SCHEDULE_SEED};
use crate::state::{VestingPool, VestingScheduleView};
use crate::utils::accounts;

pub fn get_vesting_schedule_handler(
    ctx: Context<GetVestingSchedule>,
    _beneficiary: Pubkey,
) -> Result<VestingScheduleView> {
    let view = accounts::load_schedule(&ctx.accounts.vesting_schedule.to_account_info())?
        .map(|schedule| schedule.view())
        .unwrap_or_default();
    Ok(view)
}

#[derive(Accounts)]
#[instruction(beneficiary: Pubkey)]
pub struct GetVestingSchedule<'info> {
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

    /// CHECK: schedule PDA for (pool, beneficiary); read-only, may be uninitialised.
    #[account(
        seeds = [SCHEDULE_SEED, vesting_pool.key().as_ref(), beneficiary.as_ref()],
        bump
    )]
    pub vesting_schedule: UncheckedAccount<'info>,
}
