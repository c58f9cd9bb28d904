use anchor_lang::prelude::*;

use crate::constants::{POOL_SEED, UNIT_VESTING_INTERVAL};
use crate::state::VestingPool;

pub fn get_king_token_address_handler(ctx: Context<PoolInfo>) -> Result<Pubkey> {
    Ok(ctx.accounts.vesting_pool.mint)
}

pub fn launch_time_handler(ctx: Context<PoolInfo>) -> Result<i64> {
    Ok(ctx.accounts.vesting_pool.launch_time)
}

pub fn unit_vesting_interval_handler(_ctx: Context<PoolInfo>) -> Result<u64> {
    Ok(UNIT_VESTING_INTERVAL)
}

#[derive(Accounts)]
pub struct PoolInfo<'info> {
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
}
