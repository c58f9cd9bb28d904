#![allow(unexpected_cfgs)]

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

use anchor_lang::prelude::*;

pub use constants::*;
pub use error::*;
pub use instructions::*;
pub use state::*;

declare_id!("37gW75zdJGMDMZcmkbvUDwPhFMmxv3zS5tMpiKe1Vj4d");

#[program]
pub mod vesting_pool {
    use super::*;

    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        pool_id: u64,
        launch_time: i64,
    ) -> Result<()> {
        instructions::initialize_pool_handler(ctx, pool_id, launch_time)
    }

    pub fn add_vesting_schedule(
        ctx: Context<AddVestingSchedule>,
        config: VestingScheduleConfig,
    ) -> Result<()> {
        instructions::add_vesting_schedule_handler(ctx, config)
    }

    pub fn add_vesting_schedules<'info>(
        ctx: Context<'_, '_, 'info, 'info, AddVestingSchedules<'info>>,
        configs: Vec<VestingScheduleConfig>,
    ) -> Result<()> {
        instructions::add_vesting_schedules_handler(ctx, configs)
    }

    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        instructions::claim_handler(ctx)
    }

    pub fn get_claimable(ctx: Context<ReadVestingQuote>) -> Result<u64> {
        instructions::get_claimable_handler(ctx)
    }

    pub fn get_total_released(ctx: Context<ReadVestingQuote>) -> Result<u64> {
        instructions::get_total_released_handler(ctx)
    }

    pub fn get_vesting_schedule(
        ctx: Context<GetVestingSchedule>,
        beneficiary: Pubkey,
    ) -> Result<VestingScheduleView> {
        instructions::get_vesting_schedule_handler(ctx, beneficiary)
    }

    pub fn get_king_token_address(ctx: Context<PoolInfo>) -> Result<Pubkey> {
        instructions::get_king_token_address_handler(ctx)
    }

    pub fn launch_time(ctx: Context<PoolInfo>) -> Result<i64> {
        instructions::launch_time_handler(ctx)
    }

    pub fn unit_vesting_interval(ctx: Context<PoolInfo>) -> Result<u64> {
        instructions::unit_vesting_interval_handler(ctx)
    }
}
