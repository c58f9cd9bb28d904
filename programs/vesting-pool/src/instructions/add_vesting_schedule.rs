use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{POOL_SEED, SCHEDULE_SEED, VAULT_SEED};
use crate::error::VestingPoolError;
use crate::state::{VestingPool, VestingSchedule, VestingScheduleConfig};
use crate::utils::admission;

pub fn add_vesting_schedule_handler(
    ctx: Context<AddVestingSchedule>,
    config: VestingScheduleConfig,
) -> Result<()> {
    let pool = &ctx.accounts.vesting_pool;
    pool.authorize(&ctx.accounts.admin.key())?;

    let amount = admission::validate_config(&config, ctx.accounts.vesting_schedule.valid)?;
    let source = &ctx.accounts.admin_token_account;
    admission::check_funding_source(
        &source.mint,
        &source.owner,
        source.amount,
        &pool.mint,
        &ctx.accounts.admin.key(),
        amount,
    )?;

    let pool_key = pool.key();
    let schedule = &mut ctx.accounts.vesting_schedule;
    schedule.set_inner(VestingSchedule::from_config(
        pool_key,
        &config,
        ctx.bumps.vesting_schedule,
    ));
    ctx.accounts.vesting_pool.record_admission(1, amount)?;

    // Single pull sized to both tranches.
    if amount > 0 {
        token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.admin_token_account.to_account_info(),
                    to: ctx.accounts.vault.to_account_info(),
                    authority: ctx.accounts.admin.to_account_info(),
                },
            ),
            amount,
        )?;
    }
    ctx.accounts.vault.reload()?;
    ctx.accounts.vesting_pool.check_custody(ctx.accounts.vault.amount)?;

    msg!("vesting schedule added for {}: {} tokens", config.beneficiary, amount);

    emit!(VestingScheduleCreated {
        pool: pool_key,
        beneficiary: config.beneficiary,
        lockup_amount: config.lockup_amount,
        lockup_duration: config.lockup_duration,
        vesting_amount: config.vesting_amount,
        vesting_duration: config.vesting_duration,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(config: VestingScheduleConfig)]
pub struct AddVestingSchedule<'info> {
    #[account(
        mut,
        seeds = [
            POOL_SEED,
            vesting_pool.admin.as_ref(),
            vesting_pool.mint.as_ref(),
            vesting_pool.pool_id.to_le_bytes().as_ref()
        ],
        bump = vesting_pool.bump
    )]
    pub vesting_pool: Account<'info, VestingPool>,

    // init_if_needed so a repeat registration reaches the `valid` check and
    // fails with ScheduleAlreadyExists.
    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + VestingSchedule::SIZE,
        seeds = [SCHEDULE_SEED, vesting_pool.key().as_ref(), config.beneficiary.as_ref()],
        bump
    )]
    pub vesting_schedule: Account<'info, VestingSchedule>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vesting_pool.key().as_ref()],
        bump = vesting_pool.vault_bump,
        constraint = vault.mint == vesting_pool.mint @ VestingPoolError::InvalidTokenCollaborator,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct VestingScheduleCreated {
    pub pool: Pubkey,
    pub beneficiary: Pubkey,
    pub lockup_amount: u64,
    pub lockup_duration: u64,
    pub vesting_amount: u64,
    pub vesting_duration: u64,
}
