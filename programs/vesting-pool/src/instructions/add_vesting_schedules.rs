use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{POOL_SEED, SCHEDULE_SEED, VAULT_SEED};
use crate::error::VestingPoolError;
use crate::instructions::add_vesting_schedule::VestingScheduleCreated;
use crate::state::{VestingPool, VestingSchedule, VestingScheduleConfig};
use crate::utils::{accounts, admission};

/// Admits a manifest of schedules atomically. Schedule PDAs are passed as
/// remaining accounts, one per config and in the same order.
pub fn add_vesting_schedules_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, AddVestingSchedules<'info>>,
    configs: Vec<VestingScheduleConfig>,
) -> Result<()> {
    let pool_key = ctx.accounts.vesting_pool.key();
    ctx.accounts.vesting_pool.authorize(&ctx.accounts.admin.key())?;
    admission::check_batch_size(configs.len())?;
    require!(
        ctx.remaining_accounts.len() == configs.len(),
        VestingPoolError::InvalidScheduleAccount
    );

    // Resolve every schedule PDA and its current existence before writing anything.
    let mut bumps = Vec::with_capacity(configs.len());
    let mut registered = Vec::with_capacity(configs.len());
    for (config, info) in configs.iter().zip(ctx.remaining_accounts.iter()) {
        let (expected, bump) = Pubkey::find_program_address(
            &[SCHEDULE_SEED, pool_key.as_ref(), config.beneficiary.as_ref()],
            ctx.program_id,
        );
        require_keys_eq!(info.key(), expected, VestingPoolError::InvalidScheduleAccount);
        require!(info.is_writable, VestingPoolError::InvalidScheduleAccount);

        let existing = accounts::load_schedule(info)?;
        registered.push(existing.map_or(false, |s| s.valid));
        bumps.push(bump);
    }

    let total = admission::validate_batch(&configs, &registered)?;
    let source = &ctx.accounts.admin_token_account;
    admission::check_funding_source(
        &source.mint,
        &source.owner,
        source.amount,
        &ctx.accounts.vesting_pool.mint,
        &ctx.accounts.admin.key(),
        total,
    )?;

    let payer = ctx.accounts.admin.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();
    for ((config, info), bump) in configs
        .iter()
        .zip(ctx.remaining_accounts.iter())
        .zip(bumps.into_iter())
    {
        let bump_seed = [bump];
        let seeds: &[&[u8]] = &[
            SCHEDULE_SEED,
            pool_key.as_ref(),
            config.beneficiary.as_ref(),
            &bump_seed,
        ];
        accounts::create_schedule_account(info, &payer, &system_program, seeds)?;
        accounts::store_schedule(info, &VestingSchedule::from_config(pool_key, config, bump))?;

        emit!(VestingScheduleCreated {
            pool: pool_key,
            beneficiary: config.beneficiary,
            lockup_amount: config.lockup_amount,
            lockup_duration: config.lockup_duration,
            vesting_amount: config.vesting_amount,
            vesting_duration: config.vesting_duration,
        });
    }

    let count = u32::try_from(configs.len()).map_err(|_| VestingPoolError::MathOverflow)?;
    ctx.accounts.vesting_pool.record_admission(count, total)?;

    // One pull for the aggregate of the whole manifest.
    if total > 0 {
        token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.admin_token_account.to_account_info(),
                    to: ctx.accounts.vault.to_account_info(),
                    authority: ctx.accounts.admin.to_account_info(),
                },
            ),
            total,
        )?;
    }
    ctx.accounts.vault.reload()?;
    ctx.accounts.vesting_pool.check_custody(ctx.accounts.vault.amount)?;

    msg!("{} vesting schedules added: {} tokens", count, total);

    emit!(VestingSchedulesAdded {
        pool: pool_key,
        count,
        total_amount: total,
        manifest_digest: admission::manifest_digest(&configs),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct AddVestingSchedules<'info> {
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
pub struct VestingSchedulesAdded {
    pub pool: Pubkey,
    pub count: u32,
    pub total_amount: u64,
    pub manifest_digest: [u8; 32],
}
