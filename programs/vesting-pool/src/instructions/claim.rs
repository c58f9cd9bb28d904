use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{POOL_SEED, SCHEDULE_SEED, VAULT_SEED};
use crate::error::VestingPoolError;
use crate::state::VestingPool;
use crate::utils::accounts;

/// Pays the caller everything released to them and not yet claimed.
///
/// Ordering: the schedule's `claimed` and the pool's `total_claimed` are
/// advanced and both accounts' data rewritten before the token CPI. Whatever
/// the transfer hands control to sees a zero claimable balance.
pub fn claim_handler(ctx: Context<Claim>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let beneficiary = ctx.accounts.beneficiary.key();

    let schedule_info = ctx.accounts.vesting_schedule.to_account_info();
    let mut schedule = accounts::load_schedule(&schedule_info)?
        .ok_or(VestingPoolError::NoClaimableBalance)?;
    require_keys_eq!(schedule.beneficiary, beneficiary, VestingPoolError::NotAuthorized);
    require_keys_eq!(
        schedule.pool,
        ctx.accounts.vesting_pool.key(),
        VestingPoolError::InvalidScheduleAccount
    );

    // Signer seeds for the pool PDA (vault authority).
    let pool_info = ctx.accounts.vesting_pool.to_account_info();
    let admin = ctx.accounts.vesting_pool.admin;
    let mint = ctx.accounts.vesting_pool.mint;
    let pool_id = ctx.accounts.vesting_pool.pool_id_seed();
    let bump = [ctx.accounts.vesting_pool.bump];
    let signer_seeds: &[&[&[u8]]] =
        &[&[POOL_SEED, admin.as_ref(), mint.as_ref(), &pool_id, &bump]];

    let launch_time = ctx.accounts.vesting_pool.launch_time;
    let pool = &mut ctx.accounts.vesting_pool;
    let vault = &ctx.accounts.vault;
    let destination = &ctx.accounts.beneficiary_token_account;
    let token_program = &ctx.accounts.token_program;

    let amount = schedule.settle_claim(launch_time, now, |committed, amount| -> Result<()> {
        // effects
        pool.record_release(amount)?;
        pool.exit(&crate::ID)?;
        accounts::store_schedule(&schedule_info, committed)?;

        // interaction
        require!(vault.amount >= amount, VestingPoolError::TokenTransferFailed);
        token::transfer(
            CpiContext::new_with_signer(
                token_program.to_account_info(),
                Transfer {
                    from: vault.to_account_info(),
                    to: destination.to_account_info(),
                    authority: pool_info,
                },
                signer_seeds,
            ),
            amount,
        )
    })?;

    ctx.accounts.vault.reload()?;
    ctx.accounts.vesting_pool.check_custody(ctx.accounts.vault.amount)?;

    msg!("released {} to {}", amount, beneficiary);

    emit!(ERC20Released {
        token: mint,
        amount,
        beneficiary,
        claimed_total: schedule.claimed,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Claim<'info> {
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

    /// CHECK: schedule PDA for (pool, beneficiary); may be uninitialised, which
    /// reads as a zero schedule and fails with NoClaimableBalance.
    #[account(
        mut,
        seeds = [SCHEDULE_SEED, vesting_pool.key().as_ref(), beneficiary.key().as_ref()],
        bump
    )]
    pub vesting_schedule: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vesting_pool.key().as_ref()],
        bump = vesting_pool.vault_bump,
        constraint = vault.mint == vesting_pool.mint @ VestingPoolError::InvalidTokenCollaborator,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = beneficiary_token_account.mint == vesting_pool.mint @ VestingPoolError::TokenTransferFailed,
        constraint = beneficiary_token_account.owner == beneficiary.key() @ VestingPoolError::TokenTransferFailed,
    )]
    pub beneficiary_token_account: Account<'info, TokenAccount>,

    pub beneficiary: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Release notification. Indexers key on `token` and `amount`.
#[event]
pub struct ERC20Released {
    pub token: Pubkey,
    pub amount: u64,
    pub beneficiary: Pubkey,
    pub claimed_total: u64,
}
