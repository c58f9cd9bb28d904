use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount};

use crate::constants::{POOL_SEED, VAULT_SEED};
use crate::error::VestingPoolError;
use crate::state::VestingPool;

pub fn initialize_pool_handler(
    ctx: Context<InitializePool>,
    pool_id: u64,
    launch_time: i64,
) -> Result<()> {
    // The token handle must be a live SPL Token mint.
    require_keys_eq!(
        *ctx.accounts.mint.to_account_info().owner,
        token::ID,
        VestingPoolError::InvalidTokenCollaborator
    );
    require!(
        ctx.accounts.mint.is_initialized,
        VestingPoolError::InvalidTokenCollaborator
    );
    require_keys_eq!(
        ctx.accounts.vault.mint,
        ctx.accounts.mint.key(),
        VestingPoolError::InvalidTokenCollaborator
    );

    let pool = &mut ctx.accounts.vesting_pool;
    pool.admin = ctx.accounts.admin.key();
    pool.pool_id = pool_id;
    pool.mint = ctx.accounts.mint.key();
    pool.vault = ctx.accounts.vault.key();
    pool.decimals = ctx.accounts.mint.decimals;
    pool.launch_time = launch_time;
    pool.schedule_count = 0;
    pool.total_committed = 0;
    pool.total_claimed = 0;
    pool.bump = ctx.bumps.vesting_pool;
    pool.vault_bump = ctx.bumps.vault;

    msg!(
        "vesting pool {} for mint {} launches at {}",
        pool_id,
        pool.mint,
        launch_time
    );

    emit!(PoolInitialized {
        pool: pool.key(),
        admin: pool.admin,
        pool_id,
        mint: pool.mint,
        vault: pool.vault,
        launch_time,
        decimals: pool.decimals,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct InitializePool<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + VestingPool::SIZE,
        seeds = [
            POOL_SEED,
            admin.key().as_ref(),
            mint.key().as_ref(),
            pool_id.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub vesting_pool: Account<'info, VestingPool>,

    #[account(
        init,
        payer = admin,
        token::mint = mint,
        token::authority = vesting_pool,
        seeds = [VAULT_SEED, vesting_pool.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub admin: Pubkey,
    pub pool_id: u64,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub launch_time: i64,
    pub decimals: u8,
}
