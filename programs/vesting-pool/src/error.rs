use anchor_lang::prelude::*;

/// Reason codes surfaced by every rejected vesting-pool call.
#[error_code]
pub enum VestingPoolError {
    #[msg("Not authorized: administrator signature required")]
    NotAuthorized,

    #[msg("Beneficiary is zero address")]
    InvalidBeneficiary,

    #[msg("Vesting schedule already exists")]
    ScheduleAlreadyExists,

    #[msg("No claimable balance")]
    NoClaimableBalance,

    #[msg("Token transfer failed: source account, balance or allowance insufficient")]
    TokenTransferFailed,

    #[msg("Invalid token collaborator (SPL Token mint required)")]
    InvalidTokenCollaborator,

    #[msg("Schedule account does not match the expected address")]
    InvalidScheduleAccount,

    #[msg("Empty batch")]
    EmptyBatch,

    #[msg("Batch size too large")]
    BatchTooLarge,

    #[msg("Vault balance does not cover outstanding schedules")]
    CustodyShortfall,

    #[msg("Math overflow")]
    MathOverflow,
}
