//! Registry admission checks. Everything here runs before the first write so a
//! rejected call leaves no schedule behind.

use std::collections::BTreeSet;

use anchor_lang::prelude::Pubkey;

use crate::constants::MAX_BATCH_SCHEDULES;
use crate::error::VestingPoolError;
use crate::state::VestingScheduleConfig;

/// Validates one config against the registry and returns the amount to pull
/// into custody (`lockup_amount + vesting_amount`).
pub fn validate_config(
    config: &VestingScheduleConfig,
    already_registered: bool,
) -> Result<u64, VestingPoolError> {
    if config.beneficiary == Pubkey::default() {
        return Err(VestingPoolError::InvalidBeneficiary);
    }
    if already_registered {
        return Err(VestingPoolError::ScheduleAlreadyExists);
    }
    config
        .lockup_amount
        .checked_add(config.vesting_amount)
        .ok_or(VestingPoolError::MathOverflow)
}

/// Rejects empty or oversized manifests; runs before any per-item work.
pub fn check_batch_size(len: usize) -> Result<(), VestingPoolError> {
    if len == 0 {
        return Err(VestingPoolError::EmptyBatch);
    }
    if len > MAX_BATCH_SCHEDULES {
        return Err(VestingPoolError::BatchTooLarge);
    }
    Ok(())
}

/// The administrator's token account must be of the pool mint, owned by the
/// administrator and hold at least `amount`.
pub fn check_funding_source(
    source_mint: &Pubkey,
    source_owner: &Pubkey,
    source_balance: u64,
    pool_mint: &Pubkey,
    admin: &Pubkey,
    amount: u64,
) -> Result<(), VestingPoolError> {
    if source_mint != pool_mint || source_owner != admin || source_balance < amount {
        return Err(VestingPoolError::TokenTransferFailed);
    }
    Ok(())
}

/// Validates a whole batch; `registered[i]` tells whether `configs[i]`'s
/// beneficiary already holds a valid schedule. Returns the aggregate amount.
pub fn validate_batch(
    configs: &[VestingScheduleConfig],
    registered: &[bool],
) -> Result<u64, VestingPoolError> {
    check_batch_size(configs.len())?;
    if registered.len() != configs.len() {
        return Err(VestingPoolError::InvalidScheduleAccount);
    }

    let mut seen = BTreeSet::new();
    let mut total: u64 = 0;
    for (config, already_registered) in configs.iter().zip(registered.iter()) {
        let amount = validate_config(config, *already_registered)?;
        // A beneficiary listed twice would be registered twice.
        if !seen.insert(config.beneficiary) {
            return Err(VestingPoolError::ScheduleAlreadyExists);
        }
        total = total
            .checked_add(amount)
            .ok_or(VestingPoolError::MathOverflow)?;
    }
    Ok(total)
}

/// BLAKE3 digest of an admitted manifest, in submission order.
pub fn manifest_digest(configs: &[VestingScheduleConfig]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    for config in configs {
        hasher.update(config.beneficiary.as_ref());
        hasher.update(&config.lockup_amount.to_le_bytes());
        hasher.update(&config.lockup_duration.to_le_bytes());
        hasher.update(&config.vesting_amount.to_le_bytes());
        hasher.update(&config.vesting_duration.to_le_bytes());
    }
    *hasher.finalize().as_bytes()
}
