use anchor_lang::prelude::*;

use crate::error::VestingPoolError;

/// Vesting pool PDA: one token, one launch time, one administrator.
/// An administrator may run several pools of the same token, told apart by `pool_id`.
#[account]
pub struct VestingPool {
    /// Administrator allowed to register schedules.
    pub admin: Pubkey,
    /// Caller-chosen discriminator, part of the PDA seeds.
    pub pool_id: u64,
    /// Token mint held in custody.
    pub mint: Pubkey,
    /// Custody token account (PDA, authority = this pool).
    pub vault: Pubkey,
    /// Mint decimals, recorded for indexers.
    pub decimals: u8,
    /// Common epoch for every schedule (Unix seconds, UTC). Never mutated.
    pub launch_time: i64,
    /// Number of schedules admitted.
    pub schedule_count: u32,
    /// Sum of lockup + vesting amounts pulled into custody.
    pub total_committed: u64,
    /// Sum of amounts paid out to beneficiaries.
    pub total_claimed: u64,
    pub bump: u8,
    pub vault_bump: u8,
}

impl VestingPool {
    pub const SIZE: usize =
        32 + // admin
        8 +  // pool_id
        32 + // mint
        32 + // vault
        1 +  // decimals
        8 +  // launch_time
        4 +  // schedule_count
        8 +  // total_committed
        8 +  // total_claimed
        1 +  // bump
        1;   // vault_bump

    pub fn pool_id_seed(&self) -> [u8; 8] {
        self.pool_id.to_le_bytes()
    }

    /// Administrator capability check evaluated before every restricted call.
    pub fn authorize(&self, caller: &Pubkey) -> std::result::Result<(), VestingPoolError> {
        if *caller == self.admin {
            Ok(())
        } else {
            Err(VestingPoolError::NotAuthorized)
        }
    }

    /// Amount still owed to beneficiaries; must stay covered by the vault.
    pub fn outstanding(&self) -> std::result::Result<u64, VestingPoolError> {
        self.total_committed
            .checked_sub(self.total_claimed)
            .ok_or(VestingPoolError::MathOverflow)
    }

    /// Custody must cover everything still owed once an instruction settles.
    pub fn check_custody(&self, vault_amount: u64) -> std::result::Result<(), VestingPoolError> {
        if vault_amount < self.outstanding()? {
            return Err(VestingPoolError::CustodyShortfall);
        }
        Ok(())
    }

    pub fn record_admission(
        &mut self,
        count: u32,
        amount: u64,
    ) -> std::result::Result<(), VestingPoolError> {
        let schedule_count = self
            .schedule_count
            .checked_add(count)
            .ok_or(VestingPoolError::MathOverflow)?;
        let total_committed = self
            .total_committed
            .checked_add(amount)
            .ok_or(VestingPoolError::MathOverflow)?;
        self.schedule_count = schedule_count;
        self.total_committed = total_committed;
        Ok(())
    }

    pub fn record_release(&mut self, amount: u64) -> std::result::Result<(), VestingPoolError> {
        let total_claimed = self
            .total_claimed
            .checked_add(amount)
            .ok_or(VestingPoolError::MathOverflow)?;
        if total_claimed > self.total_committed {
            return Err(VestingPoolError::MathOverflow);
        }
        self.total_claimed = total_claimed;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::POOL_SEED;

    fn pool(admin: Pubkey) -> VestingPool {
        VestingPool {
            admin,
            pool_id: 0,
            mint: Pubkey::new_from_array([7; 32]),
            vault: Pubkey::new_from_array([8; 32]),
            decimals: 9,
            launch_time: 1_767_225_600,
            schedule_count: 0,
            total_committed: 0,
            total_claimed: 0,
            bump: 255,
            vault_bump: 254,
        }
    }

    #[test]
    fn only_admin_is_authorized() {
        let admin = Pubkey::new_from_array([1; 32]);
        let p = pool(admin);
        assert!(p.authorize(&admin).is_ok());
        assert!(matches!(
            p.authorize(&Pubkey::new_from_array([2; 32])),
            Err(VestingPoolError::NotAuthorized)
        ));
        assert!(matches!(
            p.authorize(&Pubkey::default()),
            Err(VestingPoolError::NotAuthorized)
        ));
    }

    #[test]
    fn custody_accounting_tracks_outstanding() {
        let mut p = pool(Pubkey::new_from_array([1; 32]));
        p.record_admission(2, 10_000).unwrap();
        p.record_release(1_500).unwrap();
        assert_eq!(p.schedule_count, 2);
        assert_eq!(p.outstanding().unwrap(), 8_500);

        // cannot pay out more than was committed
        assert!(matches!(p.record_release(8_501), Err(VestingPoolError::MathOverflow)));
        assert_eq!(p.total_claimed, 1_500);
    }

    #[test]
    fn custody_must_cover_outstanding() {
        let mut p = pool(Pubkey::new_from_array([1; 32]));
        p.record_admission(1, 10_000).unwrap();
        assert!(p.check_custody(10_000).is_ok());
        assert!(p.check_custody(12_000).is_ok());
        assert!(matches!(p.check_custody(9_999), Err(VestingPoolError::CustodyShortfall)));

        p.record_release(4_000).unwrap();
        assert!(p.check_custody(6_000).is_ok());
        assert!(matches!(p.check_custody(5_999), Err(VestingPoolError::CustodyShortfall)));
    }

    #[test]
    fn pools_of_one_admin_and_mint_get_distinct_addresses() {
        let admin = Pubkey::new_from_array([1; 32]);
        let mut first = pool(admin);
        let mut second = pool(admin);
        first.pool_id = 0;
        second.pool_id = 1;

        let derive = |p: &VestingPool| {
            Pubkey::find_program_address(
                &[POOL_SEED, p.admin.as_ref(), p.mint.as_ref(), &p.pool_id_seed()],
                &crate::ID,
            )
            .0
        };
        assert_ne!(first.pool_id_seed(), second.pool_id_seed());
        assert_ne!(derive(&first), derive(&second));
        assert_eq!(derive(&first), derive(&pool(admin)));
    }

    #[test]
    fn failed_admission_leaves_counters_untouched() {
        let mut p = pool(Pubkey::new_from_array([1; 32]));
        p.record_admission(1, u64::MAX).unwrap();
        assert!(matches!(p.record_admission(1, 1), Err(VestingPoolError::MathOverflow)));
        assert_eq!(p.schedule_count, 1);
        assert_eq!(p.total_committed, u64::MAX);
    }
}
