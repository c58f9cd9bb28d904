use anchor_lang::prelude::*;

use crate::error::VestingPoolError;
use crate::utils::release::{self, ReleaseTerms};

/// Per-beneficiary schedule PDA. Immutable after admission except `claimed`.
#[account]
#[derive(Default, Debug)]
pub struct VestingSchedule {
    /// Owning pool.
    pub pool: Pubkey,
    pub beneficiary: Pubkey,
    /// Released in full once `lockup_duration` has elapsed since launch.
    pub lockup_amount: u64,
    pub lockup_duration: u64,
    /// Released linearly, in whole unit intervals, over `vesting_duration`.
    pub vesting_amount: u64,
    pub vesting_duration: u64,
    /// Cumulative amount paid out.
    pub claimed: u64,
    /// Existence flag; set once at admission, never cleared.
    pub valid: bool,
    pub bump: u8,
}

impl VestingSchedule {
    pub const SIZE: usize =
        32 + // pool
        32 + // beneficiary
        8 +  // lockup_amount
        8 +  // lockup_duration
        8 +  // vesting_amount
        8 +  // vesting_duration
        8 +  // claimed
        1 +  // valid
        1;   // bump

    pub fn from_config(pool: Pubkey, config: &VestingScheduleConfig, bump: u8) -> Self {
        Self {
            pool,
            beneficiary: config.beneficiary,
            lockup_amount: config.lockup_amount,
            lockup_duration: config.lockup_duration,
            vesting_amount: config.vesting_amount,
            vesting_duration: config.vesting_duration,
            claimed: 0,
            valid: true,
            bump,
        }
    }

    pub fn terms(&self) -> ReleaseTerms {
        ReleaseTerms {
            lockup_amount: self.lockup_amount,
            lockup_duration: self.lockup_duration,
            vesting_amount: self.vesting_amount,
            vesting_duration: self.vesting_duration,
        }
    }

    pub fn total_amount(&self) -> std::result::Result<u64, VestingPoolError> {
        self.lockup_amount
            .checked_add(self.vesting_amount)
            .ok_or(VestingPoolError::MathOverflow)
    }

    /// Cumulative release as of `now`; zero for an invalid record.
    pub fn released_at(
        &self,
        launch_time: i64,
        now: i64,
    ) -> std::result::Result<u64, VestingPoolError> {
        if !self.valid {
            return Ok(0);
        }
        release::total_released(launch_time, &self.terms(), now)
    }

    pub fn claimable_at(
        &self,
        launch_time: i64,
        now: i64,
    ) -> std::result::Result<u64, VestingPoolError> {
        self.released_at(launch_time, now)?
            .checked_sub(self.claimed)
            .ok_or(VestingPoolError::MathOverflow)
    }

    /// Settles a claim as of `now`.
    ///
    /// `claimed` is advanced before `transfer` runs, so anything `transfer`
    /// hands control to (including a nested claim on this same schedule)
    /// observes the settled state and sees a zero claimable balance. If
    /// `transfer` fails, `claimed` is restored and the error is returned.
    pub fn settle_claim<E, F>(
        &mut self,
        launch_time: i64,
        now: i64,
        transfer: F,
    ) -> std::result::Result<u64, E>
    where
        E: From<VestingPoolError>,
        F: FnOnce(&mut Self, u64) -> std::result::Result<(), E>,
    {
        let amount = self.claimable_at(launch_time, now)?;
        if amount == 0 {
            return Err(VestingPoolError::NoClaimableBalance.into());
        }

        let before = self.claimed;
        self.claimed = before
            .checked_add(amount)
            .ok_or(VestingPoolError::MathOverflow)?;

        if let Err(err) = transfer(self, amount) {
            self.claimed = before;
            return Err(err);
        }
        Ok(amount)
    }

    pub fn view(&self) -> VestingScheduleView {
        VestingScheduleView {
            beneficiary: self.beneficiary,
            lockup_amount: self.lockup_amount,
            lockup_duration: self.lockup_duration,
            vesting_amount: self.vesting_amount,
            vesting_duration: self.vesting_duration,
            claimed: self.claimed,
            valid: self.valid,
        }
    }
}

/// Instruction input for schedule admission.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct VestingScheduleConfig {
    pub beneficiary: Pubkey,
    pub lockup_amount: u64,
    pub lockup_duration: u64,
    pub vesting_amount: u64,
    pub vesting_duration: u64,
}

/// Read model returned by `get_vesting_schedule`; zero-valued when absent.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VestingScheduleView {
    pub beneficiary: Pubkey,
    pub lockup_amount: u64,
    pub lockup_duration: u64,
    pub vesting_amount: u64,
    pub vesting_duration: u64,
    pub claimed: u64,
    pub valid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::UNIT_VESTING_INTERVAL;

    const LAUNCH: i64 = 1_767_225_600;
    const UNIT: i64 = UNIT_VESTING_INTERVAL as i64;

    fn schedule(lockup: u64, lockup_duration: u64, vesting: u64, vesting_duration: u64) -> VestingSchedule {
        let config = VestingScheduleConfig {
            beneficiary: Pubkey::new_from_array([3; 32]),
            lockup_amount: lockup,
            lockup_duration,
            vesting_amount: vesting,
            vesting_duration,
        };
        VestingSchedule::from_config(Pubkey::new_from_array([9; 32]), &config, 254)
    }

    fn settle(s: &mut VestingSchedule, now: i64, paid: &mut Vec<u64>) -> std::result::Result<u64, VestingPoolError> {
        s.settle_claim(LAUNCH, now, |_, amount| {
            paid.push(amount);
            Ok(())
        })
    }

    #[test]
    fn admitted_schedule_starts_unclaimed() {
        let s = schedule(1_000, 0, 9_000, 18 * UNIT_VESTING_INTERVAL);
        assert!(s.valid);
        assert_eq!(s.claimed, 0);
        assert_eq!(s.total_amount().unwrap(), 10_000);
        assert_eq!(s.claimable_at(LAUNCH, LAUNCH).unwrap(), 1_000);
    }

    #[test]
    fn missing_schedule_reads_as_zero() {
        let s = VestingSchedule::default();
        assert!(!s.valid);
        assert_eq!(s.released_at(LAUNCH, LAUNCH + 100 * UNIT).unwrap(), 0);
        assert_eq!(s.claimable_at(LAUNCH, LAUNCH + 100 * UNIT).unwrap(), 0);
        assert_eq!(s.view(), VestingScheduleView::default());
    }

    #[test]
    fn claim_with_nothing_released_fails_without_mutation() {
        let mut s = schedule(0, 30 * 86_400, 1, 30 * 86_400);
        let mut paid = Vec::new();
        let res = settle(&mut s, LAUNCH + 2 * 86_400, &mut paid);
        assert!(matches!(res, Err(VestingPoolError::NoClaimableBalance)));
        assert_eq!(s.claimed, 0);
        assert!(paid.is_empty());

        let mut missing = VestingSchedule::default();
        let res = settle(&mut missing, LAUNCH + 100 * UNIT, &mut paid);
        assert!(matches!(res, Err(VestingPoolError::NoClaimableBalance)));
    }

    #[test]
    fn claim_advances_claimed_by_claimable() {
        let mut s = schedule(0, 0, 2, 60 * 86_400);
        let mut paid = Vec::new();
        let now = LAUNCH + UNIT;
        let claimable = s.claimable_at(LAUNCH, now).unwrap();
        assert_eq!(settle(&mut s, now, &mut paid).unwrap(), claimable);
        assert_eq!(s.claimed, 1);
        assert_eq!(paid, vec![1]);
        assert_eq!(s.claimable_at(LAUNCH, now).unwrap(), 0);

        // second claim in the same interval has nothing left
        assert!(matches!(
            settle(&mut s, now + 10, &mut paid),
            Err(VestingPoolError::NoClaimableBalance)
        ));
        assert_eq!(s.claimed, 1);
    }

    #[test]
    fn split_claims_sum_to_single_claim() {
        let t1 = LAUNCH + 3 * UNIT + 17;
        let t2 = LAUNCH + 11 * UNIT + 5;

        let mut split = schedule(1_000, 0, 9_000, 18 * UNIT_VESTING_INTERVAL);
        let mut paid = Vec::new();
        settle(&mut split, t1, &mut paid).unwrap();
        settle(&mut split, t2, &mut paid).unwrap();

        let mut single = schedule(1_000, 0, 9_000, 18 * UNIT_VESTING_INTERVAL);
        let mut paid_once = Vec::new();
        settle(&mut single, t2, &mut paid_once).unwrap();

        let total: u64 = paid.iter().sum();
        assert_eq!(total, single.released_at(LAUNCH, t2).unwrap());
        assert_eq!(total, paid_once[0]);
        assert_eq!(split.claimed, single.claimed);
    }

    #[test]
    fn reentrant_claim_sees_settled_state() {
        let mut s = schedule(1_000, 0, 9_000, 18 * UNIT_VESTING_INTERVAL);
        let now = LAUNCH + 2 * UNIT;
        let mut payouts = Vec::new();
        let mut nested = None;

        let amount = s
            .settle_claim::<VestingPoolError, _>(LAUNCH, now, |committed, amount| {
                // receiver code runs here and calls claim again
                nested = Some(committed.settle_claim::<VestingPoolError, _>(LAUNCH, now, |_, inner| {
                    payouts.push(inner);
                    Ok(())
                }));
                payouts.push(amount);
                Ok(())
            })
            .unwrap();

        assert_eq!(amount, 1_500);
        assert!(matches!(nested, Some(Err(VestingPoolError::NoClaimableBalance))));
        assert_eq!(payouts, vec![1_500]);
        assert_eq!(s.claimed, 1_500);
    }

    #[test]
    fn failed_transfer_restores_claimed() {
        let mut s = schedule(1_000, 0, 9_000, 18 * UNIT_VESTING_INTERVAL);
        let res = s.settle_claim(LAUNCH, LAUNCH, |_, _| Err(VestingPoolError::TokenTransferFailed));
        assert!(matches!(res, Err(VestingPoolError::TokenTransferFailed)));
        assert_eq!(s.claimed, 0);
        assert_eq!(s.claimable_at(LAUNCH, LAUNCH).unwrap(), 1_000);
    }

    #[test]
    fn schedule_is_terminal_once_everything_is_claimed() {
        let mut s = schedule(20_000, 12 * UNIT_VESTING_INTERVAL, 80_000, 18 * UNIT_VESTING_INTERVAL);
        let mut paid = Vec::new();
        let mut now = LAUNCH;
        while now <= LAUNCH + 40 * UNIT {
            let before = s.claimed;
            match settle(&mut s, now, &mut paid) {
                Ok(amount) => assert_eq!(s.claimed, before + amount),
                Err(err) => {
                    assert!(matches!(err, VestingPoolError::NoClaimableBalance));
                    assert_eq!(s.claimed, before);
                }
            }
            assert!(s.claimed <= s.released_at(LAUNCH, now).unwrap());
            now += UNIT / 2;
        }
        assert_eq!(s.claimed, s.total_amount().unwrap());
        assert_eq!(paid.iter().sum::<u64>(), 100_000);
        assert!(matches!(
            settle(&mut s, LAUNCH + 100 * UNIT, &mut paid),
            Err(VestingPoolError::NoClaimableBalance)
        ));
    }
}
