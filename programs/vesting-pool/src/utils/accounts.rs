//! Raw schedule-account access for instructions that cannot use a typed
//! `Account<VestingSchedule>`: views and claims must treat a missing schedule
//! as the zero record, and batch admission receives its schedule PDAs through
//! remaining accounts.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount};

use crate::state::VestingSchedule;

/// Reads a schedule PDA; `None` when the account was never initialised.
pub fn load_schedule(info: &AccountInfo) -> Result<Option<VestingSchedule>> {
    if info.owner != &crate::ID || info.data_is_empty() {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    let schedule = VestingSchedule::try_deserialize(&mut &data[..])?;
    Ok(Some(schedule))
}

/// Writes a schedule back into its account data (discriminator included).
pub fn store_schedule(info: &AccountInfo, schedule: &VestingSchedule) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    schedule.try_serialize(&mut writer)?;
    Ok(())
}

/// Allocates a schedule PDA owned by this program, funded by `payer`.
/// Mirrors Anchor's `init` path, including accounts pre-funded by a third party.
pub fn create_schedule_account<'info>(
    info: &AccountInfo<'info>,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    signer_seeds: &[&[u8]],
) -> Result<()> {
    if info.owner == &crate::ID {
        return Ok(());
    }

    let space = 8 + VestingSchedule::SIZE;
    let rent = Rent::get()?.minimum_balance(space);
    let signer = &[signer_seeds];

    if info.lamports() == 0 {
        system_program::create_account(
            CpiContext::new_with_signer(
                system_program.clone(),
                CreateAccount {
                    from: payer.clone(),
                    to: info.clone(),
                },
                signer,
            ),
            rent,
            space as u64,
            &crate::ID,
        )?;
        return Ok(());
    }

    let top_up = rent.saturating_sub(info.lamports());
    if top_up > 0 {
        system_program::transfer(
            CpiContext::new(
                system_program.clone(),
                system_program::Transfer {
                    from: payer.clone(),
                    to: info.clone(),
                },
            ),
            top_up,
        )?;
    }
    system_program::allocate(
        CpiContext::new_with_signer(
            system_program.clone(),
            Allocate {
                account_to_allocate: info.clone(),
            },
            signer,
        ),
        space as u64,
    )?;
    system_program::assign(
        CpiContext::new_with_signer(
            system_program.clone(),
            Assign {
                account_to_assign: info.clone(),
            },
            signer,
        ),
        &crate::ID,
    )?;
    Ok(())
}
