use anchor_lang::prelude::*;

use crate::constants::{DONATION_BOX_SEED, DONOR_ROLL_SEED, DONOR_SEED, MAX_DONORS_PER_PAGE};
use crate::state::{
    DonationBox, DonationError, DonationSummary, DonorAccount, DonorRoll, TimeWindowInfo,
    TopDonors,
};

#[derive(Accounts)]
pub struct ReadDonationBox<'info> {
    #[account(
        seeds = [DONATION_BOX_SEED, &DonationBox::name_seed(&donation_box.name), donation_box.creator.as_ref()],
        bump = donation_box.bump
    )]
    pub donation_box: Account<'info, DonationBox>,
}

impl<'info> ReadDonationBox<'info> {
    pub fn top_donors(&self) -> TopDonors {
        self.donation_box.top_donors
    }

    pub fn summary(&self) -> DonationSummary {
        self.donation_box.summary()
    }

    pub fn is_donation_allowed(&self) -> Result<bool> {
        Ok(self
            .donation_box
            .is_donation_allowed(Clock::get()?.unix_timestamp))
    }

    pub fn time_window(&self) -> Result<TimeWindowInfo> {
        Ok(self.donation_box.time_window(Clock::get()?.unix_timestamp))
    }
}

#[derive(Accounts)]
pub struct DonationOf<'info> {
    pub donation_box: Account<'info, DonationBox>,

    /// CHECK: only the address is used to derive the ledger entry
    pub donor: UncheckedAccount<'info>,

    /// CHECK: may be uninitialized when `donor` never gave; address is pinned by seeds
    #[account(
        seeds = [DONOR_SEED, donation_box.key().as_ref(), donor.key().as_ref()],
        bump
    )]
    pub donor_account: UncheckedAccount<'info>,
}

impl<'info> DonationOf<'info> {
    pub fn donation_of(&self) -> Result<u64> {
        DonorAccount::amount_in(&self.donor_account.to_account_info())
    }
}

#[derive(Accounts)]
pub struct ReadDonors<'info> {
    pub donation_box: Account<'info, DonationBox>,

    #[account(
        seeds = [DONOR_ROLL_SEED, donation_box.key().as_ref()],
        bump = donor_roll.load()?.bump
    )]
    pub donor_roll: AccountLoader<'info, DonorRoll>,
}

impl<'info> ReadDonors<'info> {
    pub fn donors(&self, offset: u32, limit: u8) -> Result<Vec<Pubkey>> {
        let limit = limit.min(MAX_DONORS_PER_PAGE);
        let len = usize::try_from(self.donation_box.donor_count)
            .map_err(|_| DonationError::MathOverflow)?;

        let roll_info = self.donor_roll.to_account_info();
        let data = roll_info.try_borrow_data()?;
        Ok(DonorRoll::page(
            DonorRoll::entries(&data)?,
            len,
            offset as usize,
            limit as usize,
        ))
    }
}
