use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::constants::{DONATION_BOX_SEED, DONOR_ROLL_SEED, DONOR_SEED};
use crate::state::{DonationBox, DonationError, DonationMade, DonorAccount, DonorRoll};

#[derive(Accounts)]
pub struct Donate<'info> {
    #[account(mut)]
    pub donor: Signer<'info>,

    #[account(
        mut,
        seeds = [DONATION_BOX_SEED, &DonationBox::name_seed(&donation_box.name), donation_box.creator.as_ref()],
        bump = donation_box.bump
    )]
    pub donation_box: Account<'info, DonationBox>,

    #[account(
        init_if_needed,
        payer = donor,
        space = DonorAccount::INIT_SPACE,
        seeds = [DONOR_SEED, donation_box.key().as_ref(), donor.key().as_ref()],
        bump
    )]
    pub donor_account: Account<'info, DonorAccount>,

    // Grows by one entry the first time `donor` gives.
    #[account(
        mut,
        seeds = [DONOR_ROLL_SEED, donation_box.key().as_ref()],
        bump = donor_roll.load()?.bump
    )]
    pub donor_roll: AccountLoader<'info, DonorRoll>,

    pub system_program: Program<'info, System>,
}

impl<'info> Donate<'info> {
    pub fn donate(&mut self, amount: u64, bumps: &DonateBumps) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;

        if self.donor_account.is_new() {
            self.donor_account.set_inner(DonorAccount::new(
                self.donation_box.key(),
                self.donor.key(),
                bumps.donor_account,
            ));
            self.grow_donor_roll()?;
        }

        let total_by_donor = {
            let roll_info = self.donor_roll.to_account_info();
            let mut data = roll_info.try_borrow_mut_data()?;
            self.donation_box.record_donation(
                &mut self.donor_account,
                DonorRoll::entries_mut(&mut data)?,
                amount,
                now,
            )?
        };

        let cpi_ctx = CpiContext::new(
            self.system_program.to_account_info(),
            Transfer {
                from: self.donor.to_account_info(),
                to: self.donation_box.to_account_info(),
            },
        );
        transfer(cpi_ctx, amount)?;

        msg!(
            "donation: donor={} amount={} total={}",
            self.donor.key(),
            amount,
            total_by_donor
        );
        emit!(DonationMade {
            donation_box: self.donation_box.key(),
            donor: self.donor.key(),
            amount,
            total_by_donor,
            timestamp: now,
        });
        Ok(())
    }

    /// Make room for one more roll entry, topping up rent from the donor.
    fn grow_donor_roll(&self) -> Result<()> {
        let roll_info = self.donor_roll.to_account_info();
        let len = usize::try_from(self.donation_box.donor_count)
            .map_err(|_| DonationError::MathOverflow)?;
        let new_size = DonorRoll::space(len.checked_add(1).ok_or(DonationError::MathOverflow)?);

        let rent_due = Rent::get()?
            .minimum_balance(new_size)
            .saturating_sub(roll_info.lamports());
        if rent_due > 0 {
            let cpi_ctx = CpiContext::new(
                self.system_program.to_account_info(),
                Transfer {
                    from: self.donor.to_account_info(),
                    to: roll_info.clone(),
                },
            );
            transfer(cpi_ctx, rent_due)?;
        }

        roll_info.realloc(new_size, false)?;
        Ok(())
    }
}
