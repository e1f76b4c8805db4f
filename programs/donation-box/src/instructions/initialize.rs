use anchor_lang::prelude::*;

use crate::constants::{DONATION_BOX_SEED, DONOR_ROLL_SEED};
use crate::state::{DonationBox, DonationBoxInitialized, DonationSchedule, DonorRoll};

#[derive(Accounts)]
#[instruction(name: String)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        init,
        payer = creator,
        space = DonationBox::INIT_SPACE,
        seeds = [DONATION_BOX_SEED, &DonationBox::name_seed(&name), creator.key().as_ref()],
        bump
    )]
    pub donation_box: Account<'info, DonationBox>,

    #[account(
        init,
        payer = creator,
        space = DonorRoll::space(0),
        seeds = [DONOR_ROLL_SEED, donation_box.key().as_ref()],
        bump
    )]
    pub donor_roll: AccountLoader<'info, DonorRoll>,

    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn initialize(
        &mut self,
        name: String,
        schedule: DonationSchedule,
        bumps: &InitializeBumps,
    ) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;

        self.donation_box.set_inner(DonationBox::new(
            self.creator.key(),
            name,
            schedule,
            now,
            bumps.donation_box,
        )?);
        {
            let mut donor_roll = self.donor_roll.load_init()?;
            donor_roll.donation_box = self.donation_box.key();
            donor_roll.bump = bumps.donor_roll;
        }

        msg!(
            "donation box: name={} owner={}",
            self.donation_box.name,
            self.creator.key()
        );
        emit!(DonationBoxInitialized {
            donation_box: self.donation_box.key(),
            owner: self.creator.key(),
            schedule,
            timestamp: now,
        });
        Ok(())
    }
}
