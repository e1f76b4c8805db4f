use anchor_lang::prelude::*;
use anchor_lang::Lamports;

use crate::constants::DONATION_BOX_SEED;
use crate::state::{DonationBox, FundsWithdrawn};

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [DONATION_BOX_SEED, &DonationBox::name_seed(&donation_box.name), donation_box.creator.as_ref()],
        bump = donation_box.bump
    )]
    pub donation_box: Account<'info, DonationBox>,
}

impl<'info> Withdraw<'info> {
    pub fn withdraw(&mut self) -> Result<()> {
        let amount = self.donation_box.withdraw(&self.owner.key())?;

        // The rent-exempt reserve is never counted in `balance`, so the box
        // stays alive after paying out.
        self.donation_box.sub_lamports(amount)?;
        self.owner.add_lamports(amount)?;

        msg!("withdrawal: owner={} amount={}", self.owner.key(), amount);
        emit!(FundsWithdrawn {
            donation_box: self.donation_box.key(),
            owner: self.owner.key(),
            amount,
            timestamp: Clock::get()?.unix_timestamp,
        });
        Ok(())
    }
}
