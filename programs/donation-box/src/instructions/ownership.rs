use anchor_lang::prelude::*;

use crate::constants::DONATION_BOX_SEED;
use crate::state::{DonationBox, OwnershipTransferred};

#[derive(Accounts)]
pub struct TransferOwnership<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [DONATION_BOX_SEED, &DonationBox::name_seed(&donation_box.name), donation_box.creator.as_ref()],
        bump = donation_box.bump
    )]
    pub donation_box: Account<'info, DonationBox>,
}

impl<'info> TransferOwnership<'info> {
    pub fn transfer_ownership(&mut self, new_owner: Pubkey) -> Result<()> {
        let previous_owner = self
            .donation_box
            .transfer_ownership(&self.owner.key(), new_owner)?;

        msg!("ownership: {} -> {}", previous_owner, new_owner);
        emit!(OwnershipTransferred {
            donation_box: self.donation_box.key(),
            previous_owner,
            new_owner,
        });
        Ok(())
    }
}
