#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

pub mod constants;
pub mod instructions;
pub mod state;

use crate::instructions::*;
use crate::state::*;

declare_id!("EwyY4cfEvdPRWECeWfNdMjLkMtDR6TugTf7Hjj25CKrN");

#[program]
pub mod donation_box {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, name: String, schedule: DonationSchedule) -> Result<()> {
        ctx.accounts.initialize(name, schedule, &ctx.bumps)?;
        Ok(())
    }

    pub fn donate(ctx: Context<Donate>, amount: u64) -> Result<()> {
        ctx.accounts.donate(amount, &ctx.bumps)?;
        Ok(())
    }
    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        ctx.accounts.withdraw()?;
        Ok(())
    }
    pub fn transfer_ownership(ctx: Context<TransferOwnership>, new_owner: Pubkey) -> Result<()> {
        ctx.accounts.transfer_ownership(new_owner)?;
        Ok(())
    }

    pub fn donation_of(ctx: Context<DonationOf>) -> Result<u64> {
        ctx.accounts.donation_of()
    }
    pub fn donors(ctx: Context<ReadDonors>, offset: u32, limit: u8) -> Result<Vec<Pubkey>> {
        ctx.accounts.donors(offset, limit)
    }
    pub fn get_top_donors(ctx: Context<ReadDonationBox>) -> Result<TopDonors> {
        Ok(ctx.accounts.top_donors())
    }
    pub fn summary(ctx: Context<ReadDonationBox>) -> Result<DonationSummary> {
        Ok(ctx.accounts.summary())
    }
    pub fn is_donation_allowed(ctx: Context<ReadDonationBox>) -> Result<bool> {
        ctx.accounts.is_donation_allowed()
    }
    pub fn time_window(ctx: Context<ReadDonationBox>) -> Result<TimeWindowInfo> {
        ctx.accounts.time_window()
    }
}
