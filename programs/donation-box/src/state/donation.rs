use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;

use crate::constants::{MAX_NAME_LEN, MIN_NAME_LEN};
use crate::state::{DonorAccount, DonorRoll, TopDonors};

#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct DonationBox {
    pub creator: Pubkey,
    pub owner: Pubkey,
    pub name: String,
    pub schedule: DonationSchedule,
    pub total_donated: u64,
    pub total_withdrawn: u64,
    pub balance: u64,
    pub donor_count: u64,
    pub top_donors: TopDonors,
    pub created_at: i64,
    pub bump: u8,
}

impl Space for DonationBox {
    const INIT_SPACE: usize = 8      // Discriminator
        + 32    // creator: Pubkey
        + 32    // owner: Pubkey
        + 4 + MAX_NAME_LEN // name: String
        + 1 + 16 // schedule: DonationSchedule (1 byte variant + max variant size)
        + 8     // total_donated: u64
        + 8     // total_withdrawn: u64
        + 8     // balance: u64
        + 8     // donor_count: u64
        + TopDonors::SPACE // top_donors
        + 8     // created_at: i64
        + 1; // bump: u8
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DonationSchedule {
    /// Donations are accepted at any time.
    Unrestricted,
    /// Donations are accepted from `start_time` to `end_time`, both inclusive.
    Window { start_time: i64, end_time: i64 },
}

impl DonationSchedule {
    pub fn validate(&self) -> Result<()> {
        if let Self::Window {
            start_time,
            end_time,
        } = self
        {
            require!(start_time < end_time, DonationError::InvalidWindow);
        }
        Ok(())
    }

    pub fn is_open(&self, now: i64) -> bool {
        match *self {
            Self::Unrestricted => true,
            Self::Window {
                start_time,
                end_time,
            } => start_time <= now && now <= end_time,
        }
    }

    pub fn check_open(&self, now: i64) -> Result<()> {
        if let Self::Window {
            start_time,
            end_time,
        } = *self
        {
            require!(now >= start_time, DonationError::DonationNotStarted);
            require!(now <= end_time, DonationError::DonationEnded);
        }
        Ok(())
    }

    pub fn start_time(&self) -> Option<i64> {
        match self {
            Self::Unrestricted => None,
            Self::Window { start_time, .. } => Some(*start_time),
        }
    }

    pub fn end_time(&self) -> Option<i64> {
        match self {
            Self::Unrestricted => None,
            Self::Window { end_time, .. } => Some(*end_time),
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeWindowInfo {
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub current_time: i64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DonationSummary {
    pub owner: Pubkey,
    pub total_donated: u64,
    pub total_withdrawn: u64,
    pub balance: u64,
    pub donor_count: u64,
}

impl DonationBox {
    pub fn new(
        creator: Pubkey,
        name: String,
        schedule: DonationSchedule,
        created_at: i64,
        bump: u8,
    ) -> Result<Self> {
        require!(
            name.len() >= MIN_NAME_LEN && name.len() <= MAX_NAME_LEN,
            DonationError::NameLengthInvalid
        );
        schedule.validate()?;

        Ok(Self {
            creator,
            owner: creator,
            name,
            schedule,
            total_donated: 0,
            total_withdrawn: 0,
            balance: 0,
            donor_count: 0,
            top_donors: TopDonors::default(),
            created_at,
            bump,
        })
    }

    /// PDA seed for a box name. Names are hashed so that any input length
    /// derives an address and reaches the length check.
    pub fn name_seed(name: &str) -> [u8; 32] {
        hash(name.as_bytes()).to_bytes()
    }

    pub fn only_owner(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.owner, DonationError::Unauthorized);
        Ok(())
    }

    /// Record `amount` from the donor behind `ledger` and return the donor's
    /// new cumulative amount.
    ///
    /// `roll` is the entry region of the donor roll. A first donation needs
    /// room for one more entry after the current `donor_count`.
    /// Nothing is written unless every check passes.
    pub fn record_donation(
        &mut self,
        ledger: &mut DonorAccount,
        roll: &mut [u8],
        amount: u64,
        now: i64,
    ) -> Result<u64> {
        require!(amount > 0, DonationError::InvalidAmount);
        self.schedule.check_open(now)?;

        let first_donation = ledger.is_new();
        let roll_index =
            usize::try_from(self.donor_count).map_err(|_| DonationError::MathOverflow)?;
        if first_donation {
            DonorRoll::check_room(roll, roll_index)?;
        }
        let total_by_donor = ledger
            .amount
            .checked_add(amount)
            .ok_or(DonationError::MathOverflow)?;
        let total_donated = self
            .total_donated
            .checked_add(amount)
            .ok_or(DonationError::MathOverflow)?;
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(DonationError::MathOverflow)?;
        let donor_count = if first_donation {
            self.donor_count
                .checked_add(1)
                .ok_or(DonationError::MathOverflow)?
        } else {
            self.donor_count
        };

        if first_donation {
            DonorRoll::write_entry(roll, roll_index, &ledger.donor)?;
            ledger.first_donated_at = now;
        }
        ledger.amount = total_by_donor;
        ledger.last_donated_at = now;

        self.total_donated = total_donated;
        self.balance = balance;
        self.donor_count = donor_count;
        self.top_donors.update(ledger.donor, total_by_donor);

        Ok(total_by_donor)
    }

    /// Empty the held balance on behalf of the owner, returning the amount to
    /// pay out.
    pub fn withdraw(&mut self, caller: &Pubkey) -> Result<u64> {
        self.only_owner(caller)?;
        require!(self.balance > 0, DonationError::NothingToWithdraw);

        let amount = self.balance;
        self.total_withdrawn = self
            .total_withdrawn
            .checked_add(amount)
            .ok_or(DonationError::MathOverflow)?;
        self.balance = 0;
        Ok(amount)
    }

    /// Hand the owner role to `new_owner`, returning the previous owner.
    pub fn transfer_ownership(&mut self, caller: &Pubkey, new_owner: Pubkey) -> Result<Pubkey> {
        self.only_owner(caller)?;
        require_keys_neq!(new_owner, Pubkey::default(), DonationError::InvalidOwner);

        Ok(std::mem::replace(&mut self.owner, new_owner))
    }

    pub fn is_donation_allowed(&self, now: i64) -> bool {
        self.schedule.is_open(now)
    }

    pub fn time_window(&self, now: i64) -> TimeWindowInfo {
        TimeWindowInfo {
            start_time: self.schedule.start_time(),
            end_time: self.schedule.end_time(),
            current_time: now,
        }
    }

    pub fn summary(&self) -> DonationSummary {
        DonationSummary {
            owner: self.owner,
            total_donated: self.total_donated,
            total_withdrawn: self.total_withdrawn,
            balance: self.balance,
            donor_count: self.donor_count,
        }
    }
}

#[event]
pub struct DonationBoxInitialized {
    pub donation_box: Pubkey,
    pub owner: Pubkey,
    pub schedule: DonationSchedule,
    pub timestamp: i64,
}

#[event]
pub struct DonationMade {
    pub donation_box: Pubkey,
    pub donor: Pubkey,
    pub amount: u64,
    pub total_by_donor: u64,
    pub timestamp: i64,
}

#[event]
pub struct FundsWithdrawn {
    pub donation_box: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct OwnershipTransferred {
    pub donation_box: Pubkey,
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}

#[error_code]
pub enum DonationError {
    #[msg("Donation amount must be greater than 0")]
    InvalidAmount,

    #[msg("Start time must be before end time")]
    InvalidWindow,

    #[msg("Name must be between 4 and 32 characters")]
    NameLengthInvalid,

    #[msg("Owner cannot be the default address")]
    InvalidOwner,

    #[msg("Unauthorized action")]
    Unauthorized,

    #[msg("No funds to withdraw")]
    NothingToWithdraw,

    #[msg("Donation period has not started yet")]
    DonationNotStarted,

    #[msg("Donation period has ended")]
    DonationEnded,

    #[msg("Math overflow error")]
    MathOverflow,

    #[msg("Donor roll has no room for a new donor")]
    RollOutOfSpace,
}
