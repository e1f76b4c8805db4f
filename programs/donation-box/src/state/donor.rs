use anchor_lang::prelude::*;
use core::mem::size_of;

use crate::state::DonationError;

/// Ledger entry for one donor of one donation box.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct DonorAccount {
    pub donation_box: Pubkey, // Parent donation box
    pub donor: Pubkey,        // Donor's wallet
    pub amount: u64,          // Total donated, never decreases
    pub first_donated_at: i64,
    pub last_donated_at: i64,
    pub bump: u8, // PDA bump
}

impl Space for DonorAccount {
    const INIT_SPACE: usize = 8      // Discriminator
        + 32    // donation_box: Pubkey
        + 32    // donor: Pubkey
        + 8     // amount: u64
        + 8     // first_donated_at: i64
        + 8     // last_donated_at: i64
        + 1; // bump: u8
}

impl DonorAccount {
    pub fn new(donation_box: Pubkey, donor: Pubkey, bump: u8) -> Self {
        Self {
            donation_box,
            donor,
            amount: 0,
            first_donated_at: 0,
            last_donated_at: 0,
            bump,
        }
    }

    /// A ledger entry that has not recorded any donation yet.
    pub fn is_new(&self) -> bool {
        self.amount == 0
    }

    /// Cumulative amount held by a ledger account that may not exist yet.
    pub fn amount_in(info: &AccountInfo) -> Result<u64> {
        if info.data_is_empty() {
            return Ok(0);
        }
        require_keys_eq!(
            *info.owner,
            crate::ID,
            anchor_lang::error::ErrorCode::AccountOwnedByWrongProgram
        );

        let data = info.try_borrow_data()?;
        let ledger = Self::try_deserialize(&mut &data[..])?;
        Ok(ledger.amount)
    }
}

/// Header of the roll of every distinct donor of a donation box.
///
/// The donors themselves follow the header as raw 32-byte keys in order of
/// first donation, so appending never decodes the existing entries. The
/// number of entries is the box's `donor_count`.
#[account(zero_copy)]
pub struct DonorRoll {
    pub donation_box: Pubkey,
    pub bump: u8,
}

pub const ROLL_ENTRY_SPACE: usize = 32;

impl DonorRoll {
    pub const HEADER_SPACE: usize = 8 + size_of::<DonorRoll>();

    /// Account size needed to hold `len` donors.
    pub const fn space(len: usize) -> usize {
        Self::HEADER_SPACE + ROLL_ENTRY_SPACE * len
    }

    /// The entry region of a roll account's data.
    pub fn entries(data: &[u8]) -> Result<&[u8]> {
        data.get(Self::HEADER_SPACE..)
            .ok_or_else(|| anchor_lang::error::ErrorCode::AccountDidNotDeserialize.into())
    }

    pub fn entries_mut(data: &mut [u8]) -> Result<&mut [u8]> {
        data.get_mut(Self::HEADER_SPACE..)
            .ok_or_else(|| anchor_lang::error::ErrorCode::AccountDidNotDeserialize.into())
    }

    pub fn entry(entries: &[u8], index: usize) -> Option<Pubkey> {
        let start = index.checked_mul(ROLL_ENTRY_SPACE)?;
        let bytes = entries.get(start..start.checked_add(ROLL_ENTRY_SPACE)?)?;
        <[u8; ROLL_ENTRY_SPACE]>::try_from(bytes)
            .ok()
            .map(Pubkey::new_from_array)
    }

    /// Check that slot `index` exists before anything is written.
    pub fn check_room(entries: &[u8], index: usize) -> Result<()> {
        let end = index
            .checked_add(1)
            .and_then(|len| len.checked_mul(ROLL_ENTRY_SPACE))
            .ok_or(DonationError::MathOverflow)?;
        require!(end <= entries.len(), DonationError::RollOutOfSpace);
        Ok(())
    }

    pub(crate) fn write_entry(entries: &mut [u8], index: usize, donor: &Pubkey) -> Result<()> {
        Self::check_room(entries, index)?;
        let start = index * ROLL_ENTRY_SPACE;
        entries[start..start + ROLL_ENTRY_SPACE].copy_from_slice(donor.as_ref());
        Ok(())
    }

    /// Donors in `offset..offset + limit` of a roll holding `len` entries,
    /// clamped to the roll.
    pub fn page(entries: &[u8], len: usize, offset: usize, limit: usize) -> Vec<Pubkey> {
        let len = len.min(entries.len() / ROLL_ENTRY_SPACE);
        let start = offset.min(len);
        let end = start.saturating_add(limit).min(len);
        (start..end)
            .filter_map(|index| Self::entry(entries, index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serialized<T: AccountSerialize>(account: &T) -> Vec<u8> {
        let mut buf = Vec::new();
        account.try_serialize(&mut buf).unwrap();
        buf
    }

    fn amount_in(owner: &Pubkey, mut data: Vec<u8>) -> Result<u64> {
        let key = Pubkey::new_unique();
        let mut lamports = 1_000_000;
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, owner, false, 0);
        DonorAccount::amount_in(&info)
    }

    fn roll_of(keys: &[Pubkey]) -> Vec<u8> {
        let mut data = vec![0u8; DonorRoll::space(keys.len())];
        let entries = DonorRoll::entries_mut(&mut data).unwrap();
        for (index, key) in keys.iter().enumerate() {
            DonorRoll::write_entry(entries, index, key).unwrap();
        }
        data
    }

    #[test]
    fn donor_account_size() {
        let account = DonorAccount::new(Pubkey::new_unique(), Pubkey::new_unique(), 255);
        assert_eq!(serialized(&account).len(), DonorAccount::INIT_SPACE);
    }

    #[test]
    fn fresh_ledger_entry_is_new() {
        let mut account = DonorAccount::new(Pubkey::new_unique(), Pubkey::new_unique(), 1);
        assert!(account.is_new());
        account.amount = 1;
        assert!(!account.is_new());
    }

    #[test]
    fn missing_ledger_reads_as_zero() {
        let system = Pubkey::default();
        assert_eq!(amount_in(&system, Vec::new()).unwrap(), 0);
    }

    #[test]
    fn ledger_amount_is_decoded() {
        let mut account = DonorAccount::new(Pubkey::new_unique(), Pubkey::new_unique(), 7);
        account.amount = 42_000;
        assert_eq!(amount_in(&crate::ID, serialized(&account)).unwrap(), 42_000);
    }

    #[test]
    fn ledger_owned_by_another_program_is_rejected() {
        let mut account = DonorAccount::new(Pubkey::new_unique(), Pubkey::new_unique(), 7);
        account.amount = 42_000;
        let err = amount_in(&Pubkey::new_unique(), serialized(&account)).unwrap_err();
        assert_eq!(
            err,
            anchor_lang::error::ErrorCode::AccountOwnedByWrongProgram.into()
        );
    }

    #[test]
    fn other_program_account_is_not_a_ledger() {
        let mut data = vec![0u8; DonorAccount::INIT_SPACE];
        data[..8].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let err = amount_in(&crate::ID, data).unwrap_err();
        assert_eq!(
            err,
            anchor_lang::error::ErrorCode::AccountDiscriminatorMismatch.into()
        );
    }

    #[test]
    fn donor_roll_header_size() {
        assert_eq!(DonorRoll::HEADER_SPACE, 8 + 32 + 1);
        assert_eq!(DonorRoll::space(0), DonorRoll::HEADER_SPACE);
        assert_eq!(DonorRoll::space(5), DonorRoll::HEADER_SPACE + 5 * ROLL_ENTRY_SPACE);
    }

    #[test]
    fn entries_are_read_back_in_order() {
        let keys: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        let data = roll_of(&keys);
        let entries = DonorRoll::entries(&data).unwrap();

        assert_eq!(entries.len(), 3 * ROLL_ENTRY_SPACE);
        for (index, key) in keys.iter().enumerate() {
            assert_eq!(DonorRoll::entry(entries, index), Some(*key));
        }
        assert_eq!(DonorRoll::entry(entries, 3), None);
    }

    #[test]
    fn truncated_roll_has_no_entries() {
        let data = vec![0u8; DonorRoll::HEADER_SPACE - 1];
        assert!(DonorRoll::entries(&data).is_err());
    }

    #[test]
    fn write_past_the_end_leaves_roll_untouched() {
        let key = Pubkey::new_unique();
        let mut data = roll_of(&[key]);
        let before = data.clone();
        let entries = DonorRoll::entries_mut(&mut data).unwrap();

        let err = DonorRoll::write_entry(entries, 1, &Pubkey::new_unique()).unwrap_err();
        assert_eq!(err, DonationError::RollOutOfSpace.into());
        assert_eq!(data, before);
    }

    #[test]
    fn page_is_clamped_to_the_roll() {
        let keys: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
        let data = roll_of(&keys);
        let entries = DonorRoll::entries(&data).unwrap();

        assert_eq!(DonorRoll::page(entries, 4, 1, 2), keys[1..3].to_vec());
        assert_eq!(DonorRoll::page(entries, 4, 3, 10), keys[3..].to_vec());
        assert!(DonorRoll::page(entries, 4, 9, 2).is_empty());
        assert!(DonorRoll::page(entries, 4, 0, 0).is_empty());
    }

    #[test]
    fn page_stops_at_the_recorded_length() {
        let keys: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
        let data = roll_of(&keys);
        let entries = DonorRoll::entries(&data).unwrap();

        assert_eq!(DonorRoll::page(entries, 2, 0, 10), keys[..2].to_vec());
        assert_eq!(DonorRoll::page(entries, 9, 0, 10), keys);
    }
}
