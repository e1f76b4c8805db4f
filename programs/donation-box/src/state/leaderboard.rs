use anchor_lang::prelude::*;

use crate::constants::TOP_DONORS_LEN;

/// One leaderboard slot. An empty slot holds `Pubkey::default()` and 0.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TopDonor {
    pub donor: Pubkey,
    pub amount: u64,
}

impl TopDonor {
    pub const SPACE: usize = 32 // donor: Pubkey
        + 8; // amount: u64

    pub fn is_empty(&self) -> bool {
        self.donor == Pubkey::default()
    }
}

/// The largest cumulative donors, ordered by amount descending.
///
/// Empty slots only ever appear after the occupied ones. Donors that reach an
/// amount already on the board are placed after the existing holder of that
/// amount.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TopDonors {
    pub slots: [TopDonor; TOP_DONORS_LEN],
}

impl TopDonors {
    pub const SPACE: usize = TopDonor::SPACE * TOP_DONORS_LEN;

    pub fn position(&self, donor: &Pubkey) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| !slot.is_empty() && slot.donor == *donor)
    }

    /// Re-rank `donor` now that its cumulative amount is `amount`.
    pub fn update(&mut self, donor: Pubkey, amount: u64) {
        // Pull the donor out first; its old amount is stale.
        if let Some(pos) = self.position(&donor) {
            self.slots.copy_within(pos + 1.., pos);
            self.slots[TOP_DONORS_LEN - 1] = TopDonor::default();
        }

        if let Some(idx) = self.slots.iter().position(|slot| slot.amount < amount) {
            self.slots.copy_within(idx..TOP_DONORS_LEN - 1, idx + 1);
            self.slots[idx] = TopDonor { donor, amount };
        }
    }
}
