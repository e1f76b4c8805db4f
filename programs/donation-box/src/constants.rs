pub const DONATION_BOX_SEED: &[u8] = b"donation_box";
pub const DONOR_SEED: &[u8] = b"donor";
pub const DONOR_ROLL_SEED: &[u8] = b"donor_roll";

/// Donation box names are stored inline and used as a PDA seed.
pub const MIN_NAME_LEN: usize = 4;
pub const MAX_NAME_LEN: usize = 32;

/// Number of leaderboard slots kept on the donation box.
pub const TOP_DONORS_LEN: usize = 3;

/// Largest roll page that fits in transaction return data.
pub const MAX_DONORS_PER_PAGE: u8 = 30;
