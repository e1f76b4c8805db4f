pub mod donation;
pub mod donor;
pub mod leaderboard;

pub use donation::*;
pub use donor::*;
pub use leaderboard::*;
