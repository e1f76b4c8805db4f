pub mod donate;
pub mod initialize;
pub mod ownership;
pub mod queries;
pub mod withdraw;

pub use donate::*;
pub use initialize::*;
pub use ownership::*;
pub use queries::*;
pub use withdraw::*;
