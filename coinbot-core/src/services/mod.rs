pub mod donate;

pub use donate::{DonateCoinService, DonationSummary};
