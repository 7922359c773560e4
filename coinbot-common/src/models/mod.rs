// File: coinbot-common/src/models/mod.rs
pub mod video;
pub mod donation;
pub mod options;

pub use video::{Candidate, CreatorId};
pub use donation::DonationOutcome;
pub use options::{CookieOptions, DailyTaskOptions};
