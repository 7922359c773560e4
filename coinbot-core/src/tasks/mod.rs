pub mod daily_donation;
