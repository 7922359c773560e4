pub mod account;
pub mod coin;
pub mod relation;
pub mod video;
