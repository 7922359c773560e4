// File: src/platforms/bilibili/mod.rs

pub mod client;
pub mod requests;

pub use client::{BiliApiResponse, BiliClient};
