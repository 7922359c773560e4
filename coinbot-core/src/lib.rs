// src/lib.rs

pub mod http;
pub mod platforms;
pub mod services;
pub mod settings;
pub mod tasks;

pub use coinbot_common::error::Error;
pub use coinbot_common::models;
pub use http::{DefaultHttpClient, HttpClient};
