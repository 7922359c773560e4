// File: src/platforms/mod.rs

use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;

use coinbot_common::models::{Candidate, CreatorId};
use crate::Error;

/// Raw response of a write endpoint, classified by the caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiStatus {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountApi: Send + Sync {
    /// Current coin balance. May be fractional.
    async fn get_coin_balance(&self) -> Result<f64, Error>;
    /// Coins this account has donated today.
    async fn get_donated_coins_today(&self) -> Result<u32, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoApi: Send + Sync {
    /// Coins this account has ever given `aid` (0, 1 or 2).
    async fn get_donated_coins_for_video(&self, aid: &str) -> Result<u32, Error>;
    async fn get_video_count_of_up(&self, mid: CreatorId) -> Result<u32, Error>;
    /// The video at 1-based `position` in the creator's upload list.
    async fn get_video_of_up(&self, mid: CreatorId, position: u32) -> Result<Option<Candidate>, Error>;
    async fn get_region_ranking(&self, region_id: u32) -> Result<Vec<Candidate>, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationApi: Send + Sync {
    async fn get_special_followings(&self) -> Result<Vec<CreatorId>, Error>;
    async fn get_followings(&self, user_id: u64) -> Result<Vec<CreatorId>, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationApi: Send + Sync {
    async fn add_coin_for_video(
        &self,
        aid: &str,
        multiply: u32,
        select_like: bool,
        csrf: &str,
    ) -> Result<ApiStatus, Error>;
}

/// The capabilities a donation run talks to.
#[derive(Clone)]
pub struct PlatformApis {
    pub account: Arc<dyn AccountApi>,
    pub video: Arc<dyn VideoApi>,
    pub relation: Arc<dyn RelationApi>,
    pub donation: Arc<dyn DonationApi>,
}

impl PlatformApis {
    /// Uses one client for every capability.
    pub fn from_client<C>(client: Arc<C>) -> Self
    where
        C: AccountApi + VideoApi + RelationApi + DonationApi + 'static,
    {
        Self {
            account: client.clone(),
            video: client.clone(),
            relation: client.clone(),
            donation: client,
        }
    }
}

pub mod bilibili;
