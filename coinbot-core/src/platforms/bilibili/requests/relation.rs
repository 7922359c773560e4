// ========================================================
// File: coinbot-core/src/platforms/bilibili/requests/relation.rs
// ========================================================
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use coinbot_common::models::CreatorId;
use crate::http::HttpClient;
use crate::platforms::RelationApi;
use crate::platforms::bilibili::client::{param, BiliClient};
use crate::Error;

/// Tag id of the "special followings" group.
pub const SPECIAL_TAG_ID: i64 = -10;
pub const PAGE_SIZE: u32 = 50;
/// Other accounts' follow lists are only visible for the first five pages.
pub const FOLLOWINGS_MAX_PAGES: u32 = 5;

#[derive(Debug, Deserialize)]
pub struct UpInfo {
    pub mid: CreatorId,
    #[serde(default)]
    pub uname: String,
}

/// `data` of `GET /x/relation/followings`.
#[derive(Debug, Deserialize)]
pub struct FollowingsData {
    #[serde(default)]
    pub list: Vec<UpInfo>,
    #[serde(default)]
    pub total: u32,
}

#[async_trait]
impl<H: HttpClient> RelationApi for BiliClient<H> {
    async fn get_special_followings(&self) -> Result<Vec<CreatorId>, Error> {
        let query = vec![
            param("mid", self.user_id()),
            param("tagid", SPECIAL_TAG_ID),
            param("pn", 1),
            param("ps", PAGE_SIZE),
        ];
        // `data` is null rather than [] when the group is empty.
        let ups: Option<Vec<UpInfo>> = self.get_optional_data("/x/relation/tag", query).await?;
        Ok(ups.unwrap_or_default().into_iter().map(|u| u.mid).collect())
    }

    async fn get_followings(&self, user_id: u64) -> Result<Vec<CreatorId>, Error> {
        let mut mids = Vec::new();
        for page in 1..=FOLLOWINGS_MAX_PAGES {
            let query = vec![
                param("vmid", user_id),
                param("pn", page),
                param("ps", PAGE_SIZE),
                param("order", "desc"),
            ];
            let data: FollowingsData = self.get_data("/x/relation/followings", query).await?;
            let fetched = data.list.len();
            mids.extend(data.list.into_iter().map(|u| u.mid));
            if fetched < PAGE_SIZE as usize || mids.len() >= data.total as usize {
                break;
            }
        }
        debug!("{} following(s) for {}", mids.len(), user_id);
        Ok(mids)
    }
}
