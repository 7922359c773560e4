// ========================================================
// File: coinbot-core/src/platforms/bilibili/requests/video.rs
// ========================================================
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use coinbot_common::models::{Candidate, CreatorId};
use crate::http::HttpClient;
use crate::platforms::VideoApi;
use crate::platforms::bilibili::client::{param, Aid, BiliClient};
use crate::platforms::bilibili::requests::coin::ArchiveCoinsData;
use crate::Error;

/// Ranking window in days used for the region ranking.
pub const RANKING_DAYS: u32 = 3;

/// `data` of `GET /x/space/arc/search`.
#[derive(Debug, Deserialize)]
pub struct SpaceSearchData {
    #[serde(default)]
    pub list: SpaceVideoList,
    pub page: SpacePage,
}

#[derive(Debug, Deserialize, Default)]
pub struct SpaceVideoList {
    #[serde(default)]
    pub vlist: Vec<UpVideoInfo>,
}

#[derive(Debug, Deserialize)]
pub struct SpacePage {
    /// Total number of videos uploaded by the creator.
    pub count: u32,
    #[serde(default)]
    pub pn: u32,
    #[serde(default)]
    pub ps: u32,
}

#[derive(Debug, Deserialize)]
pub struct UpVideoInfo {
    pub aid: Aid,
    pub title: String,
}

/// Single entry of `GET /x/web-interface/ranking/region`.
#[derive(Debug, Deserialize)]
pub struct RankingVideoInfo {
    pub aid: Aid,
    pub title: String,
}

impl<H: HttpClient> BiliClient<H> {
    async fn search_up_videos(&self, mid: CreatorId, page: u32) -> Result<SpaceSearchData, Error> {
        let query = vec![
            param("mid", mid),
            param("ps", 1),
            param("pn", page),
        ];
        self.get_data("/x/space/arc/search", query).await
    }
}

#[async_trait]
impl<H: HttpClient> VideoApi for BiliClient<H> {
    async fn get_donated_coins_for_video(&self, aid: &str) -> Result<u32, Error> {
        let data: ArchiveCoinsData = self
            .get_data("/x/web-interface/archive/coins", vec![param("aid", aid)])
            .await?;
        Ok(data.multiply)
    }

    async fn get_video_count_of_up(&self, mid: CreatorId) -> Result<u32, Error> {
        let data = self.search_up_videos(mid, 1).await?;
        debug!("up {} has {} video(s)", mid, data.page.count);
        Ok(data.page.count)
    }

    /// With a page size of one, page `position` is the video at that position.
    async fn get_video_of_up(&self, mid: CreatorId, position: u32) -> Result<Option<Candidate>, Error> {
        let data = self.search_up_videos(mid, position.max(1)).await?;
        Ok(data
            .list
            .vlist
            .into_iter()
            .next()
            .map(|v| Candidate::new(v.aid.to_string(), v.title)))
    }

    async fn get_region_ranking(&self, region_id: u32) -> Result<Vec<Candidate>, Error> {
        let query = vec![
            param("rid", region_id),
            param("day", RANKING_DAYS),
        ];
        let ranking: Vec<RankingVideoInfo> = self
            .get_data("/x/web-interface/ranking/region", query)
            .await?;
        Ok(ranking
            .into_iter()
            .map(|v| Candidate::new(v.aid.to_string(), v.title))
            .collect())
    }
}
