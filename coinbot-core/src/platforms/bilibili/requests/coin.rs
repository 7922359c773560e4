// ========================================================
// File: coinbot-core/src/platforms/bilibili/requests/coin.rs
// ========================================================
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::http::HttpClient;
use crate::platforms::{ApiStatus, DonationApi};
use crate::platforms::bilibili::client::{param, BiliClient};
use crate::Error;

/// `data` of `GET /x/web-interface/archive/coins`.
#[derive(Debug, Deserialize)]
pub struct ArchiveCoinsData {
    pub multiply: u32,
}

#[async_trait]
impl<H: HttpClient> DonationApi for BiliClient<H> {
    /// `POST /x/web-interface/coin/add`. The envelope is returned as-is; a
    /// non-zero code is not an error at this layer.
    async fn add_coin_for_video(
        &self,
        aid: &str,
        multiply: u32,
        select_like: bool,
        csrf: &str,
    ) -> Result<ApiStatus, Error> {
        let form = vec![
            param("aid", aid),
            param("multiply", multiply),
            param("select_like", if select_like { 1 } else { 0 }),
            param("cross_domain", "true"),
            param("csrf", csrf),
        ];
        let resp = self.post_envelope::<Value>("/x/web-interface/coin/add", form).await?;
        Ok(ApiStatus {
            code: resp.code,
            message: resp.message,
        })
    }
}
