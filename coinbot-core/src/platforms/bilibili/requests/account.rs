// ========================================================
// File: coinbot-core/src/platforms/bilibili/requests/account.rs
// ========================================================
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::http::HttpClient;
use crate::platforms::AccountApi;
use crate::platforms::bilibili::client::BiliClient;
use crate::Error;

/// Experience granted per donated coin, up to the daily cap.
pub const EXP_PER_COIN: u32 = 10;

/// `data` of `GET /x/web-interface/nav`.
#[derive(Debug, Deserialize)]
pub struct NavData {
    #[serde(rename = "isLogin", default)]
    pub is_login: bool,
    #[serde(default)]
    pub money: Option<f64>,
    #[serde(default)]
    pub uname: Option<String>,
}

#[async_trait]
impl<H: HttpClient> AccountApi for BiliClient<H> {
    async fn get_coin_balance(&self) -> Result<f64, Error> {
        let nav: NavData = self.get_data("/x/web-interface/nav", Vec::new()).await?;
        if !nav.is_login {
            return Err(Error::CredentialInvalid("nav reports the session as logged out".into()));
        }
        let money = nav.money.unwrap_or(0.0);
        debug!("coin balance for {:?} = {}", nav.uname, money);
        Ok(money)
    }

    /// Derived from today's coin experience, which the platform reports in
    /// steps of 10 per coin.
    async fn get_donated_coins_today(&self) -> Result<u32, Error> {
        let exp: u32 = self.get_data("/x/web-interface/coin/today/exp", Vec::new()).await?;
        Ok(exp / EXP_PER_COIN)
    }
}
