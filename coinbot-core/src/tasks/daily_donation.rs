// src/tasks/daily_donation.rs

use std::sync::Arc;
use tracing::{error, info};

use crate::http::DefaultHttpClient;
use crate::platforms::PlatformApis;
use crate::platforms::bilibili::BiliClient;
use crate::services::donate::{DonateCoinService, DonationRun, DonationSummary};
use crate::settings::Settings;
use crate::Error;

/// Runs today's coin task against the live platform.
///
/// `seed` makes every random pick reproducible; `None` seeds from the OS.
pub async fn run_daily_donation(settings: &Settings, seed: Option<u64>) -> Result<DonationSummary, Error> {
    let http = DefaultHttpClient::new(&settings.cookie, settings.http_timeout)?;
    let client = Arc::new(BiliClient::new(http, settings.cookie.user_id));
    run_daily_donation_with(PlatformApis::from_client(client), settings, seed).await
}

/// Same as [`run_daily_donation`] over caller-supplied platform capabilities.
pub async fn run_daily_donation_with(
    apis: PlatformApis,
    settings: &Settings,
    seed: Option<u64>,
) -> Result<DonationSummary, Error> {
    let mut run = match seed {
        Some(seed) => {
            info!("using fixed seed {} for video selection", seed);
            DonationRun::with_seed(seed)
        }
        None => DonationRun::new(),
    };

    let service = DonateCoinService::new(apis, settings.task.clone(), settings.cookie.clone());
    info!("starting coin task for account {}", settings.cookie.user_id);

    match service.add_coins_for_videos(&mut run).await {
        Ok(summary) => Ok(summary),
        Err(e) => {
            error!("coin task aborted: {}", e);
            Err(e)
        }
    }
}
