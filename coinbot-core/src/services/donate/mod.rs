// File: src/services/donate/mod.rs

pub mod candidate;
pub mod eligibility;
pub mod executor;
pub mod quota;
pub mod run;
pub mod selector;

pub use candidate::{CandidateSource, SourceContext, ATTEMPTS_PER_SOURCE};
pub use eligibility::EligibilityCache;
pub use executor::DonationExecutor;
pub use quota::{compute_needed, QuotaState, QuotaStatus};
pub use run::DonationRun;
pub use selector::DonationSelector;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use coinbot_common::models::{CookieOptions, DailyTaskOptions, DonationOutcome};
use crate::platforms::PlatformApis;
use crate::Error;

/// Coins submitted per call; the quota loop always gives one at a time.
pub const COINS_PER_DONATION: u32 = 1;

/// What one run of the coin task did.
#[derive(Debug, Clone, PartialEq)]
pub struct DonationSummary {
    pub started_at: DateTime<Utc>,
    pub status: QuotaStatus,
    pub donated_before: u32,
    pub succeeded: u32,
    pub rejected: u32,
    /// Units for which no candidate was found.
    pub skipped: u32,
    pub balance_before: Option<f64>,
    pub balance_after: Option<f64>,
}

impl DonationSummary {
    fn new(status: QuotaStatus, donated_before: u32) -> Self {
        Self {
            started_at: Utc::now(),
            status,
            donated_before,
            succeeded: 0,
            rejected: 0,
            skipped: 0,
            balance_before: None,
            balance_after: None,
        }
    }

    pub fn planned(&self) -> u32 {
        self.status.needed()
    }

    pub fn attempted(&self) -> u32 {
        self.succeeded + self.rejected
    }
}

/// Fulfils the daily coin quota.
pub struct DonateCoinService {
    apis: PlatformApis,
    options: DailyTaskOptions,
    cookie: CookieOptions,
}

impl DonateCoinService {
    pub fn new(apis: PlatformApis, options: DailyTaskOptions, cookie: CookieOptions) -> Self {
        Self { apis, options, cookie }
    }

    pub fn options(&self) -> &DailyTaskOptions {
        &self.options
    }

    /// Works out today's need and donates one coin per unit.
    ///
    /// Units with no candidate and refused donations are counted and skipped.
    /// A rejected csrf token stops the run with [`Error::CredentialInvalid`];
    /// any transport error stops it as well.
    pub async fn add_coins_for_videos(&self, run: &mut DonationRun) -> Result<DonationSummary, Error> {
        let already = self.apis.account.get_donated_coins_today().await?;
        let quota = QuotaState::new(
            self.options.number_of_coins,
            self.options.max_coins_per_day,
            already,
        );
        info!("{} coin(s) donated today, target is {}", already, quota.target());

        if quota.remaining() == 0 {
            info!("daily coin target already reached, nothing to do");
            return Ok(DonationSummary::new(QuotaStatus::AlreadyMet, already));
        }
        info!("{} more coin(s) to donate", quota.remaining());

        let balance = self.apis.account.get_coin_balance().await?;
        info!("coin balance before donating: {}", balance);

        let quota = quota.with_balance(balance);
        let status = quota.status();
        let mut summary = DonationSummary::new(status, already);
        summary.balance_before = Some(balance);

        match status {
            QuotaStatus::InsufficientBalance => {
                info!("not enough coins, skipping the coin task today");
                return Ok(summary);
            }
            QuotaStatus::Clamped { wanted, needed } => {
                info!("balance only covers {} of {} coin(s), adjusting target", needed, wanted);
            }
            QuotaStatus::AlreadyMet | QuotaStatus::Needed(_) => {}
        }

        let selector = DonationSelector::new(SourceContext {
            video: self.apis.video.as_ref(),
            relation: self.apis.relation.as_ref(),
            options: &self.options,
            user_id: self.cookie.user_id,
        });
        let executor = DonationExecutor::new(self.apis.donation.as_ref(), &self.cookie.bili_jct);

        for unit in 1..=status.needed() {
            let Some(video) = selector.select_one(run).await? else {
                warn!("unit {}: no video available to donate to, skipping", unit);
                summary.skipped += 1;
                continue;
            };

            debug!("unit {}: donating to {}", unit, video);
            match executor.donate(&video, COINS_PER_DONATION, self.options.select_like).await? {
                DonationOutcome::Success => summary.succeeded += 1,
                DonationOutcome::Rejected(_) => summary.rejected += 1,
                DonationOutcome::FatalCredentialError(message) => {
                    error!("aborting coin task after {} donation(s)", summary.succeeded);
                    return Err(Error::CredentialInvalid(format!(
                        "bili_jct rejected while donating: {message}"
                    )));
                }
            }
        }

        let balance_after = self.apis.account.get_coin_balance().await?;
        summary.balance_after = Some(balance_after);
        info!(
            "coin task finished: {} succeeded, {} refused, {} skipped; balance is now {}",
            summary.succeeded, summary.rejected, summary.skipped, balance_after
        );
        Ok(summary)
    }
}
