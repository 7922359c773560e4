// File: src/services/donate/executor.rs

use tracing::{error, info};

use coinbot_common::models::{Candidate, DonationOutcome};
use crate::platforms::DonationApi;
use crate::Error;

/// Submits coins with the account's csrf token.
pub struct DonationExecutor<'a> {
    donation: &'a dyn DonationApi,
    csrf: &'a str,
}

impl<'a> DonationExecutor<'a> {
    pub fn new(donation: &'a dyn DonationApi, csrf: &'a str) -> Self {
        Self { donation, csrf }
    }

    /// Transport failures come back as `Err`; every platform answer is an outcome.
    pub async fn donate(
        &self,
        video: &Candidate,
        amount: u32,
        also_like: bool,
    ) -> Result<DonationOutcome, Error> {
        let status = self.donation
            .add_coin_for_video(&video.aid, amount, also_like, self.csrf)
            .await?;

        let outcome = DonationOutcome::from_response(status.code, &status.message);
        match &outcome {
            DonationOutcome::Success => info!("donated {} coin(s) to {}", amount, video),
            DonationOutcome::Rejected(reason) => {
                info!("donation to {} refused: {}", video, reason)
            }
            DonationOutcome::FatalCredentialError(reason) => error!(
                "donation failed, bili_jct is wrong or expired, update the cookie. platform said: {}",
                reason
            ),
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platforms::{ApiStatus, MockDonationApi};
    use mockall::predicate::eq;

    fn api_answering(code: i64, message: &'static str) -> MockDonationApi {
        let mut api = MockDonationApi::new();
        api.expect_add_coin_for_video()
            .times(1)
            .returning(move |_, _, _, _| Ok(ApiStatus { code, message: message.to_string() }));
        api
    }

    #[tokio::test]
    async fn zero_is_success() -> Result<(), Error> {
        let api = api_answering(0, "0");
        let exec = DonationExecutor::new(&api, "csrf");
        let outcome = exec.donate(&Candidate::new("1", "a"), 1, false).await?;
        assert_eq!(outcome, DonationOutcome::Success);
        Ok(())
    }

    #[tokio::test]
    async fn minus_111_is_fatal() -> Result<(), Error> {
        let api = api_answering(-111, "csrf 校验失败");
        let exec = DonationExecutor::new(&api, "stale");
        let outcome = exec.donate(&Candidate::new("1", "a"), 1, true).await?;
        assert!(matches!(outcome, DonationOutcome::FatalCredentialError(_)));
        Ok(())
    }

    #[tokio::test]
    async fn other_codes_are_rejections() -> Result<(), Error> {
        let api = api_answering(34005, "超过投币上限啦~");
        let exec = DonationExecutor::new(&api, "csrf");
        let outcome = exec.donate(&Candidate::new("1", "a"), 1, false).await?;
        assert_eq!(outcome, DonationOutcome::Rejected("超过投币上限啦~".into()));
        Ok(())
    }

    #[tokio::test]
    async fn passes_amount_and_like_flag() -> Result<(), Error> {
        let mut api = MockDonationApi::new();
        api.expect_add_coin_for_video()
            .with(eq("77"), eq(1u32), eq(true), eq("tok"))
            .times(1)
            .returning(|_, _, _, _| Ok(ApiStatus { code: 0, message: String::new() }));

        let exec = DonationExecutor::new(&api, "tok");
        exec.donate(&Candidate::new("77", "t"), 1, true).await?;
        Ok(())
    }
}
