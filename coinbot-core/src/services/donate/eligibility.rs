// File: src/services/donate/eligibility.rs

use std::collections::HashMap;
use tracing::debug;

use crate::platforms::VideoApi;
use crate::Error;

/// Coins one account may give a single video.
pub const MAX_COINS_PER_VIDEO: u32 = 2;

/// Per-run memo of how many coins this account already gave each video.
///
/// Each `aid` is looked up at most once; afterwards the cached count is
/// trusted for the rest of the run, even if a later donation changes it.
#[derive(Debug, Default)]
pub struct EligibilityCache {
    donated: HashMap<String, u32>,
}

impl EligibilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `aid` can still receive a coin, querying `video_api` on first sight.
    pub async fn is_eligible(&mut self, aid: &str, video_api: &dyn VideoApi) -> Result<bool, Error> {
        let count = match self.donated.get(aid) {
            Some(count) => *count,
            None => {
                let count = video_api.get_donated_coins_for_video(aid).await?;
                self.donated.insert(aid.to_string(), count);
                count
            }
        };

        if count < MAX_COINS_PER_VIDEO {
            debug!("av{} has {} coin(s) from us, can donate", aid, count);
            Ok(true)
        } else {
            debug!("av{} already has {} coins from us, skipping", aid, MAX_COINS_PER_VIDEO);
            Ok(false)
        }
    }

    pub fn cached(&self, aid: &str) -> Option<u32> {
        self.donated.get(aid).copied()
    }

    pub fn len(&self) -> usize {
        self.donated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.donated.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platforms::MockVideoApi;

    #[tokio::test]
    async fn looks_up_each_video_once() -> Result<(), Error> {
        let mut api = MockVideoApi::new();
        api.expect_get_donated_coins_for_video()
            .times(1)
            .returning(|_| Ok(1));

        let mut cache = EligibilityCache::new();
        for _ in 0..4 {
            assert!(cache.is_eligible("170001", &api).await?);
        }
        assert_eq!(cache.cached("170001"), Some(1));
        assert_eq!(cache.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn two_coins_is_ineligible_for_the_rest_of_the_run() -> Result<(), Error> {
        let mut api = MockVideoApi::new();
        api.expect_get_donated_coins_for_video()
            .times(2)
            .returning(|aid| Ok(if aid == "full" { 2 } else { 0 }));

        let mut cache = EligibilityCache::new();
        assert!(!cache.is_eligible("full", &api).await?);
        assert!(cache.is_eligible("fresh", &api).await?);
        assert!(!cache.is_eligible("full", &api).await?);
        Ok(())
    }

    #[test]
    fn lookup_failure_is_not_cached() {
        let mut api = MockVideoApi::new();
        api.expect_get_donated_coins_for_video()
            .times(1)
            .returning(|_| Err(Error::Platform("timeout".into())));

        let mut cache = EligibilityCache::new();
        let res = tokio_test::block_on(cache.is_eligible("170001", &api));
        assert!(res.is_err());
        assert!(cache.is_empty());
    }
}
