// File: src/services/donate/candidate.rs

use std::collections::HashMap;
use std::fmt;
use rand::Rng;
use tracing::debug;

use coinbot_common::models::{Candidate, CreatorId, DailyTaskOptions};
use crate::platforms::{RelationApi, VideoApi};
use crate::Error;
use super::run::DonationRun;

/// Attempts each source gets before the next one is tried.
pub const ATTEMPTS_PER_SOURCE: u32 = 5;

/// Where a candidate video is looked for, in fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    /// Creators listed in `support_up_ids`.
    SupportedUps,
    SpecialFollowings,
    Followings,
    RegionRanking,
}

impl CandidateSource {
    pub const PRIORITY: [CandidateSource; 4] = [
        CandidateSource::SupportedUps,
        CandidateSource::SpecialFollowings,
        CandidateSource::Followings,
        CandidateSource::RegionRanking,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CandidateSource::SupportedUps => "configured ups",
            CandidateSource::SpecialFollowings => "special followings",
            CandidateSource::Followings => "followings",
            CandidateSource::RegionRanking => "region ranking",
        }
    }

    /// Tries up to `max_attempts` times to find a video this account can still
    /// donate to. `Ok(None)` means the source had nothing to offer.
    pub async fn try_get_candidate(
        self,
        ctx: &SourceContext<'_>,
        run: &mut DonationRun,
        max_attempts: u32,
    ) -> Result<Option<Candidate>, Error> {
        let pool = match self {
            CandidateSource::SupportedUps => ctx.options.support_up_ids.clone(),
            CandidateSource::SpecialFollowings => ctx.relation.get_special_followings().await?,
            CandidateSource::Followings => ctx.relation.get_followings(ctx.user_id).await?,
            CandidateSource::RegionRanking => {
                return try_from_region(&ctx.options.region_ids, ctx.video, run, max_attempts).await;
            }
        };

        if pool.is_empty() {
            debug!("no creators in {}, skipping", self.label());
            return Ok(None);
        }
        try_from_ups(&pool, ctx.video, run, max_attempts).await
    }
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the sources read from. Borrowed for the length of one selection.
pub struct SourceContext<'a> {
    pub video: &'a dyn VideoApi,
    pub relation: &'a dyn RelationApi,
    pub options: &'a DailyTaskOptions,
    /// Account whose follow list backs [`CandidateSource::Followings`].
    pub user_id: u64,
}

/// Picks random creators from `ups`, then a random video of theirs.
///
/// Video counts are memoised per creator for this call only. A creator with
/// fewer videos than the current attempt number is passed over.
pub async fn try_from_ups(
    ups: &[CreatorId],
    video_api: &dyn VideoApi,
    run: &mut DonationRun,
    max_attempts: u32,
) -> Result<Option<Candidate>, Error> {
    if ups.is_empty() {
        return Ok(None);
    }
    let mut video_counts: HashMap<CreatorId, u32> = HashMap::new();

    for attempt in 1..=max_attempts {
        let mid = ups[run.rng.random_range(0..ups.len())];

        let count = match video_counts.get(&mid) {
            Some(count) => *count,
            None => {
                let count = video_api.get_video_count_of_up(mid).await?;
                video_counts.insert(mid, count);
                count
            }
        };
        if count == 0 || count < attempt {
            debug!("attempt {}: up {} has {} video(s), passing", attempt, mid, count);
            continue;
        }

        let position = run.rng.random_range(1..=count);
        let Some(video) = video_api.get_video_of_up(mid, position).await? else {
            debug!("attempt {}: up {} returned nothing at #{}", attempt, mid, position);
            continue;
        };

        if !run.eligibility.is_eligible(&video.aid, video_api).await? {
            continue;
        }
        return Ok(Some(video));
    }

    Ok(None)
}

/// Picks a random region, then a random video from its ranking.
pub async fn try_from_region(
    region_ids: &[u32],
    video_api: &dyn VideoApi,
    run: &mut DonationRun,
    max_attempts: u32,
) -> Result<Option<Candidate>, Error> {
    if region_ids.is_empty() {
        return Ok(None);
    }
    let mut rankings: HashMap<u32, Vec<Candidate>> = HashMap::new();

    for attempt in 1..=max_attempts {
        let region_id = region_ids[run.rng.random_range(0..region_ids.len())];

        if !rankings.contains_key(&region_id) {
            let ranking = video_api.get_region_ranking(region_id).await?;
            rankings.insert(region_id, ranking);
        }
        let ranking = &rankings[&region_id];
        if ranking.is_empty() {
            debug!("attempt {}: region {} ranking is empty", attempt, region_id);
            continue;
        }

        let video = ranking[run.rng.random_range(0..ranking.len())].clone();
        if !run.eligibility.is_eligible(&video.aid, video_api).await? {
            continue;
        }
        return Ok(Some(video));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platforms::{MockRelationApi, MockVideoApi};

    fn options(ups: Vec<CreatorId>) -> DailyTaskOptions {
        DailyTaskOptions {
            support_up_ids: ups,
            region_ids: vec![1],
            ..DailyTaskOptions::default()
        }
    }

    #[tokio::test]
    async fn returns_first_eligible_video_of_a_creator() -> Result<(), Error> {
        let mut video = MockVideoApi::new();
        video.expect_get_video_count_of_up()
            .times(1)
            .returning(|_| Ok(3));
        video.expect_get_video_of_up()
            .times(1)
            .returning(|mid, pos| Ok(Some(Candidate::new(format!("{mid}{pos}"), "clip"))));
        video.expect_get_donated_coins_for_video()
            .times(1)
            .returning(|_| Ok(0));

        let mut run = DonationRun::with_seed(1);
        let found = try_from_ups(&[42], &video, &mut run, ATTEMPTS_PER_SOURCE).await?;
        let found = found.expect("candidate");
        assert!(found.aid.starts_with("42"));
        Ok(())
    }

    #[tokio::test]
    async fn creator_without_videos_exhausts_attempts() -> Result<(), Error> {
        let mut video = MockVideoApi::new();
        video.expect_get_video_count_of_up()
            .times(1)
            .returning(|_| Ok(0));
        video.expect_get_video_of_up().never();

        let mut run = DonationRun::with_seed(2);
        assert_eq!(try_from_ups(&[7], &video, &mut run, 5).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn small_catalogue_is_passed_over_on_later_attempts() -> Result<(), Error> {
        // One video, always fully donated: only attempt 1 may fetch it.
        let mut video = MockVideoApi::new();
        video.expect_get_video_count_of_up()
            .times(1)
            .returning(|_| Ok(1));
        video.expect_get_video_of_up()
            .times(1)
            .returning(|_, _| Ok(Some(Candidate::new("900", "only one"))));
        video.expect_get_donated_coins_for_video()
            .times(1)
            .returning(|_| Ok(2));

        let mut run = DonationRun::with_seed(3);
        assert_eq!(try_from_ups(&[7], &video, &mut run, 5).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn region_ranking_skips_ineligible_entries() -> Result<(), Error> {
        let mut video = MockVideoApi::new();
        video.expect_get_region_ranking()
            .times(1)
            .returning(|_| Ok(vec![Candidate::new("1", "hot")]));
        video.expect_get_donated_coins_for_video()
            .times(1)
            .returning(|_| Ok(2));

        let mut run = DonationRun::with_seed(4);
        assert_eq!(try_from_region(&[3], &video, &mut run, 5).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn followings_source_uses_the_account_id() -> Result<(), Error> {
        let mut relation = MockRelationApi::new();
        relation.expect_get_followings()
            .with(mockall::predicate::eq(1001u64))
            .times(1)
            .returning(|_| Ok(vec![]));
        let video = MockVideoApi::new();
        let opts = options(vec![]);
        let ctx = SourceContext {
            video: &video,
            relation: &relation,
            options: &opts,
            user_id: 1001,
        };

        let mut run = DonationRun::with_seed(5);
        let found = CandidateSource::Followings.try_get_candidate(&ctx, &mut run, 5).await?;
        assert_eq!(found, None);
        Ok(())
    }
}
