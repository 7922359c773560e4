// File: src/services/donate/selector.rs

use tracing::{debug, info};

use coinbot_common::models::Candidate;
use crate::Error;
use super::candidate::{CandidateSource, SourceContext, ATTEMPTS_PER_SOURCE};
use super::run::DonationRun;

/// Walks [`CandidateSource::PRIORITY`] until one source yields a video.
pub struct DonationSelector<'a> {
    ctx: SourceContext<'a>,
    attempts_per_source: u32,
}

impl<'a> DonationSelector<'a> {
    pub fn new(ctx: SourceContext<'a>) -> Self {
        Self {
            ctx,
            attempts_per_source: ATTEMPTS_PER_SOURCE,
        }
    }

    /// Returns `Ok(None)` once every source is exhausted.
    pub async fn select_one(&self, run: &mut DonationRun) -> Result<Option<Candidate>, Error> {
        for source in CandidateSource::PRIORITY {
            if let Some(video) = source
                .try_get_candidate(&self.ctx, run, self.attempts_per_source)
                .await?
            {
                info!("picked {} from {}", video, source);
                return Ok(Some(video));
            }
            debug!("{} yielded no candidate", source);
        }
        Ok(None)
    }
}
