// File: src/services/donate/run.rs

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::eligibility::EligibilityCache;

/// State owned by one execution of the coin task and dropped with it.
pub struct DonationRun {
    pub eligibility: EligibilityCache,
    /// Source of every random pick made during the run.
    pub rng: StdRng,
}

impl DonationRun {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic picks, for reproducible runs and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            eligibility: EligibilityCache::new(),
            rng,
        }
    }
}

impl Default for DonationRun {
    fn default() -> Self {
        Self::new()
    }
}
