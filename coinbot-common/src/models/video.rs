use std::fmt;
use serde::{Deserialize, Serialize};

/// Bilibili user id (`mid`) of a video creator.
pub type CreatorId = u64;

/// A video that may receive a coin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// The video's `aid`, kept opaque.
    pub aid: String,
    pub title: String,
}

impl Candidate {
    pub fn new(aid: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            aid: aid.into(),
            title: title.into(),
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" (av{})", self.title, self.aid)
    }
}
