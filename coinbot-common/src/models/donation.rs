use serde::{Deserialize, Serialize};

/// Envelope code for a successful request.
pub const CODE_OK: i64 = 0;

/// Envelope code returned by write endpoints when the csrf token (`bili_jct`)
/// is wrong or expired.
pub const CODE_CSRF_INVALID: i64 = -111;

/// Result of a single coin submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DonationOutcome {
    Success,
    /// Recoverable refusal, e.g. the video already got its two coins.
    Rejected(String),
    /// The session credential is no longer accepted.
    FatalCredentialError(String),
}

impl DonationOutcome {
    /// Maps a platform response code onto an outcome.
    pub fn from_response(code: i64, message: &str) -> Self {
        match code {
            CODE_OK => DonationOutcome::Success,
            CODE_CSRF_INVALID => DonationOutcome::FatalCredentialError(message.to_string()),
            _ => DonationOutcome::Rejected(message.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DonationOutcome::Success)
    }
}
